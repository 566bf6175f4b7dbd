//! 128-bit identifiers for the file header
//!
//! The header carries one UUID for the file structure and one for the
//! authoring application. They only need to be unique per produced file,
//! so they are derived from the wall clock and a process-local sequence
//! run through a splitmix64 mixer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static SEQUENCE: AtomicU64 = AtomicU64::new(0x9e3779b97f4a7c15);

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e3779b97f4a7c15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// A 128-bit identifier stored as four 32-bit words, written to the wire
/// in word order, each word little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uuid(pub [u32; 4]);

impl Uuid {
    pub fn generate() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let hi = splitmix64(nanos ^ seq);
        let lo = splitmix64(hi ^ seq.rotate_left(32));
        Self([
            (hi >> 32) as u32,
            hi as u32,
            (lo >> 32) as u32,
            lo as u32,
        ])
    }

    pub fn words(&self) -> [u32; 4] {
        self.0
    }
}
