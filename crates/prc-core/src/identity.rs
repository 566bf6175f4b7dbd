//! Entity identification
//!
//! Every serializable PRC entity carries a pair of unique integer ids used
//! for cross-referencing inside one document. The counters live on the
//! document, not in process-wide state, so two documents built in the same
//! process can never interleave id sequences.

use crate::status::{limit_error, PrcError};

/// The shared identification block serialized at the start of every entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub name: String,
    pub cad_id: u32,
    pub persistent_cad_id: u32,
    pub prc_uid: u32,
}

/// Issues `cad_id` / `prc_uid` values for one document.
///
/// Both sequences are strictly increasing and never reused. Exhausting the
/// 32-bit range is an encoding-limit error, not silent wraparound.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next_cad_id: u32,
    next_prc_uid: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws the next id pair and builds an [`Identity`] around it.
    pub fn allocate(&mut self, name: impl Into<String>) -> Result<Identity, PrcError> {
        let cad_id = self.next_cad_id;
        let prc_uid = self.next_prc_uid;
        self.next_cad_id = cad_id
            .checked_add(1)
            .ok_or_else(|| limit_error("CAD identifier counter exhausted"))?;
        self.next_prc_uid = prc_uid
            .checked_add(1)
            .ok_or_else(|| limit_error("PRC unique identifier counter exhausted"))?;
        Ok(Identity {
            name: name.into(),
            cad_id,
            persistent_cad_id: 0,
            prc_uid,
        })
    }
}
