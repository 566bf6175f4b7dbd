//! PRC container assembly.
//!
//! This crate turns a populated `prc-core` scene graph into the PRC byte
//! stream: a `PrcFile` document collects entities through factory calls,
//! the sizing pass compresses every segment in memory to learn the exact
//! offsets the header must state, and the write pass emits prologue,
//! header, file-structure segments and the model-file trailer in fixed
//! order.
//!
//! ```ignore
//! use prc_io::{PrcFile, RgbColor};
//!
//! let mut file = PrcFile::new();
//! let red = file.add_material(RgbColor::new(1.0, 0.0, 0.0))?;
//! let tri = file.create_triangle_mesh(&positions, &pi, &normals, &ni)?;
//! file.use_mesh(tri, red)?;
//! file.write_to(&mut output)?;
//! ```

pub mod file;
pub mod header;
pub mod uuid;
pub mod version;

pub use file::{FileStructure, PrcFile, Unit};
pub use header::FileHeader;
pub use uuid::Uuid;

// Re-export the core surface callers need to build documents.
pub use prc_core::material::RgbColor;
pub use prc_core::mesh_builder::{IndexTriple, Vec3};
pub use prc_core::status::{PrcError, Status};
pub use prc_core::transform::Transform;
