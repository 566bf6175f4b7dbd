//! PRC Core Library
//!
//! Entity model and wire protocol for the PRC (Product Representation
//! Compact) 3D geometry format: identities, colors, materials,
//! tessellations, poly-B-rep wrappers and the bit-stream encoder they
//! serialize through. Container assembly lives in `prc-io`.

pub mod entity;
pub mod identity;
pub mod material;
pub mod mesh_builder;
pub mod poly_brep;
pub mod status;
pub mod tessellation;
pub mod transform;
pub mod wire;

pub use identity::{IdAllocator, Identity};
pub use material::{Material, RgbColor};
pub use mesh_builder::{build_triangle_mesh, IndexTriple, Vec3};
pub use poly_brep::PolyBrepModel;
pub use status::{PrcError, Status};
pub use tessellation::{TessFace, Tessellation};
pub use transform::Transform;
pub use wire::{BitStreamWriter, WireRecord};
