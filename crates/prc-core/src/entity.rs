//! Shared entity framing
//!
//! Every PRC entity is serialized inside the same fixed frame: a type tag
//! from the closed registry below, an always-zero attributes placeholder,
//! the identity fields, the type-specific payload, a disabled graphics
//! sub-record for representation items, and an always-zero user-data count.
//! There is no tag/length escape for skipping unknown fields, so this frame
//! must be reproduced byte for byte by every entity.

use crate::identity::Identity;
use crate::status::PrcError;
use crate::wire::BitStreamWriter;

// Entity type tag registry. The tags are fixed by the PRC format; a reader
// dispatches on them, so they are the only form of type dispatch the wire
// carries.
pub const TYPE_TESS_3D: u32 = 172;
pub const TYPE_TESS_FACE: u32 = 174;
pub const TYPE_RI_POLY_BREP_MODEL: u32 = 237;
pub const TYPE_MODEL_FILE: u32 = 301;
pub const TYPE_GRAPH_MATERIAL: u32 = 702;

/// Writes the attributes placeholder and identity fields that follow every
/// entity's type tag. Custom attributes are unsupported, so the count is
/// always zero.
pub fn write_content_base(identity: &Identity, out: &mut BitStreamWriter) -> Result<(), PrcError> {
    out.write_u32(0); // attribute count
    out.write_string(&identity.name)?;
    out.write_u32(identity.cad_id);
    out.write_u32(identity.persistent_cad_id);
    out.write_u32(identity.prc_uid);
    Ok(())
}

/// Graphics sub-record for representation items. Custom graphics styles are
/// unsupported; a single `false` marks the record disabled.
pub fn write_graphics_disabled(out: &mut BitStreamWriter) {
    out.write_bool(false);
}

/// User data is unsupported; the trailing count is always zero.
pub fn write_user_data_empty(out: &mut BitStreamWriter) {
    out.write_u32(0);
}
