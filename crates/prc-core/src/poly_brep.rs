//! Poly-B-rep representation item
//!
//! The only representation item modeled: an opaque wrapper pointing at a
//! precomputed tessellation by document array index. Index references are
//! written biased by one so that 0 means "unset" on the wire; an index of
//! `u32::MAX` cannot be biased without colliding with that sentinel and is
//! rejected as an encoding-limit error.

use crate::entity::{
    write_content_base, write_graphics_disabled, write_user_data_empty, TYPE_RI_POLY_BREP_MODEL,
};
use crate::identity::Identity;
use crate::status::{limit_error, PrcError};
use crate::wire::{BitStreamWriter, WireRecord};

#[derive(Debug, Clone)]
pub struct PolyBrepModel {
    pub identity: Identity,
    pub is_closed: bool,
    pub coordinate_system_index: Option<u32>,
    pub tessellation_index: Option<u32>,
    /// Material association kept for callers; graphics styles are disabled
    /// on the wire, so this never leaves memory.
    pub material_index: Option<u32>,
}

impl PolyBrepModel {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            is_closed: false,
            coordinate_system_index: None,
            tessellation_index: None,
            material_index: None,
        }
    }
}

fn write_biased_index(
    out: &mut BitStreamWriter,
    index: Option<u32>,
    what: &str,
) -> Result<(), PrcError> {
    match index {
        None => out.write_u32(0),
        Some(index) => {
            let biased = index
                .checked_add(1)
                .ok_or_else(|| limit_error(format!("{what} collides with the unset sentinel")))?;
            out.write_u32(biased);
        }
    }
    Ok(())
}

impl WireRecord for PolyBrepModel {
    fn write(&self, out: &mut BitStreamWriter) -> Result<(), PrcError> {
        out.write_u32(TYPE_RI_POLY_BREP_MODEL);
        write_content_base(&self.identity, out)?;
        write_graphics_disabled(out);
        write_biased_index(out, self.coordinate_system_index, "coordinate system index")?;
        write_biased_index(out, self.tessellation_index, "tessellation index")?;
        out.write_bool(self.is_closed);
        write_user_data_empty(out);
        Ok(())
    }
}
