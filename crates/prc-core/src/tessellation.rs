//! Triangulated tessellation entities
//!
//! A tessellation holds the flattened coordinate arrays of a precomputed
//! triangulation plus per-face index ranges. Coordinates and normals are
//! stored as flat xyz triples; the triangulated index interleaves
//! (normal, position) pairs pre-scaled by 3 so each entry directly
//! addresses a triple in the flat arrays.

use crate::entity::{TYPE_TESS_3D, TYPE_TESS_FACE};
use crate::status::{unsupported, PrcError};
use crate::wire::{BitStreamWriter, WireRecord};

/// Face behaviour bit: the face is shown.
pub const GRAPHICS_SHOW: u32 = 0x0001;
/// Used-entities bit: the face carries plain triangles.
pub const FACE_TRIANGLE: u32 = 0x0002;

/// One face's view into the tessellation index arrays.
#[derive(Debug, Clone)]
pub struct TessFace {
    pub line_attributes: Vec<u32>,
    pub start_wire: u32,
    pub sizes_wire: Vec<u32>,
    pub used_entities_flag: u32,
    pub start_triangulated: u32,
    pub sizes_triangulated: Vec<u32>,
    pub num_texture_coord_indexes: u32,
    pub behaviour: u32,
}

impl TessFace {
    /// A face covering `triangle_count` plain triangles starting at the
    /// beginning of the triangulated index.
    pub fn triangles(triangle_count: u32) -> Self {
        Self {
            line_attributes: Vec::new(),
            start_wire: 0,
            sizes_wire: Vec::new(),
            used_entities_flag: FACE_TRIANGLE,
            start_triangulated: 0,
            sizes_triangulated: vec![triangle_count],
            num_texture_coord_indexes: 0,
            behaviour: GRAPHICS_SHOW,
        }
    }
}

impl WireRecord for TessFace {
    fn write(&self, out: &mut BitStreamWriter) -> Result<(), PrcError> {
        out.write_u32(TYPE_TESS_FACE);
        out.write_u32_list(&self.line_attributes)?;
        out.write_u32(self.start_wire);
        out.write_u32_list(&self.sizes_wire)?;
        out.write_u32(self.used_entities_flag);
        out.write_u32(self.start_triangulated);
        out.write_u32_list(&self.sizes_triangulated)?;
        out.write_u32(self.num_texture_coord_indexes);
        out.write_bool(false); // no vertex colors
        // The behaviour word is only present when line attributes are.
        if !self.line_attributes.is_empty() {
            out.write_u32(self.behaviour);
        }
        Ok(())
    }
}

/// A 3D tessellation: flat coordinates, normals and the faces over them.
#[derive(Debug, Clone, Default)]
pub struct Tessellation {
    pub is_calculated: bool,
    pub coordinates: Vec<f64>,
    pub has_faces: bool,
    pub has_loops: bool,
    pub normal_coordinates: Vec<f64>,
    pub wire_index: Vec<u32>,
    pub triangulated_index: Vec<u32>,
    pub faces: Vec<TessFace>,
    pub texture_coordinates: Vec<f64>,
}

impl Tessellation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WireRecord for Tessellation {
    fn write(&self, out: &mut BitStreamWriter) -> Result<(), PrcError> {
        if self.triangulated_index.is_empty() && !self.wire_index.is_empty() {
            return Err(unsupported("wireframe-only tessellation"));
        }
        out.write_u32(TYPE_TESS_3D);
        // Base tessellation data.
        out.write_bool(self.is_calculated);
        out.write_f64_list(&self.coordinates)?;
        // 3D tessellation data.
        out.write_bool(self.has_faces);
        out.write_bool(self.has_loops);
        out.write_bool(false); // normals need no recalculation
        out.write_f64_list(&self.normal_coordinates)?;
        out.write_u32_list(&self.wire_index)?;
        out.write_u32_list(&self.triangulated_index)?;
        out.write_record_list(&self.faces)?;
        out.write_f64_list(&self.texture_coordinates)?;
        Ok(())
    }
}
