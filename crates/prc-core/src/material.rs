//! Colors and materials

use crate::entity::{write_content_base, TYPE_GRAPH_MATERIAL};
use crate::identity::Identity;
use crate::status::{unsupported, PrcError};
use crate::wire::{BitStreamWriter, WireRecord};

/// An RGB color with each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl RgbColor {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// A surface material referencing entries of the document color table.
///
/// The four color fields hold `color_index * 3 + 1`: the color table is
/// addressed by the byte-like offset of its flat rgb triples, biased by one
/// so that wire value 0 can mean "no color".
#[derive(Debug, Clone)]
pub struct Material {
    pub identity: Identity,
    pub picture_index: u32,
    pub ambient: u32,
    pub diffuse: u32,
    pub emissive: u32,
    pub specular: u32,
    pub shininess: f64,
    pub ambient_alpha: f64,
    pub diffuse_alpha: f64,
    pub emissive_alpha: f64,
    pub specular_alpha: f64,
}

impl Material {
    /// A fully opaque material whose four color slots all reference the
    /// same biased color-table offset.
    pub fn opaque(identity: Identity, color_offset: u32) -> Self {
        Self {
            identity,
            picture_index: 0,
            ambient: color_offset,
            diffuse: color_offset,
            emissive: color_offset,
            specular: color_offset,
            shininess: 1.0,
            ambient_alpha: 1.0,
            diffuse_alpha: 1.0,
            emissive_alpha: 1.0,
            specular_alpha: 1.0,
        }
    }
}

impl WireRecord for Material {
    fn write(&self, out: &mut BitStreamWriter) -> Result<(), PrcError> {
        if self.picture_index != 0 {
            return Err(unsupported("texture pictures on materials"));
        }
        out.write_u32(TYPE_GRAPH_MATERIAL);
        write_content_base(&self.identity, out)?;
        out.write_u32(self.ambient);
        out.write_u32(self.diffuse);
        out.write_u32(self.emissive);
        out.write_u32(self.specular);
        out.write_f64(self.shininess);
        out.write_f64(self.ambient_alpha);
        out.write_f64(self.diffuse_alpha);
        out.write_f64(self.emissive_alpha);
        out.write_f64(self.specular_alpha);
        Ok(())
    }
}
