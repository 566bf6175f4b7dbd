//! PRC document builder and two-pass encoder
//!
//! A [`PrcFile`] owns the whole scene graph: the color and material tables,
//! the tessellations, and the file structures grouping poly-B-rep models.
//! All cross-references are plain array indices and every array is
//! append-only, so a handle stays valid for the document's lifetime.
//!
//! Encoding is two-pass. The header must state each compressed segment's
//! offset and size before the segments exist on the wire, so sizing
//! serializes and compresses every segment into memory first; writing then
//! emits the header followed by those exact buffers. Both passes therefore
//! share one serialization template and cannot disagree.

use std::io::Write;

use prc_core::entity::{write_content_base, write_user_data_empty, TYPE_MODEL_FILE};
use prc_core::identity::{IdAllocator, Identity};
use prc_core::material::{Material, RgbColor};
use prc_core::mesh_builder::{build_triangle_mesh, IndexTriple, Vec3};
use prc_core::poly_brep::PolyBrepModel;
use prc_core::status::{limit_error, ordering_error, unsupported, validation_error, PrcError};
use prc_core::tessellation::Tessellation;
use prc_core::transform::Transform;
use prc_core::wire::{BitStreamWriter, WireRecord};

use crate::header::FileHeader;
use crate::uuid::Uuid;

/// Length unit of the document's coordinates, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub from_cad_file: bool,
    pub scale: f64,
}

impl Default for Unit {
    fn default() -> Self {
        Self {
            from_cad_file: true,
            scale: 1.0,
        }
    }
}

/// One independently compressed segment: a named set of poly-B-rep models.
#[derive(Debug, Default)]
pub struct FileStructure {
    pub name: String,
    pub models: Vec<PolyBrepModel>,
}

/// The model-file trailer entity closing the stream.
struct ModelFile {
    identity: Identity,
    unit: Unit,
    structure_indexes: Vec<u32>,
}

impl WireRecord for ModelFile {
    fn write(&self, out: &mut BitStreamWriter) -> Result<(), PrcError> {
        out.write_u32(TYPE_MODEL_FILE);
        write_content_base(&self.identity, out)?;
        out.write_bool(self.unit.from_cad_file);
        out.write_f64(self.unit.scale);
        out.write_u32_list(&self.structure_indexes)?;
        write_user_data_empty(out);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentState {
    Empty,
    Building,
    Sized,
    Written,
}

/// Compressed segments and header produced by the sizing pass.
struct SizedLayout {
    header: FileHeader,
    structure_segments: Vec<Vec<u8>>,
    model_file_segment: Vec<u8>,
}

/// An in-memory PRC document under construction.
pub struct PrcFile {
    colors: Vec<RgbColor>,
    materials: Vec<Material>,
    tessellations: Vec<Tessellation>,
    file_structures: Vec<FileStructure>,
    unit: Unit,
    ids: IdAllocator,
    state: DocumentState,
    open_group: Option<usize>,
    default_structure: Option<usize>,
    file_structure_uuid: Uuid,
    application_uuid: Uuid,
    layout: Option<SizedLayout>,
}

impl PrcFile {
    pub fn new() -> Self {
        Self {
            colors: Vec::new(),
            materials: Vec::new(),
            tessellations: Vec::new(),
            file_structures: Vec::new(),
            unit: Unit::default(),
            ids: IdAllocator::new(),
            state: DocumentState::Empty,
            open_group: None,
            default_structure: None,
            file_structure_uuid: Uuid::generate(),
            application_uuid: Uuid::generate(),
            layout: None,
        }
    }

    pub fn set_unit(&mut self, unit: Unit) -> Result<(), PrcError> {
        self.check_mutable()?;
        self.unit = unit;
        Ok(())
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn tessellation_count(&self) -> usize {
        self.tessellations.len()
    }

    pub fn material(&self, handle: u32) -> Option<&Material> {
        self.materials.get(handle as usize)
    }

    pub fn tessellation(&self, handle: u32) -> Option<&Tessellation> {
        self.tessellations.get(handle as usize)
    }

    /// Header as computed by the sizing pass, if it ran.
    pub fn header(&self) -> Option<&FileHeader> {
        self.layout.as_ref().map(|layout| &layout.header)
    }

    /// Adds a color and an opaque material referencing it through all four
    /// color slots. Returns the material handle.
    pub fn add_material(&mut self, color: RgbColor) -> Result<u32, PrcError> {
        self.check_mutable()?;
        let handle = u32::try_from(self.materials.len())
            .map_err(|_| limit_error("material table exceeds 32-bit range"))?;
        // Color slots address the flat rgb table by triple offset, biased
        // by one so that 0 stays free to mean "no color".
        let color_offset = u32::try_from(self.colors.len())
            .ok()
            .and_then(|index| index.checked_mul(3))
            .and_then(|offset| offset.checked_add(1))
            .ok_or_else(|| limit_error("color table offset exceeds 32-bit range"))?;
        let identity = self.ids.allocate("")?;
        self.mark_building();
        self.colors.push(color);
        self.materials.push(Material::opaque(identity, color_offset));
        Ok(handle)
    }

    /// Builds a tessellation from raw geometry arrays. Returns its handle,
    /// usable as a poly-B-rep model's tessellation reference.
    ///
    /// `position_indices` and `normal_indices` must describe the same
    /// triangles; on mismatch the document is left untouched.
    pub fn create_triangle_mesh(
        &mut self,
        positions: &[Vec3],
        position_indices: &[IndexTriple],
        normals: &[Vec3],
        normal_indices: &[IndexTriple],
    ) -> Result<u32, PrcError> {
        self.check_mutable()?;
        let handle = u32::try_from(self.tessellations.len())
            .map_err(|_| limit_error("tessellation table exceeds 32-bit range"))?;
        let tess = build_triangle_mesh(positions, position_indices, normals, normal_indices)?;
        self.mark_building();
        self.tessellations.push(tess);
        Ok(handle)
    }

    /// Opens a named group; models attached while it is open land in its
    /// own file structure. Groups do not nest. A transform, when given,
    /// must be the identity: placement via local coordinate systems is out
    /// of scope and fails rather than emitting bytes no reader expects.
    pub fn begin_group(
        &mut self,
        name: impl Into<String>,
        transform: Option<Transform>,
    ) -> Result<(), PrcError> {
        self.check_mutable()?;
        if self.open_group.is_some() {
            return Err(ordering_error("a group is already open"));
        }
        if let Some(transform) = transform {
            if !transform.is_identity() {
                return Err(unsupported("group transforms (local coordinate systems)"));
            }
        }
        self.mark_building();
        self.file_structures.push(FileStructure {
            name: name.into(),
            models: Vec::new(),
        });
        self.open_group = Some(self.file_structures.len() - 1);
        Ok(())
    }

    pub fn end_group(&mut self) -> Result<(), PrcError> {
        self.check_mutable()?;
        self.open_group
            .take()
            .map(|_| ())
            .ok_or_else(|| ordering_error("no group is open"))
    }

    /// Attaches a mesh with a material to the open group, or to the
    /// document's default file structure when no group is open.
    pub fn use_mesh(&mut self, tessellation: u32, material: u32) -> Result<(), PrcError> {
        self.check_mutable()?;
        if (tessellation as usize) >= self.tessellations.len() {
            return Err(validation_error(format!(
                "tessellation handle {tessellation} does not exist"
            )));
        }
        if (material as usize) >= self.materials.len() {
            return Err(validation_error(format!(
                "material handle {material} does not exist"
            )));
        }
        let identity = self.ids.allocate("")?;
        self.mark_building();
        let target = match self.open_group {
            Some(index) => index,
            None => match self.default_structure {
                Some(index) => index,
                None => {
                    self.file_structures.push(FileStructure::default());
                    let index = self.file_structures.len() - 1;
                    self.default_structure = Some(index);
                    index
                }
            },
        };
        let mut model = PolyBrepModel::new(identity);
        model.tessellation_index = Some(tessellation);
        model.material_index = Some(material);
        self.file_structures[target].models.push(model);
        Ok(())
    }

    /// Pass 1: serializes and compresses every segment into memory and
    /// fills in the header offsets and sizes. Idempotent once sized; after
    /// this no entity may be added.
    pub fn compute_sizes(&mut self) -> Result<(), PrcError> {
        match self.state {
            DocumentState::Written => {
                return Err(ordering_error("document has already been written"))
            }
            DocumentState::Sized => return Ok(()),
            DocumentState::Empty | DocumentState::Building => {}
        }
        if self.open_group.is_some() {
            return Err(ordering_error("a group is still open"));
        }

        let mut structure_segments = Vec::with_capacity(self.file_structures.len());
        for structure in &self.file_structures {
            structure_segments.push(self.serialize_structure(structure)?);
        }
        let model_file_segment = self.serialize_model_file()?;

        let mut header = FileHeader::new(self.file_structure_uuid, self.application_uuid);
        let header_len = as_wire_offset(FileHeader::byte_len(self.file_structures.len()))?;
        let mut offset = header_len;
        for segment in &structure_segments {
            let size = as_wire_offset(segment.len())?;
            header.structure_offsets_sizes.push((offset, size));
            offset = offset
                .checked_add(size)
                .ok_or_else(|| limit_error("file offset exceeds 32-bit range"))?;
        }
        // The schema marker sits between the last structure segment and
        // the model-file segment.
        header.model_file_offset = offset
            .checked_add(4)
            .ok_or_else(|| limit_error("model file offset exceeds 32-bit range"))?;
        let model_file_size = as_wire_offset(model_file_segment.len())?;
        header.file_size = header
            .model_file_offset
            .checked_add(model_file_size)
            .ok_or_else(|| limit_error("file size exceeds 32-bit range"))?;

        self.layout = Some(SizedLayout {
            header,
            structure_segments,
            model_file_segment,
        });
        self.state = DocumentState::Sized;
        Ok(())
    }

    /// Pass 2: emits the stream. Runs the sizing pass first when it has
    /// not happened yet. Writing is terminal; the document cannot be
    /// written twice. On failure the sink holds a partial stream the
    /// caller must discard.
    pub fn write_to<W: Write>(&mut self, sink: &mut W) -> Result<(), PrcError> {
        self.compute_sizes()?;
        let layout = self
            .layout
            .as_ref()
            .ok_or_else(|| ordering_error("document has not been sized"))?;

        let mut head = BitStreamWriter::new();
        layout.header.write(&mut head)?;
        sink.write_all(&head.finish())?;
        for segment in &layout.structure_segments {
            sink.write_all(segment)?;
        }
        sink.write_all(&0u32.to_le_bytes())?; // schema count
        sink.write_all(&layout.model_file_segment)?;

        self.state = DocumentState::Written;
        Ok(())
    }

    /// Serializes one file structure into its compressed segment. The
    /// document-scoped color, material and tessellation tables are restated
    /// in each segment so every segment stays independently decompressible.
    fn serialize_structure(&self, structure: &FileStructure) -> Result<Vec<u8>, PrcError> {
        let mut out = BitStreamWriter::new();
        out.write_string(&structure.name)?;
        let mut flat_colors = Vec::with_capacity(self.colors.len() * 3);
        for color in &self.colors {
            flat_colors.extend_from_slice(&[color.r, color.g, color.b]);
        }
        out.write_f64_list(&flat_colors)?;
        out.write_record_list(&self.materials)?;
        out.write_record_list(&self.tessellations)?;
        out.write_record_list(&structure.models)?;
        Ok(out.finish_compressed())
    }

    fn serialize_model_file(&mut self) -> Result<Vec<u8>, PrcError> {
        let mut structure_indexes = Vec::with_capacity(self.file_structures.len());
        for index in 0..self.file_structures.len() {
            structure_indexes.push(
                u32::try_from(index)
                    .map_err(|_| limit_error("file structure index exceeds 32-bit range"))?,
            );
        }
        let model_file = ModelFile {
            identity: self.ids.allocate("")?,
            unit: self.unit,
            structure_indexes,
        };
        let mut out = BitStreamWriter::new();
        model_file.write(&mut out)?;
        Ok(out.finish_compressed())
    }

    fn check_mutable(&self) -> Result<(), PrcError> {
        match self.state {
            DocumentState::Empty | DocumentState::Building => Ok(()),
            DocumentState::Sized => Err(ordering_error(
                "document is sized; its header no longer reflects new entities",
            )),
            DocumentState::Written => Err(ordering_error("document has already been written")),
        }
    }

    fn mark_building(&mut self) {
        if self.state == DocumentState::Empty {
            self.state = DocumentState::Building;
        }
    }
}

impl Default for PrcFile {
    fn default() -> Self {
        Self::new()
    }
}

fn as_wire_offset(len: usize) -> Result<u32, PrcError> {
    u32::try_from(len).map_err(|_| limit_error("segment length exceeds 32-bit range"))
}
