use miniz_oxide::inflate::decompress_to_vec;
use prc_io::{PrcFile, RgbColor};
use proptest::prelude::*;

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

// Header prologue: magic(3) + two versions(8) + two UUIDs(32).
const STRUCTURE_COUNT_OFFSET: usize = 43;

fn write_simple_document(groups: usize) -> (Vec<u8>, Vec<(u32, u32)>) {
    let mut file = PrcFile::new();
    let mat = file.add_material(RgbColor::new(1.0, 0.0, 0.0)).unwrap();
    let mesh = file
        .create_triangle_mesh(
            &[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)],
            &[(0, 1, 2)],
            &[(0.0, 0.0, 1.0)],
            &[(0, 0, 0)],
        )
        .unwrap();
    file.use_mesh(mesh, mat).unwrap();
    for i in 0..groups {
        file.begin_group(format!("group-{i}"), None).unwrap();
        file.use_mesh(mesh, mat).unwrap();
        file.end_group().unwrap();
    }
    let mut out = Vec::new();
    file.write_to(&mut out).unwrap();
    let table = file.header().unwrap().structure_offsets_sizes.clone();
    (out, table)
}

#[test]
fn test_stream_starts_with_magic() {
    let (stream, _) = write_simple_document(0);
    assert_eq!(&stream[..3], b"PRC");
}

#[test]
fn test_sized_lengths_match_written_lengths() {
    let (stream, table) = write_simple_document(2);
    assert_eq!(read_u32(&stream, STRUCTURE_COUNT_OFFSET), 3);

    // The offset/size table in the stream matches what sizing computed,
    // and each entry brackets a valid DEFLATE segment.
    let mut cursor = STRUCTURE_COUNT_OFFSET + 4;
    for &(offset, size) in &table {
        assert_eq!(read_u32(&stream, cursor), offset);
        assert_eq!(read_u32(&stream, cursor + 4), size);
        let segment = &stream[offset as usize..(offset + size) as usize];
        decompress_to_vec(segment).unwrap();
        cursor += 8;
    }

    let model_file_offset = read_u32(&stream, cursor) as usize;
    let file_size = read_u32(&stream, cursor + 4) as usize;
    assert_eq!(read_u32(&stream, cursor + 8), 0); // uncompressed file count
    assert_eq!(file_size, stream.len());

    // Schema marker between the last segment and the model-file trailer.
    assert_eq!(read_u32(&stream, model_file_offset - 4), 0);
    decompress_to_vec(&stream[model_file_offset..file_size]).unwrap();
}

#[test]
fn test_segments_are_contiguous_after_header() {
    let (stream, table) = write_simple_document(1);
    let header_len = STRUCTURE_COUNT_OFFSET + 4 + table.len() * 8 + 12;
    assert_eq!(table[0].0 as usize, header_len);
    assert_eq!(table[1].0, table[0].0 + table[0].1);
    let model_file_offset = read_u32(&stream, STRUCTURE_COUNT_OFFSET + 4 + table.len() * 8);
    assert_eq!(model_file_offset, table[1].0 + table[1].1 + 4);
}

#[test]
fn test_empty_document_is_header_and_trailer_only() {
    let mut file = PrcFile::new();
    let mut stream = Vec::new();
    file.write_to(&mut stream).unwrap();

    assert_eq!(read_u32(&stream, STRUCTURE_COUNT_OFFSET), 0);
    let model_file_offset = read_u32(&stream, STRUCTURE_COUNT_OFFSET + 4) as usize;
    let file_size = read_u32(&stream, STRUCTURE_COUNT_OFFSET + 8) as usize;
    assert_eq!(file_size, stream.len());
    // Header(59) + schema marker(4), then the trailer.
    assert_eq!(model_file_offset, 63);
    decompress_to_vec(&stream[model_file_offset..]).unwrap();
}

#[test]
fn test_structure_segment_content_shape() {
    let (stream, table) = write_simple_document(0);
    let (offset, size) = table[0];
    let raw = decompress_to_vec(&stream[offset as usize..(offset + size) as usize]).unwrap();

    // name("") | color table | materials | tessellations | models
    assert_eq!(read_u32(&raw, 0), 0);
    assert_eq!(read_u32(&raw, 4), 3); // one color, three doubles
    let after_colors = 8 + 3 * 8;
    assert_eq!(read_u32(&raw, after_colors), 1); // one material record
    assert_eq!(read_u32(&raw, after_colors + 4), 702); // material type tag
}

proptest! {
    // The core round-trip invariant: for arbitrary well-formed meshes the
    // sizing pass predicts the written stream exactly.
    #[test]
    fn prop_sized_layout_matches_stream(
        (vertex_count, triangles) in (1usize..12).prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec(
                    (0..n as u32, 0..n as u32, 0..n as u32),
                    1..12,
                ),
            )
        }),
        material_count in 1usize..4,
    ) {
        let mut file = PrcFile::new();
        let mut last_material = 0;
        for i in 0..material_count {
            let level = i as f64 / material_count as f64;
            last_material = file
                .add_material(RgbColor::new(level, 1.0 - level, 0.5))
                .unwrap();
        }
        let positions: Vec<_> = (0..vertex_count)
            .map(|i| (i as f64, (i * i) as f64, 0.25))
            .collect();
        let normals: Vec<_> = (0..vertex_count).map(|_| (0.0, 0.0, 1.0)).collect();
        let mesh = file
            .create_triangle_mesh(&positions, &triangles, &normals, &triangles)
            .unwrap();
        file.use_mesh(mesh, last_material).unwrap();

        let mut stream = Vec::new();
        file.write_to(&mut stream).unwrap();

        let header = file.header().unwrap();
        prop_assert_eq!(header.file_size as usize, stream.len());
        for &(offset, size) in &header.structure_offsets_sizes {
            let segment = &stream[offset as usize..(offset + size) as usize];
            prop_assert!(decompress_to_vec(segment).is_ok());
        }
        let trailer = &stream[header.model_file_offset as usize..];
        prop_assert!(decompress_to_vec(trailer).is_ok());
    }
}
