// PRC container version constants.
//
// 8137 is the format edition published PRC readers accept; both the
// minimal reader version and the authoring version state it.

/// Start-of-file magic literal.
pub const MAGIC: &[u8; 3] = b"PRC";

/// Lowest reader version able to consume the produced stream.
pub const MINIMAL_VERSION: u32 = 8137;

/// Version this encoder authors.
pub const AUTHORING_VERSION: u32 = 8137;
