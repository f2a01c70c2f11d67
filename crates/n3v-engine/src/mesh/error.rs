use std::path::PathBuf;

/// Errors produced while reading or constructing a [`MeshAsset`](super::MeshAsset).
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("failed to open mesh file {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("mesh file is truncated: {section} needs {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        section: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("mesh has {count} vertices; the format allows at most {max} vertices")]
    TooManyVertices { count: usize, max: usize },

    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u16,
        vertex_count: usize,
    },

    #[error("index count {count} is not a multiple of 3")]
    PartialTriangle { count: usize },
}
