use crate::{AttributeKind, NumericFormat};

/// Errors related to [Meshes](crate::Mesh) and their [buffers](crate::VertexBuffer).
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("buffer {kind:?} is laid out as {existing:?}; clear it before setting it as {requested:?}")]
    IncompatibleBuffer {
        kind: AttributeKind,
        existing: (u8, NumericFormat),
        requested: (u8, NumericFormat),
    },
    #[error("cannot read {format:?} data of buffer {kind:?} as {requested}")]
    FormatMismatch {
        kind: AttributeKind,
        format: NumericFormat,
        requested: &'static str,
    },
    #[error("{what} out of range: 0..{len} ∌ {index}")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    #[error("invalid mesh state: {0}")]
    InvalidState(&'static str),
    #[error("buffer {0:?} is already set")]
    BufferAlreadySet(AttributeKind),
    #[error("cannot store {len} values of buffer {kind:?} as {components}-component elements")]
    InvalidLayout {
        kind: AttributeKind,
        components: u8,
        len: usize,
    },
    #[error("max weights per vertex must be within 0..=4; found {0}")]
    InvalidWeightCount(u8),
    #[error("hybrid strips must start no later than fans: {strip_start} > {fan_start}")]
    InvalidHybridLayout { strip_start: usize, fan_start: usize },
}
