//! Error taxonomies for the VM and the rasterizer: plain structs/enums with
//! hand-written `Display` impls, matching `FetchError`/`PageError` in the
//! teacher crate rather than a derive-macro based approach.

use crate::vm::Tag;

/// Errors the SDFVM can raise while executing a program.
#[derive(Debug, Clone, PartialEq)]
pub enum VmError {
    StackUnderflow,
    StackOverflow,
    TypeMismatch { expected: Tag, got: Tag },
    UnknownOpcode(u8),
    TruncatedImmediate,
    RegisterOutOfRange(u8),
    RegisterTagMismatch,
}

impl std::fmt::Display for VmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VmError::StackUnderflow => write!(f, "sdfvm: operand stack underflow"),
            VmError::StackOverflow => write!(f, "sdfvm: operand stack overflow"),
            VmError::TypeMismatch { expected, got } => {
                write!(f, "sdfvm: type mismatch, expected {:?} but got {:?}", expected, got)
            }
            VmError::UnknownOpcode(op) => write!(f, "sdfvm: unknown opcode 0x{:02x}", op),
            VmError::TruncatedImmediate => write!(f, "sdfvm: truncated immediate operand"),
            VmError::RegisterOutOfRange(idx) => {
                write!(f, "sdfvm: register index {} out of range [0,16)", idx)
            }
            VmError::RegisterTagMismatch => write!(f, "sdfvm: register tag mismatch"),
        }
    }
}

impl std::error::Error for VmError {}

/// Errors the tile rasterizer can raise.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterError {
    /// The worker thread pool failed to build (the Rust analogue of
    /// `pthread_create` failing). Fatal.
    WorkerPool(String),
    /// The first VM error observed across all workers, surfaced after join.
    Shader(VmError),
}

impl std::fmt::Display for RasterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterError::WorkerPool(message) => write!(f, "raster: worker pool build failed: {}", message),
            RasterError::Shader(err) => write!(f, "raster: shader error: {}", err),
        }
    }
}

impl std::error::Error for RasterError {}

impl From<VmError> for RasterError {
    fn from(err: VmError) -> Self {
        RasterError::Shader(err)
    }
}
