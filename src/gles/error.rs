use super::types::*;
use thiserror::Error;

/// Human-readable name for a GLES error code.
pub fn gl_error_to_string(value: GLenum) -> &'static str {
    match value {
        GL_NO_ERROR => "GL_NO_ERROR",
        GL_INVALID_ENUM => "GL_INVALID_ENUM",
        GL_INVALID_VALUE => "GL_INVALID_VALUE",
        GL_INVALID_OPERATION => "GL_INVALID_OPERATION",
        GL_STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        GL_STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        GL_OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "Unknown GL Error",
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("required entry point {name} did not resolve")]
    MissingCoreEntryPoint { name: &'static str },
}

/// Convenient crate-wide result type.
pub type Result<T, E = TableError> = std::result::Result<T, E>;
