//! GL scalar typedefs and the constants this layer consumes.
//!
//! Only the slices of the GLES 2.0 and GL_KHR_debug headers that the proc
//! table itself touches live here; everything else belongs to the embedder.

use std::os::raw::c_char;

pub type GLenum = u32;
pub type GLbitfield = u32;
pub type GLuint = u32;
pub type GLint = i32;
pub type GLsizei = i32;
pub type GLfloat = f32;
pub type GLboolean = u8;
pub type GLchar = c_char;
pub type GLubyte = u8;
pub type GLsizeiptr = isize;

// Error codes.
pub const GL_NO_ERROR: GLenum = 0;
pub const GL_INVALID_ENUM: GLenum = 0x0500;
pub const GL_INVALID_VALUE: GLenum = 0x0501;
pub const GL_INVALID_OPERATION: GLenum = 0x0502;
pub const GL_STACK_OVERFLOW: GLenum = 0x0503;
pub const GL_STACK_UNDERFLOW: GLenum = 0x0504;
pub const GL_OUT_OF_MEMORY: GLenum = 0x0505;

// String queries.
pub const GL_VENDOR: GLenum = 0x1F00;
pub const GL_RENDERER: GLenum = 0x1F01;
pub const GL_VERSION: GLenum = 0x1F02;
pub const GL_EXTENSIONS: GLenum = 0x1F03;
pub const GL_SHADING_LANGUAGE_VERSION: GLenum = 0x8B8C;

// Framebuffer introspection.
pub const GL_NONE: GLenum = 0;
pub const GL_TEXTURE: GLenum = 0x1702;
pub const GL_RENDERBUFFER: GLenum = 0x8D41;
pub const GL_FRAMEBUFFER: GLenum = 0x8D40;
pub const GL_FRAMEBUFFER_BINDING: GLenum = 0x8CA6;
pub const GL_COLOR_ATTACHMENT0: GLenum = 0x8CE0;
pub const GL_DEPTH_ATTACHMENT: GLenum = 0x8D00;
pub const GL_STENCIL_ATTACHMENT: GLenum = 0x8D20;
pub const GL_FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE: GLenum = 0x8CD0;
pub const GL_FRAMEBUFFER_ATTACHMENT_OBJECT_NAME: GLenum = 0x8CD1;
pub const GL_FRAMEBUFFER_COMPLETE: GLenum = 0x8CD5;
pub const GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT: GLenum = 0x8CD6;
pub const GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT: GLenum = 0x8CD7;
pub const GL_FRAMEBUFFER_INCOMPLETE_DIMENSIONS: GLenum = 0x8CD9;
pub const GL_FRAMEBUFFER_UNSUPPORTED: GLenum = 0x8CDD;

// GL_KHR_debug object identifiers and group source.
pub const GL_BUFFER_KHR: GLenum = 0x82E0;
pub const GL_SHADER_KHR: GLenum = 0x82E1;
pub const GL_PROGRAM_KHR: GLenum = 0x82E2;
pub const GL_DEBUG_SOURCE_APPLICATION_KHR: GLenum = 0x824A;

/// The backend error-query entry point. Resolved separately from the
/// registry because it is the hook every other slot is checked with.
pub type GlGetErrorProc = unsafe extern "system" fn() -> GLenum;
