pub mod gles;
pub use gles::*;
