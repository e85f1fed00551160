//! Dynamic binding layer for the GLES driver interface.
//!
//! The embedder supplies a name-to-address resolver (eglGetProcAddress or
//! equivalent); [`ProcTable`] resolves the fixed entry-point registry
//! through it once and wraps each address in a typed, self-checking slot.

pub mod description;
pub mod error;
pub mod proc;
pub mod proc_table;
pub mod types;

pub use description::GlDescription;
pub use error::{gl_error_to_string, Result, TableError};
pub use proc::GlProc;
pub use proc_table::{DebugResourceType, ProcTable, ProcTableInfo};
pub use types::*;
