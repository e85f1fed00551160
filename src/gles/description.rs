use super::proc_table::ProcTable;
use super::types::*;
use std::collections::HashSet;
use std::ffi::CStr;
use std::fmt;

const DEBUG_EXTENSION: &str = "GL_KHR_debug";

/// Backend identity captured once at table construction: version, vendor
/// and renderer strings plus the advertised extension set.
#[cfg_attr(feature = "gloss-serde", derive(serde::Serialize))]
#[derive(Debug, Default, Clone)]
pub struct GlDescription {
    vendor: String,
    renderer: String,
    version: String,
    shading_language_version: String,
    extensions: HashSet<String>,
}

impl GlDescription {
    pub(crate) fn new(gl: &ProcTable) -> Self {
        if !gl.GetString.is_available() {
            return Self::default();
        }
        let extensions = query_string(gl, GL_EXTENSIONS)
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Self {
            vendor: query_string(gl, GL_VENDOR),
            renderer: query_string(gl, GL_RENDERER),
            version: query_string(gl, GL_VERSION),
            shading_language_version: query_string(gl, GL_SHADING_LANGUAGE_VERSION),
            extensions,
        }
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn renderer(&self) -> &str {
        &self.renderer
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn shading_language_version(&self) -> &str {
        &self.shading_language_version
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    pub fn has_debug_extension(&self) -> bool {
        self.has_extension(DEBUG_EXTENSION)
    }
}

impl fmt::Display for GlDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vendor: {}", self.vendor)?;
        writeln!(f, "Renderer: {}", self.renderer)?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(
            f,
            "Shading Language Version: {}",
            self.shading_language_version
        )?;
        let mut extensions: Vec<&String> = self.extensions.iter().collect();
        extensions.sort();
        writeln!(f, "Extensions: {}", extensions.len())?;
        for extension in extensions {
            writeln!(f, "  {}", extension)?;
        }
        Ok(())
    }
}

fn query_string(gl: &ProcTable, name: GLenum) -> String {
    let value = unsafe { gl.GetString.call(name) };
    if value.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(value as *const GLchar) }
        .to_str()
        .unwrap_or("")
        .to_string()
}
