use super::description::GlDescription;
use super::error::{Result, TableError};
use super::proc::GlProc;
use super::types::*;
use std::os::raw::c_void;

/// Backend resource kinds that can carry a debug label.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DebugResourceType {
    Texture,
    Buffer,
    Program,
    Shader,
}

/// Construction policy for [`ProcTable`].
///
/// The registry's core/extension split is fixed, but an embedder that knows
/// its driver tier can demote individual core entry points to best-effort:
/// names listed here no longer invalidate the table when absent.
#[derive(Default, Clone, Copy)]
pub struct ProcTableInfo<'a> {
    pub demoted: &'a [&'static str],
}

macro_rules! gl_proc_table {
    (
        core => { $($core:ident: $core_ty:ty,)+ }
        extensions => { $($ext:ident: $ext_ty:ty,)+ }
    ) => {
        /// The full set of GL entry points the renderer depends on, resolved
        /// by name from an embedder-supplied lookup and wrapped in typed,
        /// self-checking slots.
        ///
        /// The table is bound to the thread owning the current GL context;
        /// using one instance from multiple threads without external
        /// synchronization is a precondition violation. After construction a
        /// table is terminally Valid or Invalid. An invalid table must be
        /// discarded, there is no re-resolution path.
        #[allow(non_snake_case)]
        pub struct ProcTable {
            $(pub $core: GlProc<$core_ty>,)+
            $(pub $ext: GlProc<$ext_ty>,)+
            error_fn: Option<GlGetErrorProc>,
            is_valid: bool,
            missing_core: Vec<&'static str>,
            description: GlDescription,
        }

        impl ProcTable {
            fn unresolved() -> Self {
                Self {
                    $($core: GlProc::unresolved(concat!("gl", stringify!($core))),)+
                    $($ext: GlProc::unresolved(concat!("gl", stringify!($ext))),)+
                    error_fn: None,
                    is_valid: false,
                    missing_core: Vec::new(),
                    description: GlDescription::default(),
                }
            }

            fn resolve_all<R>(&mut self, mut resolver: R)
            where
                R: FnMut(&str) -> *const c_void,
            {
                // glGetError is the hook armed around every other call, so
                // it resolves ahead of the registry and is never hooked
                // itself.
                let address = resolver("glGetError");
                let error_fn = if address.is_null() {
                    None
                } else {
                    Some(unsafe { std::mem::transmute::<*const c_void, GlGetErrorProc>(address) })
                };
                self.error_fn = error_fn;
                $(unsafe { self.$core.resolve(resolver(self.$core.name()), error_fn) };)+
                $(unsafe { self.$ext.resolve(resolver(self.$ext.name()), error_fn) };)+
            }

            fn scan_core(&self, demoted: &[&'static str]) -> Vec<&'static str> {
                let mut missing = Vec::new();
                $(
                    if !self.$core.is_available() && !demoted.contains(&self.$core.name()) {
                        missing.push(self.$core.name());
                    }
                )+
                missing
            }

            /// Availability of a slot looked up by entry point name, or
            /// `None` for a name outside the registry.
            pub fn slot_available(&self, name: &str) -> Option<bool> {
                $(
                    if name == self.$core.name() {
                        return Some(self.$core.is_available());
                    }
                )+
                $(
                    if name == self.$ext.name() {
                        return Some(self.$ext.is_available());
                    }
                )+
                None
            }
        }
    };
}

gl_proc_table! {
    core => {
        ActiveTexture: unsafe extern "system" fn(GLenum),
        AttachShader: unsafe extern "system" fn(GLuint, GLuint),
        BindAttribLocation: unsafe extern "system" fn(GLuint, GLuint, *const GLchar),
        BindBuffer: unsafe extern "system" fn(GLenum, GLuint),
        BindTexture: unsafe extern "system" fn(GLenum, GLuint),
        BlendEquationSeparate: unsafe extern "system" fn(GLenum, GLenum),
        BlendFuncSeparate: unsafe extern "system" fn(GLenum, GLenum, GLenum, GLenum),
        BufferData: unsafe extern "system" fn(GLenum, GLsizeiptr, *const c_void, GLenum),
        CheckFramebufferStatus: unsafe extern "system" fn(GLenum) -> GLenum,
        Clear: unsafe extern "system" fn(GLbitfield),
        ClearColor: unsafe extern "system" fn(GLfloat, GLfloat, GLfloat, GLfloat),
        ClearDepthf: unsafe extern "system" fn(GLfloat),
        ClearStencil: unsafe extern "system" fn(GLint),
        ColorMask: unsafe extern "system" fn(GLboolean, GLboolean, GLboolean, GLboolean),
        CompileShader: unsafe extern "system" fn(GLuint),
        CreateProgram: unsafe extern "system" fn() -> GLuint,
        CreateShader: unsafe extern "system" fn(GLenum) -> GLuint,
        CullFace: unsafe extern "system" fn(GLenum),
        DeleteBuffers: unsafe extern "system" fn(GLsizei, *const GLuint),
        DeleteProgram: unsafe extern "system" fn(GLuint),
        DeleteShader: unsafe extern "system" fn(GLuint),
        DeleteTextures: unsafe extern "system" fn(GLsizei, *const GLuint),
        DepthFunc: unsafe extern "system" fn(GLenum),
        DepthMask: unsafe extern "system" fn(GLboolean),
        DepthRangef: unsafe extern "system" fn(GLfloat, GLfloat),
        DetachShader: unsafe extern "system" fn(GLuint, GLuint),
        Disable: unsafe extern "system" fn(GLenum),
        DisableVertexAttribArray: unsafe extern "system" fn(GLuint),
        DrawElements: unsafe extern "system" fn(GLenum, GLsizei, GLenum, *const c_void),
        Enable: unsafe extern "system" fn(GLenum),
        EnableVertexAttribArray: unsafe extern "system" fn(GLuint),
        FrontFace: unsafe extern "system" fn(GLenum),
        GenBuffers: unsafe extern "system" fn(GLsizei, *mut GLuint),
        GenTextures: unsafe extern "system" fn(GLsizei, *mut GLuint),
        GetActiveUniform: unsafe extern "system" fn(GLuint, GLuint, GLsizei, *mut GLsizei, *mut GLint, *mut GLenum, *mut GLchar),
        GetBooleanv: unsafe extern "system" fn(GLenum, *mut GLboolean),
        GetFloatv: unsafe extern "system" fn(GLenum, *mut GLfloat),
        GetFramebufferAttachmentParameteriv: unsafe extern "system" fn(GLenum, GLenum, GLenum, *mut GLint),
        GetIntegerv: unsafe extern "system" fn(GLenum, *mut GLint),
        GetProgramiv: unsafe extern "system" fn(GLuint, GLenum, *mut GLint),
        GetShaderInfoLog: unsafe extern "system" fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar),
        GetShaderiv: unsafe extern "system" fn(GLuint, GLenum, *mut GLint),
        GetString: unsafe extern "system" fn(GLenum) -> *const GLubyte,
        GetUniformLocation: unsafe extern "system" fn(GLuint, *const GLchar) -> GLint,
        IsFramebuffer: unsafe extern "system" fn(GLuint) -> GLboolean,
        IsProgram: unsafe extern "system" fn(GLuint) -> GLboolean,
        LinkProgram: unsafe extern "system" fn(GLuint),
        Scissor: unsafe extern "system" fn(GLint, GLint, GLsizei, GLsizei),
        ShaderBinary: unsafe extern "system" fn(GLsizei, *const GLuint, GLenum, *const c_void, GLsizei),
        ShaderSource: unsafe extern "system" fn(GLuint, GLsizei, *const *const GLchar, *const GLint),
        StencilFuncSeparate: unsafe extern "system" fn(GLenum, GLenum, GLint, GLuint),
        StencilMaskSeparate: unsafe extern "system" fn(GLenum, GLuint),
        StencilOpSeparate: unsafe extern "system" fn(GLenum, GLenum, GLenum, GLenum),
        TexImage2D: unsafe extern "system" fn(GLenum, GLint, GLint, GLsizei, GLsizei, GLint, GLenum, GLenum, *const c_void),
        TexParameteri: unsafe extern "system" fn(GLenum, GLenum, GLint),
        Uniform1fv: unsafe extern "system" fn(GLint, GLsizei, *const GLfloat),
        Uniform1i: unsafe extern "system" fn(GLint, GLint),
        Uniform2fv: unsafe extern "system" fn(GLint, GLsizei, *const GLfloat),
        Uniform4fv: unsafe extern "system" fn(GLint, GLsizei, *const GLfloat),
        UniformMatrix4fv: unsafe extern "system" fn(GLint, GLsizei, GLboolean, *const GLfloat),
        UseProgram: unsafe extern "system" fn(GLuint),
        VertexAttribPointer: unsafe extern "system" fn(GLuint, GLint, GLenum, GLboolean, GLsizei, *const c_void),
        Viewport: unsafe extern "system" fn(GLint, GLint, GLsizei, GLsizei),
    }
    extensions => {
        PushDebugGroupKHR: unsafe extern "system" fn(GLenum, GLuint, GLsizei, *const GLchar),
        PopDebugGroupKHR: unsafe extern "system" fn(),
        ObjectLabelKHR: unsafe extern "system" fn(GLenum, GLuint, GLsizei, *const GLchar),
    }
}

impl ProcTable {
    /// Resolve every registry entry through `resolver` with the default
    /// strict policy: all core entries are required.
    pub fn new<R>(resolver: R) -> Self
    where
        R: FnMut(&str) -> *const c_void,
    {
        Self::new_with_info(&ProcTableInfo::default(), resolver)
    }

    /// Resolve every registry entry through `resolver`, treating the
    /// entries named in `info.demoted` as best-effort. Each name is looked
    /// up exactly once; extension entries never affect validity.
    pub fn new_with_info<R>(info: &ProcTableInfo<'_>, resolver: R) -> Self
    where
        R: FnMut(&str) -> *const c_void,
    {
        let mut gl = Self::unresolved();
        gl.resolve_all(resolver);
        gl.missing_core = gl.scan_core(info.demoted);
        for name in &gl.missing_core {
            log::warn!("required GL entry point {} did not resolve", name);
        }
        for name in info.demoted {
            if gl.slot_available(name) == Some(false) {
                log::warn!(
                    "demoted GL entry point {} is unavailable, continuing without it",
                    name
                );
            }
        }
        gl.is_valid = gl.missing_core.is_empty();
        if gl.is_valid {
            gl.description = GlDescription::new(&gl);
            log::debug!("GL backend resolved:\n{}", gl.description);
        }
        gl
    }

    /// Whether every required entry point resolved. Must be checked before
    /// the table is used for rendering.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// [`ProcTable::is_valid`] as a result, naming the first required entry
    /// point that failed to resolve.
    pub fn validate(&self) -> Result<()> {
        match self.missing_core.first().copied() {
            None => Ok(()),
            Some(name) => Err(TableError::MissingCoreEntryPoint { name }),
        }
    }

    /// Names of required entry points that failed to resolve.
    pub fn missing_core(&self) -> &[&'static str] {
        &self.missing_core
    }

    /// Backend identity captured at construction. Meaningful only on a
    /// valid table.
    pub fn description(&self) -> &GlDescription {
        &self.description
    }

    /// Query the backend error state directly, outside any armed per-call
    /// check. `None` when the error entry point itself never resolved.
    pub fn backend_error(&self) -> Option<GLenum> {
        self.error_fn.map(|error_fn| unsafe { error_fn() })
    }

    /// Upload one shader source string for `shader`. Errors surface through
    /// the per-call check, not a return value.
    pub fn shader_source_mapping(&self, shader: GLuint, source: &[u8]) {
        let data = source.as_ptr() as *const GLchar;
        let length = source.len() as GLint;
        unsafe { self.ShaderSource.call(shader, 1, &data, &length) };
    }

    /// Human-readable dump of the currently bound framebuffer's attachment
    /// state, for crash reports and capture tooling.
    pub fn describe_current_framebuffer(&self) -> String {
        let mut binding: GLint = 0;
        unsafe { self.GetIntegerv.call(GL_FRAMEBUFFER_BINDING, &mut binding) };
        let status = unsafe { self.CheckFramebufferStatus.call(GL_FRAMEBUFFER) };
        let mut summary = format!(
            "Framebuffer {}: {}\n",
            binding,
            framebuffer_status_to_string(status)
        );
        for (label, attachment) in [
            ("Color Attachment 0", GL_COLOR_ATTACHMENT0),
            ("Depth Attachment", GL_DEPTH_ATTACHMENT),
            ("Stencil Attachment", GL_STENCIL_ATTACHMENT),
        ] {
            let mut object_type: GLint = GL_NONE as GLint;
            unsafe {
                self.GetFramebufferAttachmentParameteriv.call(
                    GL_FRAMEBUFFER,
                    attachment,
                    GL_FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE,
                    &mut object_type,
                )
            };
            if object_type as GLenum == GL_NONE {
                summary.push_str(&format!("{}: none\n", label));
                continue;
            }
            let mut object_name: GLint = 0;
            unsafe {
                self.GetFramebufferAttachmentParameteriv.call(
                    GL_FRAMEBUFFER,
                    attachment,
                    GL_FRAMEBUFFER_ATTACHMENT_OBJECT_NAME,
                    &mut object_name,
                )
            };
            summary.push_str(&format!(
                "{}: {} {}\n",
                label,
                attachment_object_to_string(object_type as GLenum),
                object_name
            ));
        }
        summary
    }

    /// Whether the backend reports the currently bound framebuffer as
    /// complete and renderable.
    pub fn is_current_framebuffer_complete(&self) -> bool {
        let status = unsafe { self.CheckFramebufferStatus.call(GL_FRAMEBUFFER) };
        status == GL_FRAMEBUFFER_COMPLETE
    }

    /// Attach a debug label to a backend resource for capture tooling.
    /// Silently skipped when the labeling extension is unavailable.
    pub fn set_debug_label(&self, resource: DebugResourceType, name: GLuint, label: &str) {
        if !self.ObjectLabelKHR.is_available() {
            return;
        }
        let identifier = match resource {
            DebugResourceType::Texture => GL_TEXTURE,
            DebugResourceType::Buffer => GL_BUFFER_KHR,
            DebugResourceType::Program => GL_PROGRAM_KHR,
            DebugResourceType::Shader => GL_SHADER_KHR,
        };
        unsafe {
            self.ObjectLabelKHR.call(
                identifier,
                name,
                label.len() as GLsizei,
                label.as_ptr() as *const GLchar,
            )
        };
    }

    /// Open a named debug group around subsequent calls. Silently skipped
    /// when the grouping extension is unavailable.
    pub fn push_debug_group(&self, label: &str) {
        if !self.PushDebugGroupKHR.is_available() {
            return;
        }
        unsafe {
            self.PushDebugGroupKHR.call(
                GL_DEBUG_SOURCE_APPLICATION_KHR,
                0,
                label.len() as GLsizei,
                label.as_ptr() as *const GLchar,
            )
        };
    }

    /// Close the innermost debug group opened by
    /// [`ProcTable::push_debug_group`].
    pub fn pop_debug_group(&self) {
        if !self.PopDebugGroupKHR.is_available() {
            return;
        }
        unsafe { self.PopDebugGroupKHR.call() };
    }
}

fn framebuffer_status_to_string(status: GLenum) -> &'static str {
    match status {
        GL_FRAMEBUFFER_COMPLETE => "GL_FRAMEBUFFER_COMPLETE",
        GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT => "GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT",
        GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => {
            "GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT"
        }
        GL_FRAMEBUFFER_INCOMPLETE_DIMENSIONS => "GL_FRAMEBUFFER_INCOMPLETE_DIMENSIONS",
        GL_FRAMEBUFFER_UNSUPPORTED => "GL_FRAMEBUFFER_UNSUPPORTED",
        _ => "Unknown framebuffer status",
    }
}

fn attachment_object_to_string(kind: GLenum) -> &'static str {
    match kind {
        GL_TEXTURE => "texture",
        GL_RENDERBUFFER => "renderbuffer",
        _ => "object",
    }
}
