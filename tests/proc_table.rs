use gloss::*;
use serial_test::serial;
use std::collections::HashMap;
use std::os::raw::c_void;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

// A minimal in-process GL backend. All state is global because the table
// hands out plain extern fn pointers, hence #[serial] on every test.
static PENDING_ERROR: AtomicU32 = AtomicU32::new(GL_NO_ERROR);
static ERROR_QUERIES: AtomicUsize = AtomicUsize::new(0);
static FRAMEBUFFER_STATUS: AtomicU32 = AtomicU32::new(GL_FRAMEBUFFER_COMPLETE);
static SHADER_SOURCES: Mutex<Vec<(GLuint, String)>> = Mutex::new(Vec::new());
static LABELS: Mutex<Vec<(GLenum, GLuint, String)>> = Mutex::new(Vec::new());

fn reset_fake_gl() {
    PENDING_ERROR.store(GL_NO_ERROR, Ordering::SeqCst);
    ERROR_QUERIES.store(0, Ordering::SeqCst);
    FRAMEBUFFER_STATUS.store(GL_FRAMEBUFFER_COMPLETE, Ordering::SeqCst);
    SHADER_SOURCES.lock().unwrap().clear();
    LABELS.lock().unwrap().clear();
}

unsafe extern "system" fn fake_get_error() -> GLenum {
    ERROR_QUERIES.fetch_add(1, Ordering::SeqCst);
    // Reading the error clears it, like the real thing.
    PENDING_ERROR.swap(GL_NO_ERROR, Ordering::SeqCst)
}

unsafe extern "system" fn fake_get_string(name: GLenum) -> *const GLubyte {
    let value: &'static [u8] = match name {
        GL_VENDOR => b"gloss test suite\0",
        GL_RENDERER => b"null renderer\0",
        GL_VERSION => b"OpenGL ES 2.0\0",
        GL_SHADING_LANGUAGE_VERSION => b"OpenGL ES GLSL ES 1.00\0",
        GL_EXTENSIONS => b"GL_KHR_debug GL_OES_vertex_array_object\0",
        _ => b"\0",
    };
    value.as_ptr()
}

unsafe extern "system" fn fake_shader_source(
    shader: GLuint,
    count: GLsizei,
    strings: *const *const GLchar,
    lengths: *const GLint,
) {
    for i in 0..count as usize {
        let bytes =
            std::slice::from_raw_parts(*strings.add(i) as *const u8, *lengths.add(i) as usize);
        SHADER_SOURCES
            .lock()
            .unwrap()
            .push((shader, String::from_utf8_lossy(bytes).into_owned()));
    }
}

unsafe extern "system" fn fake_check_framebuffer_status(_target: GLenum) -> GLenum {
    FRAMEBUFFER_STATUS.load(Ordering::SeqCst)
}

unsafe extern "system" fn fake_get_integerv(pname: GLenum, data: *mut GLint) {
    *data = match pname {
        GL_FRAMEBUFFER_BINDING => 3,
        _ => 0,
    };
}

unsafe extern "system" fn fake_attachment_parameter(
    _target: GLenum,
    attachment: GLenum,
    pname: GLenum,
    params: *mut GLint,
) {
    *params = match (attachment, pname) {
        (GL_COLOR_ATTACHMENT0, GL_FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE) => GL_TEXTURE as GLint,
        (GL_COLOR_ATTACHMENT0, GL_FRAMEBUFFER_ATTACHMENT_OBJECT_NAME) => 7,
        (_, GL_FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE) => GL_NONE as GLint,
        _ => 0,
    };
}

unsafe extern "system" fn fake_object_label(
    identifier: GLenum,
    name: GLuint,
    length: GLsizei,
    label: *const GLchar,
) {
    let bytes = std::slice::from_raw_parts(label as *const u8, length as usize);
    LABELS.lock().unwrap().push((
        identifier,
        name,
        String::from_utf8_lossy(bytes).into_owned(),
    ));
}

unsafe extern "system" fn fake_use_program(_program: GLuint) {}

unsafe extern "system" fn fake_noop() {}

fn full_resolver(name: &str) -> *const c_void {
    match name {
        "glGetError" => fake_get_error as *const c_void,
        "glGetString" => fake_get_string as *const c_void,
        "glShaderSource" => fake_shader_source as *const c_void,
        "glCheckFramebufferStatus" => fake_check_framebuffer_status as *const c_void,
        "glGetIntegerv" => fake_get_integerv as *const c_void,
        "glGetFramebufferAttachmentParameteriv" => fake_attachment_parameter as *const c_void,
        "glObjectLabelKHR" => fake_object_label as *const c_void,
        "glUseProgram" => fake_use_program as *const c_void,
        // Entry points the tests never call only need a resolvable address.
        _ => fake_noop as *const c_void,
    }
}

#[test]
#[serial]
fn all_core_resolved_is_valid() {
    reset_fake_gl();
    let gl = ProcTable::new(full_resolver);
    assert!(gl.is_valid());
    assert!(gl.validate().is_ok());
    assert!(gl.missing_core().is_empty());

    let description = gl.description();
    assert_eq!(description.vendor(), "gloss test suite");
    assert_eq!(description.renderer(), "null renderer");
    assert_eq!(description.version(), "OpenGL ES 2.0");
    assert!(description.has_debug_extension());
    assert!(description.has_extension("GL_OES_vertex_array_object"));
    assert!(!description.has_extension("GL_EXT_multisampled_render_to_texture"));
    let summary = description.to_string();
    assert!(summary.contains("Vendor: gloss test suite"));
    assert!(summary.contains("GL_KHR_debug"));
}

#[test]
#[serial]
fn each_name_resolved_exactly_once() {
    reset_fake_gl();
    let counts = Mutex::new(HashMap::<String, usize>::new());
    let gl = ProcTable::new(|name| {
        *counts.lock().unwrap().entry(name.to_string()).or_insert(0) += 1;
        full_resolver(name)
    });
    assert!(gl.is_valid());
    let counts = counts.into_inner().unwrap();
    assert!(counts.values().all(|&count| count == 1));
    assert!(counts.contains_key("glGetError"));
    assert!(counts.contains_key("glDrawElements"));
    assert!(counts.contains_key("glObjectLabelKHR"));
}

#[test]
#[serial]
fn missing_core_entry_invalidates_table() {
    reset_fake_gl();
    let gl = ProcTable::new(|name| {
        if name == "glDrawElements" {
            std::ptr::null()
        } else {
            full_resolver(name)
        }
    });
    assert!(!gl.is_valid());
    assert_eq!(gl.missing_core(), &["glDrawElements"][..]);
    assert_eq!(gl.slot_available("glDrawElements"), Some(false));
    assert!(!gl.DrawElements.is_available());
    let message = gl.validate().unwrap_err().to_string();
    assert!(message.contains("glDrawElements"));
}

#[test]
#[serial]
fn missing_extensions_never_invalidate() {
    reset_fake_gl();
    let gl = ProcTable::new(|name| {
        if name.ends_with("KHR") {
            std::ptr::null()
        } else {
            full_resolver(name)
        }
    });
    assert!(gl.is_valid());
    assert!(!gl.ObjectLabelKHR.is_available());

    // Labeling and grouping degrade to silent no-ops.
    gl.set_debug_label(DebugResourceType::Texture, 5, "albedo");
    assert!(LABELS.lock().unwrap().is_empty());
    gl.push_debug_group("frame 0");
    gl.pop_debug_group();

    // Diagnostics still work without the extension set.
    let summary = gl.describe_current_framebuffer();
    assert!(summary.contains("Framebuffer"));
}

#[test]
#[serial]
fn availability_mirrors_resolver() {
    reset_fake_gl();
    let gl = ProcTable::new(full_resolver);
    assert!(gl.DrawElements.is_available());
    assert!(gl.TexImage2D.is_available());
    assert_eq!(gl.slot_available("glViewport"), Some(true));
    assert_eq!(gl.slot_available("glNotARealEntryPoint"), None);
}

#[test]
#[serial]
fn error_check_fires_exactly_once_per_call() {
    reset_fake_gl();
    let gl = ProcTable::new(full_resolver);

    ERROR_QUERIES.store(0, Ordering::SeqCst);
    unsafe { gl.UseProgram.call(1) };
    assert_eq!(ERROR_QUERIES.load(Ordering::SeqCst), 1);

    PENDING_ERROR.store(GL_INVALID_VALUE, Ordering::SeqCst);
    ERROR_QUERIES.store(0, Ordering::SeqCst);
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| unsafe { gl.UseProgram.call(2) }));
    let message = *result.unwrap_err().downcast::<String>().unwrap();
    assert!(message.contains("GL_INVALID_VALUE"));
    assert!(message.contains("glUseProgram"));
    assert_eq!(ERROR_QUERIES.load(Ordering::SeqCst), 1);
}

#[test]
#[serial]
fn backend_error_reads_raw_state() {
    reset_fake_gl();
    let gl = ProcTable::new(full_resolver);
    PENDING_ERROR.store(GL_OUT_OF_MEMORY, Ordering::SeqCst);
    assert_eq!(gl.backend_error(), Some(GL_OUT_OF_MEMORY));
    assert_eq!(gl.backend_error(), Some(GL_NO_ERROR));
}

#[test]
#[serial]
fn shader_source_mapping_delivers_bytes() {
    reset_fake_gl();
    let gl = ProcTable::new(full_resolver);
    gl.shader_source_mapping(9, b"void main() {}");
    let sources = SHADER_SOURCES.lock().unwrap();
    assert_eq!(sources.as_slice(), &[(9, "void main() {}".to_string())][..]);
}

#[test]
#[serial]
fn describe_current_framebuffer_reports_attachments() {
    reset_fake_gl();
    let gl = ProcTable::new(full_resolver);

    let summary = gl.describe_current_framebuffer();
    assert!(summary.contains("Framebuffer 3: GL_FRAMEBUFFER_COMPLETE"));
    assert!(summary.contains("Color Attachment 0: texture 7"));
    assert!(summary.contains("Depth Attachment: none"));
    assert!(summary.contains("Stencil Attachment: none"));
    assert!(gl.is_current_framebuffer_complete());

    FRAMEBUFFER_STATUS.store(GL_FRAMEBUFFER_UNSUPPORTED, Ordering::SeqCst);
    assert!(!gl.is_current_framebuffer_complete());
    assert!(gl
        .describe_current_framebuffer()
        .contains("GL_FRAMEBUFFER_UNSUPPORTED"));
}

#[test]
#[serial]
fn debug_labels_use_extension_identifiers() {
    reset_fake_gl();
    let gl = ProcTable::new(full_resolver);
    gl.set_debug_label(DebugResourceType::Texture, 5, "albedo");
    gl.set_debug_label(DebugResourceType::Program, 2, "blit");
    let labels = LABELS.lock().unwrap();
    assert_eq!(
        labels.as_slice(),
        &[
            (GL_TEXTURE, 5, "albedo".to_string()),
            (GL_PROGRAM_KHR, 2, "blit".to_string()),
        ][..]
    );
}

#[test]
#[serial]
fn demoted_core_entry_keeps_table_valid() {
    reset_fake_gl();
    let resolver = |name: &str| {
        if name == "glShaderBinary" {
            std::ptr::null()
        } else {
            full_resolver(name)
        }
    };

    let strict = ProcTable::new(resolver);
    assert!(!strict.is_valid());

    let info = ProcTableInfo {
        demoted: &["glShaderBinary"],
    };
    let lenient = ProcTable::new_with_info(&info, resolver);
    assert!(lenient.is_valid());
    assert!(lenient.missing_core().is_empty());
    assert_eq!(lenient.slot_available("glShaderBinary"), Some(false));
}
