use super::error::gl_error_to_string;
use super::types::{GlGetErrorProc, GL_NO_ERROR};
use std::os::raw::c_void;

/// Scoped error check armed around a single GL call.
///
/// Dropped on every exit path of the wrapped call, so the backend error
/// state is queried exactly once per invocation and cannot be skipped.
pub(crate) struct AutoErrorCheck {
    error_fn: Option<GlGetErrorProc>,
    name: &'static str,
}

impl AutoErrorCheck {
    pub(crate) fn new(error_fn: Option<GlGetErrorProc>, name: &'static str) -> Self {
        Self { error_fn, name }
    }
}

impl Drop for AutoErrorCheck {
    fn drop(&mut self) {
        if let Some(error_fn) = self.error_fn {
            let error = unsafe { error_fn() };
            if error != GL_NO_ERROR {
                panic!(
                    "GL Error {} ({:#x}) encountered on call to {}",
                    gl_error_to_string(error),
                    error,
                    self.name
                );
            }
        }
    }
}

/// A named slot binding one GL entry point to its statically-typed
/// function pointer, with an optional error hook armed around every call.
///
/// Slots are written once during table construction and only read after
/// that. The bound signature is part of the slot's type, so an argument
/// mismatch is a compile error rather than a runtime one.
pub struct GlProc<F: Copy> {
    name: &'static str,
    function: Option<F>,
    error_fn: Option<GlGetErrorProc>,
}

impl<F: Copy> GlProc<F> {
    pub const fn unresolved(name: &'static str) -> Self {
        Self {
            name,
            function: None,
            error_fn: None,
        }
    }

    /// The entry point name used for dynamic lookup, e.g. `"glDrawElements"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Bind the resolved address and error hook. Intended to be called
    /// exactly once, from the table's resolution loop. A null address
    /// leaves the slot unresolved.
    ///
    /// # Safety
    /// `address` must be null or point to a function with exactly the
    /// signature `F`.
    pub unsafe fn resolve(&mut self, address: *const c_void, error_fn: Option<GlGetErrorProc>) {
        assert_eq!(
            std::mem::size_of::<F>(),
            std::mem::size_of::<*const c_void>()
        );
        if !address.is_null() {
            self.function = Some(std::mem::transmute_copy::<*const c_void, F>(&address));
        }
        self.error_fn = error_fn;
    }

    /// Whether the entry point resolved. Extension slots must be gated on
    /// this before calling; core slots hold after successful table
    /// construction.
    pub fn is_available(&self) -> bool {
        self.function.is_some()
    }

    /// Clear the binding. Teardown only.
    pub fn reset(&mut self) {
        self.function = None;
        self.error_fn = None;
    }
}

macro_rules! impl_gl_proc_call {
    ($($A:ident),*) => {
        impl<Ret $(, $A)*> GlProc<unsafe extern "system" fn($($A),*) -> Ret> {
            /// Call the bound entry point. Argument and return types must
            /// match the registered signature. Panics if the slot never
            /// resolved; gate on [`GlProc::is_available`] for extension
            /// entries.
            ///
            /// # Safety
            /// The caller must uphold the GL contract for this entry point
            /// on the thread owning the current context.
            #[allow(non_snake_case)]
            pub unsafe fn call(&self $(, $A: $A)*) -> Ret {
                let function = match self.function {
                    Some(function) => function,
                    None => panic!("GL entry point {} invoked before it was resolved", self.name),
                };
                let _check = AutoErrorCheck::new(self.error_fn, self.name);
                function($($A),*)
            }
        }
    };
}

impl_gl_proc_call!();
impl_gl_proc_call!(A);
impl_gl_proc_call!(A, B);
impl_gl_proc_call!(A, B, C);
impl_gl_proc_call!(A, B, C, D);
impl_gl_proc_call!(A, B, C, D, E);
impl_gl_proc_call!(A, B, C, D, E, G);
impl_gl_proc_call!(A, B, C, D, E, G, H);
impl_gl_proc_call!(A, B, C, D, E, G, H, I);
// TexImage2D is the widest entry in the registry.
impl_gl_proc_call!(A, B, C, D, E, G, H, I, J);
