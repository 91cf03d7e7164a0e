//! Stack safety for recursive descent.
//!
//! The grammar parser, the code generator and every generated rule recurse
//! once per nesting level of their input. A grammar like `((((...))))` or a
//! source text with thousands of nested parentheses would exhaust the native
//! stack long before any other limit is reached, so each recursive entry
//! point wraps its body in [`ensure_sufficient_stack`].
//!
//! On native targets the `stacker` crate grows the stack on demand; on WASM
//! the guard is a plain call.

/// Remaining stack below which a new segment is allocated (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn syntax(&mut self) -> Result<Value> {
///     ensure_sufficient_stack(|| {
///         let first = self.sequence()?;
///         // ... may recurse into syntax() again ...
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
