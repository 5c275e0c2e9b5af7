//! Stack growth for deep recursion.
//!
//! Both the Pratt parser and the tree-walking evaluator recurse once per
//! nesting level of the program (parenthesized expressions, path chains,
//! nested arrow bodies). Hostile or generated programs can nest deeply enough
//! to exhaust a thread's default stack, so every recursive entry point is
//! wrapped in [`ensure_sufficient_stack`].
//!
//! - **Native targets**: `stacker` allocates a new stack segment on demand.
//! - **WASM targets**: passthrough.

/// Grow when less than this much stack remains (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
///
/// ```text
/// fn eval_expr(&mut self, id: ExprId) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_expr_inner(id))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
