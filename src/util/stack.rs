/// Minimum stack space left before a recursive step grows the stack.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first moving onto a fresh stack segment if the current one is
/// close to exhausted.
///
/// The evaluator recurses once per nested expression, statement and call, so
/// every recursive entry point goes through here. Script recursion is then
/// bounded by the call depth limit rather than by the host thread's stack.
///
/// # Example
/// ```
/// use tessera::util::stack::ensure_sufficient_stack;
///
/// fn depth(n: u32) -> u32 {
///     ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
/// }
///
/// assert_eq!(depth(50_000), 50_000);
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// `wasm32` manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
