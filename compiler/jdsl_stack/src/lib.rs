//! Stack growth for the recursive paths of jdsl.
//!
//! Decoding nested arrays, evaluating nested operators, and calling
//! closures that call closures all recurse on the native stack. Depth is
//! bounded by configuration elsewhere; this crate only makes sure the
//! native stack is large enough to reach that bound.
//!
//! On native targets the `stacker` crate allocates a fresh segment when the
//! remaining space drops under [`RED_ZONE`]. On `wasm32` the closure runs
//! directly.

/// Remaining stack below which a new segment is allocated.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
pub const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
///
/// ```text
/// fn eval(&mut self, value: &Value) -> EvalResult {
///     ensure_sufficient_stack(|| match value {
///         Value::Array(items) => self.eval_array(items),
///         ...
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Nested vectors, like a decoded `[[[...]]]`.
    enum Nest {
        Leaf,
        Wrap(Box<Nest>),
    }

    fn build(depth: usize) -> Nest {
        let mut nest = Nest::Leaf;
        for _ in 0..depth {
            nest = Nest::Wrap(Box::new(nest));
        }
        nest
    }

    fn measure(nest: &Nest) -> usize {
        ensure_sufficient_stack(|| match nest {
            Nest::Leaf => 0,
            Nest::Wrap(inner) => measure(inner) + 1,
        })
    }

    #[test]
    fn shallow_nesting() {
        assert_eq!(measure(&build(10)), 10);
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        let nest = build(200_000);
        assert_eq!(measure(&nest), 200_000);
        // iterative drop, the derived one would recurse
        let mut cur = nest;
        while let Nest::Wrap(inner) = cur {
            cur = *inner;
        }
    }

    #[test]
    fn passes_result_through() {
        let result: Result<u8, String> = ensure_sufficient_stack(|| Err("boom".to_string()));
        assert_eq!(result, Err("boom".to_string()));
    }
}
