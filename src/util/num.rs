use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Converts a script-level index into a position inside a sequence of
/// length `len`.
///
/// ## Errors
/// Returns `RuntimeError::IndexOutOfBounds` if the index is negative or not
/// smaller than `len`.
///
/// ## Example
/// ```
/// use tessera::{error::RuntimeError, util::num::index_to_usize};
///
/// assert_eq!(index_to_usize(2, 3, 1).unwrap(), 2);
///
/// let err = index_to_usize(-1, 3, 7).unwrap_err();
/// assert!(matches!(err, RuntimeError::IndexOutOfBounds { index: -1, len: 3, line: 7 }));
/// assert!(index_to_usize(3, 3, 1).is_err());
/// ```
pub fn index_to_usize(index: i64, len: usize, line: usize) -> EvalResult<usize> {
    match usize::try_from(index) {
        Ok(position) if position < len => Ok(position),
        _ => Err(RuntimeError::IndexOutOfBounds { index, len, line }),
    }
}

/// Converts a declared array size into an element count.
///
/// ## Errors
/// Returns `RuntimeError::NegativeArraySize` if `size` is below zero.
pub fn size_to_usize(size: i64, line: usize) -> EvalResult<usize> {
    usize::try_from(size).map_err(|_| RuntimeError::NegativeArraySize { size, line })
}

/// Converts a length into a script-level `int`.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the length does not fit in an `i64`.
pub fn usize_to_i64(value: usize, line: usize) -> EvalResult<i64> {
    i64::try_from(value).map_err(|_| RuntimeError::Overflow { line })
}
