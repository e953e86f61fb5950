//! Argument validation helpers.

use crate::error::{Error, Result};

/// Returns an error if `i` is not a valid index into a sequence of length
/// `len`.
///
/// # Errors
/// [`Error::InvalidArgument`] with message `msg` if `i >= len`.
#[inline]
pub fn index(i: usize, len: usize, msg: &'static str) -> Result<()> {
    if i < len {
        Ok(())
    } else {
        Err(Error::InvalidArgument(msg))
    }
}

/// Returns the value in `opt`, or an error if there is none.
///
/// # Errors
/// [`Error::NullArgument`] with message `msg` if `opt` is `None`.
#[inline]
pub fn present<T>(opt: Option<T>, msg: &'static str) -> Result<T> {
    opt.ok_or(Error::NullArgument(msg))
}

/// Returns the first item of `it`, or an error if `it` is empty.
///
/// # Errors
/// [`Error::InvalidArgument`] with message `msg` if `it` yields nothing.
pub fn non_empty<I: Iterator>(
    it: &mut I,
    msg: &'static str,
) -> Result<I::Item> {
    it.next().ok_or(Error::InvalidArgument(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_in_range() {
        assert_eq!(index(0, 1, "oops"), Ok(()));
        assert_eq!(index(2, 3, "oops"), Ok(()));
    }

    #[test]
    fn index_out_of_range() {
        assert_eq!(index(3, 3, "oops"), Err(Error::InvalidArgument("oops")));
        assert_eq!(index(0, 0, "oops"), Err(Error::InvalidArgument("oops")));
    }

    #[test]
    fn present_and_absent() {
        assert_eq!(present(Some(1), "x"), Ok(1));
        assert_eq!(present(None::<i32>, "x"), Err(Error::NullArgument("x")));
    }

    #[test]
    fn non_empty_iter() {
        assert_eq!(non_empty(&mut [1, 2].into_iter(), "e"), Ok(1));
        assert_eq!(
            non_empty(&mut core::iter::empty::<u8>(), "e"),
            Err(Error::InvalidArgument("e"))
        );
    }
}
