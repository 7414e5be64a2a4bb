//! Request counting from pagination metadata.

use thiserror::Error;

use crate::plan::PageNumber;

/// Errors raised while deriving the number of pages to request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountError {
    /// Per-page element count was zero.
    #[error("cannot count pages for {total_elements} elements with 0 elements per page")]
    DivisionByZero {
        /// Total elements reported by the listing.
        total_elements: u32,
    },
}

/// Returns how many pages are needed to cover `total_elements` at
/// `per_page` elements each (ceiling division).
///
/// # Errors
///
/// Returns [`CountError::DivisionByZero`] if `per_page` is zero.
pub fn required_pages(total_elements: u32, per_page: u32) -> Result<PageNumber, CountError> {
    if per_page == 0 {
        return Err(CountError::DivisionByZero { total_elements });
    }
    Ok(total_elements.div_ceil(per_page))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_required_pages_rounds_up() {
        assert_eq!(required_pages(100, 30).unwrap(), 4);
    }

    #[test]
    fn test_required_pages_exact_multiple() {
        assert_eq!(required_pages(90, 30).unwrap(), 3);
    }

    #[test]
    fn test_required_pages_zero_elements() {
        assert_eq!(required_pages(0, 25).unwrap(), 0);
    }

    #[test]
    fn test_required_pages_fewer_than_one_page() {
        assert_eq!(required_pages(7, 25).unwrap(), 1);
    }

    #[test]
    fn test_required_pages_matches_ceiling_for_small_inputs() {
        for total in 0..200u32 {
            for per_page in 1..40u32 {
                let expected = (f64::from(total) / f64::from(per_page)).ceil();
                assert_eq!(
                    f64::from(required_pages(total, per_page).unwrap()),
                    expected,
                    "total={total} per_page={per_page}"
                );
            }
        }
    }

    #[test]
    fn test_required_pages_zero_per_page_is_an_error() {
        for total in [0, 1, 100, u32::MAX] {
            assert_eq!(
                required_pages(total, 0),
                Err(CountError::DivisionByZero {
                    total_elements: total
                })
            );
        }
    }

    #[test]
    fn test_required_pages_large_total_does_not_overflow() {
        assert_eq!(required_pages(u32::MAX, 1).unwrap(), u32::MAX);
        assert_eq!(required_pages(u32::MAX, 2).unwrap(), u32::MAX / 2 + 1);
    }
}
