//! Pagination utilities shared by the song list and the verse endpoint
//!
//! Query parameters are parsed into a [`PageRequest`] at the HTTP boundary;
//! [`paginate`] then bounds the request against a concrete sequence length.

use thiserror::Error;

/// Page size used when the caller does not supply `limit`
pub const DEFAULT_LIMIT: usize = 10;

/// Offset used when the caller does not supply `offset`
pub const DEFAULT_OFFSET: usize = 0;

/// Pagination errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Invalid limit value: {0}")]
    InvalidLimit(String),

    #[error("Invalid offset value: {0}")]
    InvalidOffset(String),

    #[error("Offset {offset} is out of range for {total} items")]
    OffsetOutOfRange { offset: usize, total: usize },
}

/// Validated limit/offset pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl PageRequest {
    /// Parse raw query values
    ///
    /// Absent or empty values fall back to the defaults. Non-numeric or
    /// negative values are rejected.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Result<Self, PageError> {
        let limit = match non_empty(limit) {
            Some(raw) => parse_non_negative(raw)
                .ok_or_else(|| PageError::InvalidLimit(raw.to_string()))?,
            None => DEFAULT_LIMIT,
        };
        let offset = match non_empty(offset) {
            Some(raw) => parse_non_negative(raw)
                .ok_or_else(|| PageError::InvalidOffset(raw.to_string()))?,
            None => DEFAULT_OFFSET,
        };

        Ok(Self { limit, offset })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_non_negative(raw: &str) -> Option<usize> {
    raw.parse::<i64>()
        .ok()
        .filter(|v| *v >= 0)
        .and_then(|v| usize::try_from(v).ok())
}

/// Bounds of one page within a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// First index included in the page
    pub start: usize,
    /// One past the last index included in the page
    pub end: usize,
    /// Whether items remain after `end`
    pub has_more: bool,
}

impl PageWindow {
    /// Borrow the page out of a slice of the length this window was computed for
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.start..self.end]
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Bound `offset`/`limit` against a sequence of `total` items
///
/// `offset` must be below `total`. An empty sequence accepts offset 0 and
/// yields an empty page; any larger offset fails.
///
/// # Examples
/// ```
/// use musiclib_api::pagination::paginate;
///
/// let w = paginate(5, 3, 10).unwrap();
/// assert_eq!((w.start, w.end, w.has_more), (3, 5, false));
///
/// let w = paginate(5, 0, 2).unwrap();
/// assert_eq!((w.start, w.end, w.has_more), (0, 2, true));
///
/// assert!(paginate(5, 5, 1).is_err());
/// ```
pub fn paginate(total: usize, offset: usize, limit: usize) -> Result<PageWindow, PageError> {
    if total == 0 {
        if offset == 0 {
            return Ok(PageWindow {
                start: 0,
                end: 0,
                has_more: false,
            });
        }
        return Err(PageError::OffsetOutOfRange { offset, total });
    }

    if offset >= total {
        return Err(PageError::OffsetOutOfRange { offset, total });
    }

    let end = offset.saturating_add(limit).min(total);

    Ok(PageWindow {
        start: offset,
        end,
        has_more: end < total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_tail_page() {
        let w = paginate(5, 3, 10).unwrap();
        assert_eq!(w.start, 3);
        assert_eq!(w.end, 5);
        assert!(!w.has_more);
    }

    #[test]
    fn test_paginate_first_page_has_more() {
        let w = paginate(25, 0, 10).unwrap();
        assert_eq!((w.start, w.end), (0, 10));
        assert!(w.has_more);
    }

    #[test]
    fn test_paginate_exact_boundary() {
        let w = paginate(20, 10, 10).unwrap();
        assert_eq!((w.start, w.end), (10, 20));
        assert!(!w.has_more);
    }

    #[test]
    fn test_paginate_zero_limit() {
        let w = paginate(4, 1, 0).unwrap();
        assert!(w.is_empty());
        assert!(w.has_more);
    }

    #[test]
    fn test_paginate_offset_out_of_range() {
        assert_eq!(
            paginate(3, 3, 10),
            Err(PageError::OffsetOutOfRange { offset: 3, total: 3 })
        );
        assert!(paginate(3, 100, 1).is_err());
    }

    #[test]
    fn test_paginate_empty_sequence() {
        let w = paginate(0, 0, 10).unwrap();
        assert!(w.is_empty());
        assert!(!w.has_more);

        assert_eq!(
            paginate(0, 1, 10),
            Err(PageError::OffsetOutOfRange { offset: 1, total: 0 })
        );
    }

    #[test]
    fn test_paginate_huge_limit_does_not_overflow() {
        let w = paginate(7, 2, usize::MAX).unwrap();
        assert_eq!((w.start, w.end), (2, 7));
    }

    #[test]
    fn test_paginate_length_property() {
        for total in 0..12usize {
            for limit in 0..15usize {
                let offsets: Vec<usize> = if total == 0 {
                    vec![0]
                } else {
                    (0..total).collect()
                };
                for offset in offsets {
                    let w = paginate(total, offset, limit).unwrap();
                    assert_eq!(w.len(), limit.min(total - offset));
                    assert_eq!(w.has_more, w.end < total);
                }
            }
        }
    }

    #[test]
    fn test_window_slice() {
        let items = ["a", "b", "c", "d"];
        let w = paginate(items.len(), 1, 2).unwrap();
        assert_eq!(w.slice(&items), &["b", "c"]);
    }

    #[test]
    fn test_page_request_defaults() {
        assert_eq!(PageRequest::parse(None, None).unwrap(), PageRequest::default());
        assert_eq!(PageRequest::parse(Some(""), Some("")).unwrap(), PageRequest::default());
    }

    #[test]
    fn test_page_request_parse_values() {
        let p = PageRequest::parse(Some("25"), Some("50")).unwrap();
        assert_eq!(p.limit, 25);
        assert_eq!(p.offset, 50);

        let p = PageRequest::parse(Some("0"), None).unwrap();
        assert_eq!(p.limit, 0);
    }

    #[test]
    fn test_page_request_rejects_bad_values() {
        assert_eq!(
            PageRequest::parse(Some("-1"), None),
            Err(PageError::InvalidLimit("-1".to_string()))
        );
        assert_eq!(
            PageRequest::parse(None, Some("ten")),
            Err(PageError::InvalidOffset("ten".to_string()))
        );
        assert!(PageRequest::parse(Some("1.5"), None).is_err());
    }
}
