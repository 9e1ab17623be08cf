//! Relay connection arguments and slicing
//!
//! Connections are sliced in memory over an already filtered collection.
//! Cursors are offsets into that collection, encoded as
//! `base64("arrayconnection:<offset>")`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::core::error::{DashboardResult, RequestError};

const CURSOR_PREFIX: &str = "arrayconnection:";

/// The four relay pagination arguments
#[derive(Debug, Clone, Default)]
pub struct ConnectionArgs {
    pub after: Option<String>,
    pub before: Option<String>,
    pub first: Option<i32>,
    pub last: Option<i32>,
}

/// The slice of a collection selected by [`ConnectionArgs`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Offset of the first selected item
    pub start: usize,

    /// Offset one past the last selected item
    pub end: usize,

    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl PageWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl ConnectionArgs {
    pub fn new(
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> Self {
        Self {
            after,
            before,
            first,
            last,
        }
    }

    /// Select the window of a `total`-sized collection
    ///
    /// `field` only appears in error messages. When neither `first` nor
    /// `last` is given, `first` defaults to `max_page_size`.
    pub fn window(
        &self,
        field: &str,
        total: usize,
        max_page_size: usize,
    ) -> DashboardResult<PageWindow> {
        let first = checked_limit("first", self.first, field, max_page_size)?;
        let last = checked_limit("last", self.last, field, max_page_size)?;
        let first = match (first, last) {
            (None, None) => Some(max_page_size),
            (first, _) => first,
        };

        let mut start = match &self.after {
            Some(cursor) => decode_cursor(cursor)?.saturating_add(1).min(total),
            None => 0,
        };
        let mut end = match &self.before {
            Some(cursor) => decode_cursor(cursor)?.min(total),
            None => total,
        };
        if start > end {
            start = end;
        }

        if let Some(first) = first {
            end = end.min(start.saturating_add(first));
        }
        if let Some(last) = last {
            start = start.max(end.saturating_sub(last));
        }

        Ok(PageWindow {
            start,
            end,
            has_previous_page: start > 0,
            has_next_page: end < total,
        })
    }
}

fn checked_limit(
    arg: &str,
    value: Option<i32>,
    field: &str,
    max_page_size: usize,
) -> DashboardResult<Option<usize>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let Ok(value) = usize::try_from(value) else {
        return Err(RequestError::InvalidPagination {
            message: format!("Argument `{}` must be a non-negative integer.", arg),
        }
        .into());
    };
    if value > max_page_size {
        return Err(RequestError::InvalidPagination {
            message: format!(
                "Requesting {} records on the `{}` connection exceeds the `{}` limit of {} records.",
                value, field, arg, max_page_size
            ),
        }
        .into());
    }
    Ok(Some(value))
}

/// Encode an offset as an opaque cursor
pub fn encode_cursor(offset: usize) -> String {
    STANDARD.encode(format!("{}{}", CURSOR_PREFIX, offset))
}

/// Decode a cursor produced by [`encode_cursor`]
pub fn decode_cursor(cursor: &str) -> DashboardResult<usize> {
    let invalid = || RequestError::InvalidPagination {
        message: format!("Invalid cursor: {}", cursor),
    };

    let bytes = STANDARD.decode(cursor).map_err(|_| invalid())?;
    let text = String::from_utf8(bytes).map_err(|_| invalid())?;
    let offset = text
        .strip_prefix(CURSOR_PREFIX)
        .and_then(|n| n.parse::<usize>().ok())
        .ok_or_else(invalid)?;
    Ok(offset)
}
