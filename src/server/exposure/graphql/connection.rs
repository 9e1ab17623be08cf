//! Relay connections over in-memory collections

use async_graphql::connection::{Connection, Edge};
use async_graphql::{OutputType, SimpleObject};

use crate::core::ConnectionArgs;
use crate::core::error::DashboardResult;
use crate::core::query::encode_cursor;

/// Fields added to every connection
#[derive(Debug, Clone, Copy, SimpleObject)]
pub struct CountableFields {
    /// Number of items after filtering, before slicing
    pub total_count: i32,
}

pub type CountableConnection<N> = Connection<String, N, CountableFields>;

/// Slice `items` by the connection arguments and wrap each one as a node
pub fn connection_from_vec<T, N, F>(
    items: Vec<T>,
    args: &ConnectionArgs,
    field: &str,
    max_page_size: usize,
    into_node: F,
) -> DashboardResult<CountableConnection<N>>
where
    N: OutputType,
    F: Fn(T) -> N,
{
    let total = items.len();
    let window = args.window(field, total, max_page_size)?;

    let mut connection = Connection::with_additional_fields(
        window.has_previous_page,
        window.has_next_page,
        CountableFields {
            total_count: i32::try_from(total).unwrap_or(i32::MAX),
        },
    );
    connection.edges.extend(
        items
            .into_iter()
            .enumerate()
            .skip(window.start)
            .take(window.len())
            .map(|(offset, item)| Edge::new(encode_cursor(offset), into_node(item))),
    );
    Ok(connection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_slices_and_counts() {
        let args = ConnectionArgs::new(None, None, Some(2), None);
        let connection =
            connection_from_vec(vec![10, 20, 30], &args, "numbers", 100, |n: i32| n).unwrap();

        assert_eq!(connection.additional_fields.total_count, 3);
        assert!(connection.has_next_page);
        assert!(!connection.has_previous_page);
        let nodes: Vec<_> = connection.edges.iter().map(|e| e.node).collect();
        assert_eq!(nodes, vec![10, 20]);
    }

    #[test]
    fn test_connection_limit_error() {
        let args = ConnectionArgs::new(None, None, None, Some(5));
        let err = connection_from_vec(vec![1], &args, "numbers", 4, |n: i32| n).err().unwrap();
        assert_eq!(err.error_code(), "INVALID_PAGINATION");
    }
}
