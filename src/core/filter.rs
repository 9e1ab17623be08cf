//! Filter-sets applied to resolved collections before pagination

use std::collections::HashSet;

use crate::core::Entity;

/// A filter-set narrows (and may reorder) a resolved collection
pub trait FilterSet<T>: Send + Sync {
    fn apply(&self, items: Vec<T>) -> Vec<T>;
}

/// Drops entities whose primary key was already seen, keeping the first
/// occurrence in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistinctFilterSet;

impl<T: Entity> FilterSet<T> for DistinctFilterSet {
    fn apply(&self, items: Vec<T>) -> Vec<T> {
        let mut seen = HashSet::with_capacity(items.len());
        items
            .into_iter()
            .filter(|item| seen.insert(item.pk()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    #[derive(Clone, Debug)]
    struct Row {
        pk: i64,
        label: &'static str,
        at: DateTime<Utc>,
    }

    impl Entity for Row {
        fn resource_name() -> &'static str {
            "rows"
        }
        fn pk(&self) -> i64 {
            self.pk
        }
        fn assign_pk(&mut self, pk: i64) {
            self.pk = pk;
        }
        fn created_at(&self) -> DateTime<Utc> {
            self.at
        }
        fn updated_at(&self) -> DateTime<Utc> {
            self.at
        }
        fn touch(&mut self) {}
    }

    fn row(pk: i64, label: &'static str) -> Row {
        Row {
            pk,
            label,
            at: Utc::now(),
        }
    }

    #[test]
    fn test_distinct_keeps_first_occurrence() {
        let rows = vec![row(2, "a"), row(1, "b"), row(2, "c"), row(3, "d"), row(1, "e")];

        let labels: Vec<_> = DistinctFilterSet
            .apply(rows)
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, vec!["a", "b", "d"]);
    }

    #[test]
    fn test_distinct_empty() {
        assert!(FilterSet::<Row>::apply(&DistinctFilterSet, Vec::new()).is_empty());
    }
}
