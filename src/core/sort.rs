//! Sorting and filtering support for collection queries

use std::cmp::Ordering;

/// Sort direction of a collection query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// A validated sort expression
///
/// Parsed from the `sort` query parameter, written `field_direction`
/// (e.g. `id_asc`, `name_desc`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: &'static str,
    pub direction: Direction,
}

impl SortSpec {
    /// The sort applied when none (or an invalid one) is requested
    pub fn by_id() -> Self {
        Self {
            field: "id",
            direction: Direction::Asc,
        }
    }

    /// Parse a sort expression for `T`
    ///
    /// Unknown fields or directions fall back to `id_asc`.
    pub fn parse<T: Sortable>(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::by_id();
        };

        let parsed = raw.rsplit_once('_').and_then(|(field, direction)| {
            let field = T::SORT_FIELDS
                .iter()
                .find(|known| known.eq_ignore_ascii_case(field))
                .copied()?;
            let direction = match direction.to_ascii_lowercase().as_str() {
                "asc" => Direction::Asc,
                "desc" => Direction::Desc,
                _ => return None,
            };
            Some(Self { field, direction })
        });

        parsed.unwrap_or_else(|| {
            tracing::debug!(sort = raw, "unrecognized sort expression, using id_asc");
            Self::by_id()
        })
    }

    /// Sort entities in place; ties are broken by ascending id
    pub fn apply<T: Sortable>(&self, data: &mut [T]) {
        data.sort_by(|a, b| {
            let ordering = a.compare_by(self.field, b);
            let ordering = match self.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            };
            ordering.then_with(|| a.sort_id().cmp(&b.sort_id()))
        });
    }
}

/// Trait for entities that support sorting by named fields
pub trait Sortable {
    /// Field names accepted in sort expressions (wire names)
    const SORT_FIELDS: &'static [&'static str];

    /// Compare two entities by one of [`Self::SORT_FIELDS`]
    fn compare_by(&self, field: &str, other: &Self) -> Ordering;

    /// Id used as the final tie-break
    fn sort_id(&self) -> i64;
}

/// Trait for filters that select a subset of a collection
pub trait Filter<T> {
    /// Whether the entity passes every criterion of the filter
    fn matches(&self, entity: &T) -> bool;
}

/// Case-insensitive substring match; an absent or empty needle matches everything
pub fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle.map(str::trim).filter(|n| !n.is_empty()) {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        id: i64,
        name: &'static str,
    }

    impl Sortable for Row {
        const SORT_FIELDS: &'static [&'static str] = &["id", "name"];

        fn compare_by(&self, field: &str, other: &Self) -> Ordering {
            match field {
                "name" => self.name.cmp(other.name),
                _ => self.id.cmp(&other.id),
            }
        }

        fn sort_id(&self) -> i64 {
            self.id
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 2, name: "b" },
            Row { id: 1, name: "c" },
            Row { id: 3, name: "b" },
        ]
    }

    #[test]
    fn test_parse_known_expression() {
        let spec = SortSpec::parse::<Row>(Some("name_desc"));
        assert_eq!(spec.field, "name");
        assert_eq!(spec.direction, Direction::Desc);
    }

    #[test]
    fn test_parse_falls_back_to_id_asc() {
        assert_eq!(SortSpec::parse::<Row>(None), SortSpec::by_id());
        assert_eq!(SortSpec::parse::<Row>(Some("")), SortSpec::by_id());
        assert_eq!(SortSpec::parse::<Row>(Some("colour_asc")), SortSpec::by_id());
        assert_eq!(SortSpec::parse::<Row>(Some("name_sideways")), SortSpec::by_id());
        assert_eq!(SortSpec::parse::<Row>(Some("name")), SortSpec::by_id());
    }

    #[test]
    fn test_apply_breaks_ties_by_id() {
        let mut data = rows();
        SortSpec::parse::<Row>(Some("name_asc")).apply(&mut data);
        let ids: Vec<i64> = data.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_apply_descending() {
        let mut data = rows();
        SortSpec::parse::<Row>(Some("id_desc")).apply(&mut data);
        let ids: Vec<i64> = data.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Hochschule München", Some("münchen")));
        assert!(contains_ignore_case("Anything", None));
        assert!(contains_ignore_case("Anything", Some("  ")));
        assert!(!contains_ignore_case("Berlin", Some("paris")));
    }
}
