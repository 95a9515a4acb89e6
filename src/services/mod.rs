//! Resource services
//!
//! One service per resource. They combine the id allocators, the
//! repositories and the [`LinkingService`](crate::links::LinkingService) into
//! the operations the HTTP handlers expose.

pub mod study_module;
pub mod university;

pub use study_module::StudyModuleService;
pub use university::UniversityService;

use crate::core::error::{ApiResult, ValidationError};
use crate::core::{Filter, Page, PageRequest, SortSpec, Sortable};

/// Filter, sort and cut one page out of a full listing
pub(crate) fn select_page<T, F>(
    items: Vec<T>,
    filter: &F,
    page: i64,
    sort: Option<&str>,
    page_size: usize,
) -> Page<T>
where
    T: Sortable,
    F: Filter<T>,
{
    let mut selected: Vec<T> = items.into_iter().filter(|e| filter.matches(e)).collect();
    SortSpec::parse::<T>(sort).apply(&mut selected);
    Page::from_sorted(selected, PageRequest::new(page, page_size))
}

/// Check the ids of an upsert: positive, and matching the body when it has one
pub(crate) fn check_upsert_id(path_id: i64, body_id: Option<i64>) -> ApiResult<()> {
    if path_id < 1 {
        return Err(ValidationError::FieldError {
            field: "id".to_string(),
            message: format!("must be a positive integer, got {}", path_id),
        }
        .into());
    }
    match body_id {
        Some(body_id) if body_id != path_id => {
            Err(ValidationError::IdMismatch { path_id, body_id }.into())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ApiError;

    #[test]
    fn test_check_upsert_id() {
        assert!(check_upsert_id(3, None).is_ok());
        assert!(check_upsert_id(3, Some(3)).is_ok());
        assert!(matches!(
            check_upsert_id(3, Some(4)),
            Err(ApiError::Validation(ValidationError::IdMismatch {
                path_id: 3,
                body_id: 4
            }))
        ));
        assert!(matches!(
            check_upsert_id(0, None),
            Err(ApiError::Validation(ValidationError::FieldError { .. }))
        ));
    }
}
