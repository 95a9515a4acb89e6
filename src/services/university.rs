//! University operations

use super::{check_upsert_id, select_page};
use crate::core::error::{ApiResult, ResourceError};
use crate::core::{Created, Entity, IdAllocator, Page, Repository, Upsert};
use crate::entities::{University, UniversityFilter, UniversityPayload};
use crate::links::LinkingService;
use std::sync::Arc;

pub struct UniversityService {
    repository: Arc<dyn Repository<University>>,
    ids: Arc<IdAllocator>,
    linking: Arc<LinkingService>,
    page_size: usize,
}

impl UniversityService {
    pub fn new(
        repository: Arc<dyn Repository<University>>,
        ids: Arc<IdAllocator>,
        linking: Arc<LinkingService>,
        page_size: usize,
    ) -> Self {
        Self {
            repository,
            ids,
            linking,
            page_size,
        }
    }

    /// One page of the universities matching `filter`
    pub async fn get_page(
        &self,
        filter: &UniversityFilter,
        page: i64,
        sort: Option<&str>,
    ) -> ApiResult<Page<University>> {
        let all = self.repository.find_all().await?;
        Ok(select_page(all, filter, page, sort, self.page_size))
    }

    pub async fn get(&self, id: i64) -> ApiResult<University> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ResourceError::UniversityNotFound { id }.into())
    }

    /// Create a university under a freshly allocated id
    ///
    /// An `id` in the payload is ignored.
    pub async fn create(&self, payload: UniversityPayload) -> ApiResult<Created<University>> {
        let _guard = self.linking.write_guard().await;

        let id = self.ids.next_id();
        let university = University::from_payload(id, payload);
        let saved = match self.repository.save(university).await {
            Ok(saved) => saved,
            Err(e) => {
                self.ids.mark_id_available(id);
                return Err(e.into());
            }
        };

        tracing::info!(university_id = id, "created university");
        Ok(Created {
            location: University::item_path(id),
            entity: saved,
        })
    }

    /// Replace a university, creating it under `id` if it does not exist
    ///
    /// Linked modules are kept across updates.
    pub async fn update(&self, id: i64, payload: UniversityPayload) -> ApiResult<Upsert<University>> {
        check_upsert_id(id, payload.id)?;

        let _guard = self.linking.write_guard().await;

        if let Some(mut existing) = self.repository.find_by_id(id).await? {
            existing.apply(payload);
            let saved = self.repository.save(existing).await?;
            tracing::info!(university_id = id, "updated university");
            return Ok(Upsert::Updated(saved));
        }

        self.ids.mark_id_used(id);
        let saved = match self.repository.save(University::from_payload(id, payload)).await {
            Ok(saved) => saved,
            Err(e) => {
                self.ids.mark_id_available(id);
                return Err(e.into());
            }
        };

        tracing::info!(university_id = id, "created university through update");
        Ok(Upsert::Created(Created {
            location: University::item_path(id),
            entity: saved,
        }))
    }

    /// Delete a university and every module linked to it
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.linking.delete_university(id).await
    }

    pub async fn delete_all(&self) -> ApiResult<()> {
        self.linking.delete_all_universities().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ApiError;
    use crate::core::error::ValidationError;
    use crate::entities::StudyModule;
    use crate::storage::InMemoryRepository;
    use chrono::NaiveDate;

    fn service(page_size: usize) -> UniversityService {
        let universities: Arc<dyn Repository<University>> = Arc::new(InMemoryRepository::new());
        let modules: Arc<dyn Repository<StudyModule>> = Arc::new(InMemoryRepository::new());
        let university_ids = Arc::new(IdAllocator::new());
        let linking = Arc::new(LinkingService::new(
            universities.clone(),
            modules,
            university_ids.clone(),
            Arc::new(IdAllocator::new()),
        ));
        UniversityService::new(universities, university_ids, linking, page_size)
    }

    fn payload(name: &str, country: &str) -> UniversityPayload {
        UniversityPayload {
            id: None,
            name: name.to_string(),
            country: country.to_string(),
            department: "Computer Science".to_string(),
            contact_person_name: "Jane Doe".to_string(),
            outgoing_student_number: 3,
            incoming_student_number: 4,
            spring_semester_start: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            fall_semester_start: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_allocates_ids() {
        let service = service(10);
        let first = service.create(payload("TUM", "Germany")).await.unwrap();
        let second = service.create(payload("KTH", "Sweden")).await.unwrap();

        assert_eq!(first.entity.id, 1);
        assert_eq!(first.location, "/universities/1");
        assert_eq!(second.entity.id, 2);
    }

    #[tokio::test]
    async fn test_create_ignores_payload_id() {
        let service = service(10);
        let mut body = payload("TUM", "Germany");
        body.id = Some(40);

        let created = service.create(body).await.unwrap();
        assert_eq!(created.entity.id, 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let service = service(10);
        let err = service.get(8).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Resource(ResourceError::UniversityNotFound { id: 8 })
        ));
    }

    #[tokio::test]
    async fn test_update_existing() {
        let service = service(10);
        let id = service.create(payload("TUM", "Germany")).await.unwrap().entity.id;

        let outcome = service.update(id, payload("TU Munich", "Germany")).await.unwrap();
        assert!(matches!(outcome, Upsert::Updated(ref u) if u.name == "TU Munich"));
        assert_eq!(service.get(id).await.unwrap().name, "TU Munich");
    }

    #[tokio::test]
    async fn test_update_creates_missing_and_reserves_id() {
        let service = service(10);

        let outcome = service.update(2, payload("KTH", "Sweden")).await.unwrap();
        match outcome {
            Upsert::Created(created) => assert_eq!(created.location, "/universities/2"),
            other => panic!("expected creation, got {:?}", other),
        }

        let a = service.create(payload("A", "X")).await.unwrap().entity.id;
        let b = service.create(payload("B", "Y")).await.unwrap().entity.id;
        assert_eq!((a, b), (1, 3));
    }

    #[tokio::test]
    async fn test_update_rejects_mismatched_or_invalid_ids() {
        let service = service(10);

        let mut body = payload("TUM", "Germany");
        body.id = Some(5);
        let err = service.update(4, body).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::IdMismatch { path_id: 4, body_id: 5 })
        ));

        let err = service.update(0, payload("TUM", "Germany")).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_page_filters_sorts_and_pages() {
        let service = service(2);
        service.create(payload("Uni Bonn", "Germany")).await.unwrap();
        service.create(payload("KTH", "Sweden")).await.unwrap();
        service.create(payload("Uni Augsburg", "Germany")).await.unwrap();
        service.create(payload("TUM", "germany")).await.unwrap();

        let filter = UniversityFilter {
            name: None,
            country: Some("GERMANY".to_string()),
        };

        let page = service.get_page(&filter, 0, Some("name_asc")).await.unwrap();
        let names: Vec<&str> = page.content.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["TUM", "Uni Augsburg"]);
        assert_eq!(page.total_elements, 3);
        assert!(page.has_next());

        let page = service.get_page(&filter, 1, Some("name_asc")).await.unwrap();
        let names: Vec<&str> = page.content.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Uni Bonn"]);
    }

    #[tokio::test]
    async fn test_get_page_clamps_negative_page() {
        let service = service(10);
        service.create(payload("TUM", "Germany")).await.unwrap();

        let page = service
            .get_page(&UniversityFilter::default(), -4, None)
            .await
            .unwrap();
        assert_eq!(page.number, 0);
        assert_eq!(page.content.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_frees_id() {
        let service = service(10);
        let id = service.create(payload("TUM", "Germany")).await.unwrap().entity.id;
        service.create(payload("KTH", "Sweden")).await.unwrap();

        service.delete(id).await.unwrap();
        assert!(service.get(id).await.is_err());

        let reused = service.create(payload("ETH", "Switzerland")).await.unwrap();
        assert_eq!(reused.entity.id, id);
    }

    #[tokio::test]
    async fn test_delete_all_resets_ids() {
        let service = service(10);
        service.create(payload("TUM", "Germany")).await.unwrap();
        service.create(payload("KTH", "Sweden")).await.unwrap();

        service.delete_all().await.unwrap();

        let page = service
            .get_page(&UniversityFilter::default(), 0, None)
            .await
            .unwrap();
        assert_eq!(page.total_elements, 0);
        assert_eq!(service.create(payload("ETH", "Switzerland")).await.unwrap().entity.id, 1);
    }
}
