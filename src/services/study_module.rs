//! Study module operations

use super::{check_upsert_id, select_page};
use crate::core::error::{ApiResult, LinkAccess, LinkError, ResourceError};
use crate::core::{Created, Entity, IdAllocator, Page, Repository, Upsert};
use crate::entities::{StudyModule, StudyModuleFilter, StudyModulePayload, University};
use crate::links::LinkingService;
use std::sync::Arc;

pub struct StudyModuleService {
    repository: Arc<dyn Repository<StudyModule>>,
    universities: Arc<dyn Repository<University>>,
    ids: Arc<IdAllocator>,
    linking: Arc<LinkingService>,
    page_size: usize,
}

impl StudyModuleService {
    pub fn new(
        repository: Arc<dyn Repository<StudyModule>>,
        universities: Arc<dyn Repository<University>>,
        ids: Arc<IdAllocator>,
        linking: Arc<LinkingService>,
        page_size: usize,
    ) -> Self {
        Self {
            repository,
            universities,
            ids,
            linking,
            page_size,
        }
    }

    /// One page of the modules matching `filter`
    pub async fn get_page(
        &self,
        filter: &StudyModuleFilter,
        page: i64,
        sort: Option<&str>,
    ) -> ApiResult<Page<StudyModule>> {
        let all = self.repository.find_all().await?;
        Ok(select_page(all, filter, page, sort, self.page_size))
    }

    /// One page of the modules linked to a university
    pub async fn get_page_for_university(
        &self,
        university_id: i64,
        filter: &StudyModuleFilter,
        page: i64,
        sort: Option<&str>,
    ) -> ApiResult<Page<StudyModule>> {
        let university = self.load_university(university_id).await?;
        let ids: Vec<i64> = university.module_ids.iter().copied().collect();
        let linked: Vec<StudyModule> = self
            .repository
            .find_all_by_id(&ids)
            .await?
            .into_iter()
            .filter(|module| module.is_linked_to(university_id))
            .collect();
        Ok(select_page(linked, filter, page, sort, self.page_size))
    }

    pub async fn get(&self, id: i64) -> ApiResult<StudyModule> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ResourceError::StudyModuleNotFound { id }.into())
    }

    /// A module, seen through the university it is linked to
    pub async fn get_for_university(
        &self,
        university_id: i64,
        module_id: i64,
    ) -> ApiResult<StudyModule> {
        self.load_university(university_id).await?;
        let module = self.get(module_id).await?;

        if !module.is_linked_to(university_id) {
            return Err(LinkError::ModuleNotLinkedToThisUniversity {
                module_id,
                university_id,
                access: LinkAccess::Read,
            }
            .into());
        }
        Ok(module)
    }

    /// Create an unlinked module under a freshly allocated id
    pub async fn create(&self, payload: StudyModulePayload) -> ApiResult<Created<StudyModule>> {
        let _guard = self.linking.write_guard().await;

        let id = self.ids.next_id();
        let saved = match self
            .repository
            .save(StudyModule::from_payload(id, payload))
            .await
        {
            Ok(saved) => saved,
            Err(e) => {
                self.ids.mark_id_available(id);
                return Err(e.into());
            }
        };

        tracing::info!(module_id = id, "created study module");
        Ok(Created {
            location: StudyModule::item_path(id),
            entity: saved,
        })
    }

    /// Create a module already linked to a university
    pub async fn create_for_university(
        &self,
        university_id: i64,
        payload: StudyModulePayload,
    ) -> ApiResult<Created<StudyModule>> {
        self.linking.create_linked_module(university_id, payload).await
    }

    /// Replace a module, creating it under `id` if it does not exist
    ///
    /// The link to a university is kept across updates.
    pub async fn update(
        &self,
        id: i64,
        payload: StudyModulePayload,
    ) -> ApiResult<Upsert<StudyModule>> {
        check_upsert_id(id, payload.id)?;

        let _guard = self.linking.write_guard().await;

        if let Some(mut existing) = self.repository.find_by_id(id).await? {
            existing.apply(payload);
            let saved = self.repository.save(existing).await?;
            tracing::info!(module_id = id, "updated study module");
            return Ok(Upsert::Updated(saved));
        }

        self.ids.mark_id_used(id);
        let saved = match self
            .repository
            .save(StudyModule::from_payload(id, payload))
            .await
        {
            Ok(saved) => saved,
            Err(e) => {
                self.ids.mark_id_available(id);
                return Err(e.into());
            }
        };

        tracing::info!(module_id = id, "created study module through update");
        Ok(Upsert::Created(Created {
            location: StudyModule::item_path(id),
            entity: saved,
        }))
    }

    /// Delete a module, detaching it from its university
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.linking.delete_module(id).await
    }

    pub async fn delete_all(&self) -> ApiResult<()> {
        self.linking.delete_all_modules().await
    }

    pub async fn link(&self, university_id: i64, module_id: i64) -> ApiResult<()> {
        self.linking.link(module_id, university_id).await
    }

    pub async fn unlink(&self, university_id: i64, module_id: i64) -> ApiResult<()> {
        self.linking.unlink(module_id, university_id).await
    }

    async fn load_university(&self, id: i64) -> ApiResult<University> {
        self.universities
            .find_by_id(id)
            .await?
            .ok_or_else(|| ResourceError::UniversityNotFound { id }.into())
    }
}
