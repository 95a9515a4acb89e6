//! Linking service: the association between study modules and universities
//!
//! A study module is either unlinked or linked to exactly one university.
//! Both sides of the association are stored: `StudyModule::university_id` and
//! `University::module_ids`. This service is the only writer of either side,
//! and every repository mutation in the application runs under its write
//! guard so no half-written link is ever observable.

use crate::core::error::{ApiResult, LinkAccess, LinkError, ResourceError};
use crate::core::{Created, Entity, IdAllocator, Repository};
use crate::entities::{StudyModule, StudyModulePayload, University};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Guard held for the duration of one write operation
pub type WriteGuard<'a> = MutexGuard<'a, ()>;

pub struct LinkingService {
    universities: Arc<dyn Repository<University>>,
    modules: Arc<dyn Repository<StudyModule>>,
    university_ids: Arc<IdAllocator>,
    module_ids: Arc<IdAllocator>,
    writes: Mutex<()>,
}

impl LinkingService {
    pub fn new(
        universities: Arc<dyn Repository<University>>,
        modules: Arc<dyn Repository<StudyModule>>,
        university_ids: Arc<IdAllocator>,
        module_ids: Arc<IdAllocator>,
    ) -> Self {
        Self {
            universities,
            modules,
            university_ids,
            module_ids,
            writes: Mutex::new(()),
        }
    }

    /// Serialize a write against every other write
    pub async fn write_guard(&self) -> WriteGuard<'_> {
        self.writes.lock().await
    }

    async fn load_university(&self, id: i64) -> ApiResult<University> {
        self.universities
            .find_by_id(id)
            .await?
            .ok_or_else(|| ResourceError::UniversityNotFound { id }.into())
    }

    async fn load_module(&self, id: i64) -> ApiResult<StudyModule> {
        self.modules
            .find_by_id(id)
            .await?
            .ok_or_else(|| ResourceError::StudyModuleNotFound { id }.into())
    }

    /// Link a module to a university
    ///
    /// Linking a module to the university it already belongs to is a no-op.
    pub async fn link(&self, module_id: i64, university_id: i64) -> ApiResult<()> {
        let _guard = self.write_guard().await;

        let module = self.load_module(module_id).await?;
        let mut university = self.load_university(university_id).await?;

        match module.university_id {
            Some(linked_to) if linked_to == university_id => {
                tracing::debug!(module_id, university_id, "module already linked");
                return Ok(());
            }
            Some(linked_to) => {
                return Err(LinkError::ModuleAlreadyLinkedElsewhere {
                    module_id,
                    linked_to,
                    requested: university_id,
                }
                .into());
            }
            None => {}
        }

        let mut linked = module.clone();
        linked.university_id = Some(university_id);
        self.modules.save(linked).await?;

        university.module_ids.insert(module_id);
        if let Err(e) = self.universities.save(university).await {
            restore(&*self.modules, module, "link").await;
            return Err(e.into());
        }

        tracing::info!(module_id, university_id, "linked study module");
        Ok(())
    }

    /// Remove the link between a module and the university it belongs to
    pub async fn unlink(&self, module_id: i64, university_id: i64) -> ApiResult<()> {
        let _guard = self.write_guard().await;

        let module = self.load_module(module_id).await?;
        let mut university = self.load_university(university_id).await?;

        if !module.is_linked_to(university_id) {
            return Err(LinkError::ModuleNotLinkedToThisUniversity {
                module_id,
                university_id,
                access: LinkAccess::Unlink,
            }
            .into());
        }

        let mut unlinked = module.clone();
        unlinked.university_id = None;
        self.modules.save(unlinked).await?;

        university.module_ids.remove(&module_id);
        if let Err(e) = self.universities.save(university).await {
            restore(&*self.modules, module, "unlink").await;
            return Err(e.into());
        }

        tracing::info!(module_id, university_id, "unlinked study module");
        Ok(())
    }

    /// Create a module that starts out linked to a university
    pub async fn create_linked_module(
        &self,
        university_id: i64,
        payload: StudyModulePayload,
    ) -> ApiResult<Created<StudyModule>> {
        let _guard = self.write_guard().await;

        let mut university = self.load_university(university_id).await?;

        let id = self.module_ids.next_id();
        let mut module = StudyModule::from_payload(id, payload);
        module.university_id = Some(university_id);

        if let Err(e) = self.modules.save(module.clone()).await {
            self.module_ids.mark_id_available(id);
            return Err(e.into());
        }

        university.module_ids.insert(id);
        if let Err(e) = self.universities.save(university).await {
            if let Err(undo) = self.modules.delete_by_id(id).await {
                tracing::error!(module_id = id, error = %undo, "failed to roll back module creation");
            } else {
                self.module_ids.mark_id_available(id);
            }
            return Err(e.into());
        }

        tracing::info!(module_id = id, university_id, "created linked study module");
        Ok(Created {
            location: StudyModule::item_path(id),
            entity: module,
        })
    }

    /// Delete a university together with every module linked to it
    ///
    /// Ids are only returned to the pool once every record is gone. A failed
    /// module delete puts the university and the modules deleted so far back.
    pub async fn delete_university(&self, id: i64) -> ApiResult<()> {
        let _guard = self.write_guard().await;

        let university = self.load_university(id).await?;
        let linked = self.linked_modules(std::slice::from_ref(&university)).await?;

        self.universities.delete_by_id(id).await?;

        if let Err(e) = self.delete_modules(&linked).await {
            restore(&*self.universities, university, "delete university").await;
            return Err(e);
        }

        for module in &linked {
            self.module_ids.mark_id_available(module.id);
        }
        self.university_ids.mark_id_available(id);

        tracing::info!(university_id = id, modules = linked.len(), "deleted university");
        Ok(())
    }

    /// Delete a module, detaching it from its university first
    pub async fn delete_module(&self, id: i64) -> ApiResult<()> {
        let _guard = self.write_guard().await;

        let module = self.load_module(id).await?;

        let owner = match module.university_id {
            Some(university_id) => self.universities.find_by_id(university_id).await?,
            None => None,
        };

        if let Some(university) = &owner {
            let mut detached = university.clone();
            detached.module_ids.remove(&id);
            self.universities.save(detached).await?;
        }

        if let Err(e) = self.modules.delete_by_id(id).await {
            if let Some(university) = owner {
                restore(&*self.universities, university, "delete module").await;
            }
            return Err(e.into());
        }
        self.module_ids.mark_id_available(id);

        tracing::info!(module_id = id, "deleted study module");
        Ok(())
    }

    /// Delete every university and, with them, every linked module
    pub async fn delete_all_universities(&self) -> ApiResult<()> {
        let _guard = self.write_guard().await;

        let universities = self.universities.find_all().await?;
        let linked = self.linked_modules(&universities).await?;

        self.universities.delete_all().await?;

        if let Err(e) = self.delete_modules(&linked).await {
            for university in universities {
                restore(&*self.universities, university, "delete all universities").await;
            }
            return Err(e);
        }

        for module in &linked {
            self.module_ids.mark_id_available(module.id);
        }
        self.university_ids.reset();

        tracing::info!(
            count = universities.len(),
            modules = linked.len(),
            "deleted all universities"
        );
        Ok(())
    }

    /// Delete every module and clear every university's module set
    pub async fn delete_all_modules(&self) -> ApiResult<()> {
        let _guard = self.write_guard().await;

        let owners: Vec<University> = self
            .universities
            .find_all()
            .await?
            .into_iter()
            .filter(|university| !university.module_ids.is_empty())
            .collect();

        for (cleared, university) in owners.iter().enumerate() {
            let mut detached = university.clone();
            detached.module_ids.clear();
            if let Err(e) = self.universities.save(detached).await {
                for original in &owners[..cleared] {
                    restore(&*self.universities, original.clone(), "delete all modules").await;
                }
                return Err(e.into());
            }
        }

        if let Err(e) = self.modules.delete_all().await {
            for original in owners {
                restore(&*self.universities, original, "delete all modules").await;
            }
            return Err(e.into());
        }
        self.module_ids.reset();

        tracing::info!("deleted all study modules");
        Ok(())
    }

    // Modules linked to any of `universities`, as stored on the module side.
    async fn linked_modules(&self, universities: &[University]) -> ApiResult<Vec<StudyModule>> {
        let mut linked = Vec::new();
        for university in universities {
            let ids: Vec<i64> = university.module_ids.iter().copied().collect();
            linked.extend(
                self.modules
                    .find_all_by_id(&ids)
                    .await?
                    .into_iter()
                    .filter(|module| module.is_linked_to(university.id)),
            );
        }
        Ok(linked)
    }

    // Caller holds the write guard. On failure the modules deleted so far are
    // saved again and no id is freed.
    async fn delete_modules(&self, modules: &[StudyModule]) -> ApiResult<()> {
        for (deleted, module) in modules.iter().enumerate() {
            if let Err(e) = self.modules.delete_by_id(module.id).await {
                for original in &modules[..deleted] {
                    restore(&*self.modules, original.clone(), "cascade delete").await;
                }
                return Err(e.into());
            }
        }
        Ok(())
    }
}

/// Put back the record a failed paired write already overwrote
async fn restore<T: Entity>(repository: &dyn Repository<T>, original: T, operation: &str) {
    let id = original.id();
    match repository.save(original).await {
        Ok(_) => tracing::warn!(
            operation,
            resource = T::resource_name_singular(),
            id,
            "second write failed, first write rolled back"
        ),
        Err(e) => tracing::error!(
            operation,
            resource = T::resource_name_singular(),
            id,
            error = %e,
            "rollback failed"
        ),
    }
}
