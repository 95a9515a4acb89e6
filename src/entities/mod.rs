//! Domain entities of the study travel API

pub mod study_module;
pub mod university;

pub use study_module::{
    Semester, StudyModule, StudyModuleFilter, StudyModulePayload, StudyModuleResource,
};
pub use university::{University, UniversityFilter, UniversityPayload, UniversityResource};
