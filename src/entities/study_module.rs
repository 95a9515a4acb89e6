//! Study modules offered at partner universities

use crate::core::sort::{Filter, Sortable, contains_ignore_case};
use crate::core::{CollectionParams, Entity};
use crate::links::LinkFormatter;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Semester in which a module is offered
///
/// Accepted in any letter case, always serialized upper-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Semester {
    Spring,
    Fall,
}

impl Semester {
    pub fn as_str(&self) -> &'static str {
        match self {
            Semester::Spring => "SPRING",
            Semester::Fall => "FALL",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SPRING" => Ok(Semester::Spring),
            "FALL" => Ok(Semester::Fall),
            other => Err(format!(
                "unknown semester '{}', expected SPRING or FALL",
                other
            )),
        }
    }
}

impl TryFrom<String> for Semester {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A module that can be taken by students at a partner university
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyModule {
    pub id: i64,
    pub name: String,
    pub semester: Semester,
    pub credit_points: i32,

    /// Owning university; `None` while the module is unlinked
    ///
    /// Only the linking service writes this field.
    pub university_id: Option<i64>,
}

impl Entity for StudyModule {
    fn resource_name() -> &'static str {
        "modules"
    }

    fn resource_name_singular() -> &'static str {
        "module"
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl StudyModule {
    /// Build a new, unlinked module from a request body
    pub fn from_payload(id: i64, payload: StudyModulePayload) -> Self {
        Self {
            id,
            name: payload.name,
            semester: payload.semester,
            credit_points: payload.credit_points,
            university_id: None,
        }
    }

    /// Overwrite every client-settable field; `id` and `university_id` are kept
    pub fn apply(&mut self, payload: StudyModulePayload) {
        self.name = payload.name;
        self.semester = payload.semester;
        self.credit_points = payload.credit_points;
    }

    pub fn is_linked_to(&self, university_id: i64) -> bool {
        self.university_id == Some(university_id)
    }

    /// Wire representation with the derived `self` URI
    pub fn represent(&self, links: &LinkFormatter) -> StudyModuleResource<'_> {
        StudyModuleResource {
            self_uri: links.absolute(&Self::item_path(self.id)),
            module: self,
        }
    }
}

/// JSON body returned for a study module
#[derive(Debug, Serialize)]
pub struct StudyModuleResource<'a> {
    #[serde(rename = "self")]
    pub self_uri: String,
    #[serde(flatten)]
    pub module: &'a StudyModule,
}

/// Request body of `POST /modules` and `PUT /modules/{id}`
///
/// `universityId` and `self` are read-only and ignored when present.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudyModulePayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub semester: Semester,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub credit_points: i32,
}

impl Sortable for StudyModule {
    const SORT_FIELDS: &'static [&'static str] = &["id", "name", "semester", "creditPoints"];

    fn compare_by(&self, field: &str, other: &Self) -> Ordering {
        match field {
            "name" => self.name.cmp(&other.name),
            "semester" => self.semester.as_str().cmp(other.semester.as_str()),
            "creditPoints" => self.credit_points.cmp(&other.credit_points),
            _ => self.id.cmp(&other.id),
        }
    }

    fn sort_id(&self) -> i64 {
        self.id
    }
}

/// Collection filter for study modules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudyModuleFilter {
    pub name: Option<String>,
    pub semester: Option<String>,
}

impl From<&CollectionParams> for StudyModuleFilter {
    fn from(params: &CollectionParams) -> Self {
        Self {
            name: params.name.clone(),
            semester: params.semester.clone(),
        }
    }
}

impl Filter<StudyModule> for StudyModuleFilter {
    fn matches(&self, module: &StudyModule) -> bool {
        contains_ignore_case(&module.name, self.name.as_deref())
            && contains_ignore_case(module.semester.as_str(), self.semester.as_deref())
    }
}
