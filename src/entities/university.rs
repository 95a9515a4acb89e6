//! Partner universities

use crate::core::sort::{Filter, Sortable, contains_ignore_case};
use crate::core::{CollectionParams, Entity};
use crate::links::LinkFormatter;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use validator::Validate;

/// A partner university for student exchange
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub department: String,
    pub contact_person_name: String,
    pub outgoing_student_number: i32,
    pub incoming_student_number: i32,
    pub spring_semester_start: NaiveDate,
    pub fall_semester_start: NaiveDate,

    /// Ids of the study modules linked to this university
    ///
    /// Only the linking service writes this set.
    #[serde(skip)]
    pub module_ids: BTreeSet<i64>,
}

impl Entity for University {
    fn resource_name() -> &'static str {
        "universities"
    }

    fn resource_name_singular() -> &'static str {
        "university"
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl University {
    /// Build a new, unlinked university from a request body
    pub fn from_payload(id: i64, payload: UniversityPayload) -> Self {
        Self {
            id,
            name: payload.name,
            country: payload.country,
            department: payload.department,
            contact_person_name: payload.contact_person_name,
            outgoing_student_number: payload.outgoing_student_number,
            incoming_student_number: payload.incoming_student_number,
            spring_semester_start: payload.spring_semester_start,
            fall_semester_start: payload.fall_semester_start,
            module_ids: BTreeSet::new(),
        }
    }

    /// Overwrite every client-settable field; `id` and `module_ids` are kept
    pub fn apply(&mut self, payload: UniversityPayload) {
        self.name = payload.name;
        self.country = payload.country;
        self.department = payload.department;
        self.contact_person_name = payload.contact_person_name;
        self.outgoing_student_number = payload.outgoing_student_number;
        self.incoming_student_number = payload.incoming_student_number;
        self.spring_semester_start = payload.spring_semester_start;
        self.fall_semester_start = payload.fall_semester_start;
    }

    /// Path of the modules collection of a university
    pub fn modules_path(id: i64) -> String {
        format!("{}/modules", Self::item_path(id))
    }

    /// Wire representation with the derived `self` and `modules` URIs
    pub fn represent(&self, links: &LinkFormatter) -> UniversityResource<'_> {
        UniversityResource {
            self_uri: links.absolute(&Self::item_path(self.id)),
            university: self,
            modules: links.absolute(&Self::modules_path(self.id)),
        }
    }
}

/// JSON body returned for a university
#[derive(Debug, Serialize)]
pub struct UniversityResource<'a> {
    #[serde(rename = "self")]
    pub self_uri: String,
    #[serde(flatten)]
    pub university: &'a University,
    pub modules: String,
}

/// Request body of `POST /universities` and `PUT /universities/{id}`
///
/// Derived fields (`self`, `modules`) are ignored when present.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UniversityPayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub country: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub department: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub contact_person_name: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub outgoing_student_number: i32,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub incoming_student_number: i32,
    pub spring_semester_start: NaiveDate,
    pub fall_semester_start: NaiveDate,
}

impl Sortable for University {
    const SORT_FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "country",
        "department",
        "contactPersonName",
        "outgoingStudentNumber",
        "incomingStudentNumber",
        "springSemesterStart",
        "fallSemesterStart",
    ];

    fn compare_by(&self, field: &str, other: &Self) -> Ordering {
        match field {
            "name" => self.name.cmp(&other.name),
            "country" => self.country.cmp(&other.country),
            "department" => self.department.cmp(&other.department),
            "contactPersonName" => self.contact_person_name.cmp(&other.contact_person_name),
            "outgoingStudentNumber" => self
                .outgoing_student_number
                .cmp(&other.outgoing_student_number),
            "incomingStudentNumber" => self
                .incoming_student_number
                .cmp(&other.incoming_student_number),
            "springSemesterStart" => self.spring_semester_start.cmp(&other.spring_semester_start),
            "fallSemesterStart" => self.fall_semester_start.cmp(&other.fall_semester_start),
            _ => self.id.cmp(&other.id),
        }
    }

    fn sort_id(&self) -> i64 {
        self.id
    }
}

/// Collection filter for universities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniversityFilter {
    pub name: Option<String>,
    pub country: Option<String>,
}

impl From<&CollectionParams> for UniversityFilter {
    fn from(params: &CollectionParams) -> Self {
        Self {
            name: params.name.clone(),
            country: params.country.clone(),
        }
    }
}

impl Filter<University> for UniversityFilter {
    fn matches(&self, university: &University) -> bool {
        contains_ignore_case(&university.name, self.name.as_deref())
            && contains_ignore_case(&university.country, self.country.as_deref())
    }
}
