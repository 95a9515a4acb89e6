//! Relation names advertised in `Link` headers

pub const GET_UNIVERSITIES_COLLECTION: &str = "getUniversitiesCollection";
pub const GET_STUDY_MODULES_COLLECTION: &str = "getStudyModulesCollection";
pub const POST_CREATE_UNIVERSITY: &str = "postCreateUniversity";
pub const POST_CREATE_STUDY_MODULE: &str = "postCreateStudyModule";
pub const DELETE_ALL_UNIVERSITIES: &str = "deleteAllUniversities";
pub const DELETE_ALL_STUDY_MODULES: &str = "deleteAllStudyModules";

pub const PUT_UPDATE_UNIVERSITY: &str = "putUpdateUniversity";
pub const DEL_UNIVERSITY: &str = "delUniversity";
pub const PUT_LINK_MODULE: &str = "putLinkModule";
pub const DEL_UNLINK_MODULE: &str = "delUnlinkModule";
pub const GET_MODULE_OF_UNIVERSITY: &str = "getModuleOfUniversity";
pub const GET_MODULES_OF_UNIVERSITY: &str = "getModulesOfUniversity";

pub const PUT_UPDATE_MODULE: &str = "putUpdateModule";
pub const DEL_MODULE: &str = "delModule";

pub const GET_SELF: &str = "getSelf";

pub const SELF: &str = "self";
pub const PREV: &str = "prev";
pub const NEXT: &str = "next";

/// Placeholder for the module id in templated links
pub const MODULE_ID_TEMPLATE: &str = "{moduleId}";
