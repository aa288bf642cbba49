//! Per-entity configuration table.
//!
//! Every list, detail and create screen is one generic controller
//! parameterised by a [`Resource`]. The impl names the record and DTO
//! types, the REST collection, the list route to return to, and which
//! fields can be edited inline from a list row.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::models::{
    Admin, Batch, Branch, CreateAdmin, CreateBatch, CreateBranch, CreateFaculty, CreateSemester,
    CreateStudent, CreateSubject, Faculty, Semester, Student, Subject, UpdateAdmin, UpdateBatch,
    UpdateBranch, UpdateFaculty, UpdateSemester, UpdateStudent, UpdateSubject,
};
use crate::navigation::Route;
use crate::types::DbId;

pub trait Resource: Send + Sync + 'static {
    type Record: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static;
    type Create: Serialize + Validate + Send + Sync;
    type Update: Serialize + Validate + for<'a> From<&'a Self::Record> + Clone + Send + Sync;

    /// Display name used in notices ("Student updated successfully").
    const LABEL: &'static str;
    /// REST collection path, e.g. `/students`.
    const COLLECTION: &'static str;
    /// Screen to return to after a create, update or delete.
    const LIST_ROUTE: Route;
    /// Fields a list row can edit in place. Empty disables inline edit.
    const INLINE_FIELDS: &'static [&'static str] = &[];

    fn id(record: &Self::Record) -> DbId;

    fn item_path(id: DbId) -> String {
        format!("{}/{id}", Self::COLLECTION)
    }
}

pub struct Admins;
pub struct Faculties;
pub struct Students;
pub struct Branches;
pub struct Batches;
pub struct Semesters;
pub struct Subjects;

impl Resource for Admins {
    type Record = Admin;
    type Create = CreateAdmin;
    type Update = UpdateAdmin;

    const LABEL: &'static str = "Admin";
    const COLLECTION: &'static str = "/admin";
    const LIST_ROUTE: Route = Route::AdminList;

    fn id(record: &Admin) -> DbId {
        record.id
    }
}

impl Resource for Faculties {
    type Record = Faculty;
    type Create = CreateFaculty;
    type Update = UpdateFaculty;

    const LABEL: &'static str = "Faculty";
    const COLLECTION: &'static str = "/faculty";
    const LIST_ROUTE: Route = Route::FacultyList;

    fn id(record: &Faculty) -> DbId {
        record.id
    }
}

impl Resource for Students {
    type Record = Student;
    type Create = CreateStudent;
    type Update = UpdateStudent;

    const LABEL: &'static str = "Student";
    const COLLECTION: &'static str = "/students";
    const LIST_ROUTE: Route = Route::StudentList;

    fn id(record: &Student) -> DbId {
        record.id
    }
}

impl Resource for Branches {
    type Record = Branch;
    type Create = CreateBranch;
    type Update = UpdateBranch;

    const LABEL: &'static str = "Branch";
    const COLLECTION: &'static str = "/branches";
    const LIST_ROUTE: Route = Route::BranchList;
    const INLINE_FIELDS: &'static [&'static str] = &["title"];

    fn id(record: &Branch) -> DbId {
        record.id
    }
}

impl Resource for Batches {
    type Record = Batch;
    type Create = CreateBatch;
    type Update = UpdateBatch;

    const LABEL: &'static str = "Batch";
    const COLLECTION: &'static str = "/batch";
    const LIST_ROUTE: Route = Route::BatchList;
    const INLINE_FIELDS: &'static [&'static str] = &["end_year"];

    fn id(record: &Batch) -> DbId {
        record.id
    }
}

impl Resource for Semesters {
    type Record = Semester;
    type Create = CreateSemester;
    type Update = UpdateSemester;

    const LABEL: &'static str = "Semester";
    const COLLECTION: &'static str = "/semesters";
    const LIST_ROUTE: Route = Route::SemesterList;
    const INLINE_FIELDS: &'static [&'static str] = &["title"];

    fn id(record: &Semester) -> DbId {
        record.id
    }
}

impl Resource for Subjects {
    type Record = Subject;
    type Create = CreateSubject;
    type Update = UpdateSubject;

    const LABEL: &'static str = "Subject";
    const COLLECTION: &'static str = "/subjects";
    const LIST_ROUTE: Route = Route::SubjectList;
    const INLINE_FIELDS: &'static [&'static str] =
        &["title", "total_internal_marks", "total_external_marks"];

    fn id(record: &Subject) -> DbId {
        record.id
    }
}
