//! Entity records and request DTOs mirrored from the REST backend.
//!
//! Records (`Admin`, `Student`, ...) are what the backend returns. Create
//! DTOs are the payloads of the creation forms and carry the client-side
//! validation rules. Update DTOs are the edit forms of the detail screens;
//! each can be seeded from its record so the form opens pre-filled.

pub mod admin;
pub mod batch;
pub mod branch;
pub mod faculty;
pub mod marks;
pub mod options;
pub mod semester;
pub mod student;
pub mod subject;

pub use admin::{Admin, CreateAdmin, UpdateAdmin};
pub use batch::{Batch, CreateBatch, UpdateBatch};
pub use branch::{Branch, CreateBranch, UpdateBranch};
pub use faculty::{CreateFaculty, Faculty, UpdateFaculty};
pub use marks::{MarksRecord, MarksStatus, SemesterMarks, SubjectMarks};
pub use options::{Category, CourseType, Designation};
pub use semester::{CreateSemester, Semester, UpdateSemester};
pub use student::{CreateStudent, Student, UpdateStudent};
pub use subject::{CreateSubject, Subject, UpdateSubject};

/// Join name parts, skipping empty ones.
pub fn full_name(first: &str, middle: Option<&str>, last: Option<&str>) -> String {
    [Some(first), middle, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
