//! Console routes, roles, sidebar and breadcrumbs.
//!
//! Routes are typed so controllers can say where to go next without
//! building path strings by hand. [`Route::parse`] is the inverse of
//! [`Route::path`] for every variant.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Home,
    Login,
    AdminLogin,
    FacultyLogin,
    AdminHome,
    FacultyHome,
    Profile,
    AdminList,
    AdminCreate,
    AdminDetail(DbId),
    FacultyList,
    FacultyCreate,
    FacultyDetail(DbId),
    StudentList,
    StudentCreate,
    StudentDetail(DbId),
    StudentSemesterMarks { student_id: DbId, semester_id: DbId },
    SubjectList,
    SubjectCreate,
    BranchList,
    BranchCreate,
    SemesterList,
    SemesterCreate,
    /// Batch landing page, which also hosts the batch creation form.
    BatchHome,
    BatchList,
    BatchRegistration(DbId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".into(),
            Self::Login => "/login".into(),
            Self::AdminLogin => "/admin/login".into(),
            Self::FacultyLogin => "/faculty/login".into(),
            Self::AdminHome => "/admin".into(),
            Self::FacultyHome => "/faculty".into(),
            Self::Profile => "/admin/me".into(),
            Self::AdminList => "/admin/view".into(),
            Self::AdminCreate => "/admin/create".into(),
            Self::AdminDetail(id) => format!("/admin/{id}"),
            Self::FacultyList => "/admin/faculty".into(),
            Self::FacultyCreate => "/admin/faculty/create".into(),
            Self::FacultyDetail(id) => format!("/admin/faculty/{id}"),
            Self::StudentList => "/admin/student".into(),
            Self::StudentCreate => "/admin/student/create".into(),
            Self::StudentDetail(id) => format!("/admin/student/{id}"),
            Self::StudentSemesterMarks {
                student_id,
                semester_id,
            } => format!("/admin/student/{student_id}/semester/{semester_id}"),
            Self::SubjectList => "/admin/subject".into(),
            Self::SubjectCreate => "/admin/subject/create".into(),
            Self::BranchList => "/admin/branch".into(),
            Self::BranchCreate => "/admin/branch/create".into(),
            Self::SemesterList => "/admin/semester".into(),
            Self::SemesterCreate => "/admin/semester/create".into(),
            Self::BatchHome => "/admin/batch".into(),
            Self::BatchList => "/admin/batch/view".into(),
            Self::BatchRegistration(id) => format!("/admin/batch/{id}"),
        }
    }

    /// Parse a path (trailing slash and query string ignored).
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let id = |s: &str| s.parse::<DbId>().ok();

        let route = match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["faculty"] => Self::FacultyHome,
            ["faculty", "login"] => Self::FacultyLogin,
            ["admin"] => Self::AdminHome,
            ["admin", "login"] => Self::AdminLogin,
            ["admin", "me"] => Self::Profile,
            ["admin", "view"] => Self::AdminList,
            ["admin", "create"] => Self::AdminCreate,
            ["admin", "faculty"] => Self::FacultyList,
            ["admin", "faculty", "create"] => Self::FacultyCreate,
            ["admin", "faculty", x] => Self::FacultyDetail(id(x)?),
            ["admin", "student"] => Self::StudentList,
            ["admin", "student", "create"] => Self::StudentCreate,
            ["admin", "student", x] => Self::StudentDetail(id(x)?),
            ["admin", "student", x, "semester", y] => Self::StudentSemesterMarks {
                student_id: id(x)?,
                semester_id: id(y)?,
            },
            ["admin", "subject"] => Self::SubjectList,
            ["admin", "subject", "create"] => Self::SubjectCreate,
            ["admin", "branch"] => Self::BranchList,
            ["admin", "branch", "create"] => Self::BranchCreate,
            ["admin", "semester"] => Self::SemesterList,
            ["admin", "semester", "create"] => Self::SemesterCreate,
            ["admin", "batch"] => Self::BatchHome,
            ["admin", "batch", "view"] => Self::BatchList,
            ["admin", "batch", x] => Self::BatchRegistration(id(x)?),
            ["admin", x] => Self::AdminDetail(id(x)?),
            _ => return None,
        };
        Some(route)
    }

    /// Whether the route is reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Self::Home | Self::Login | Self::AdminLogin | Self::FacultyLogin
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Faculty,
}

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub title: &'static str,
    pub route: Route,
}

const ADMIN_SIDEBAR: [NavItem; 7] = [
    NavItem { title: "Admin", route: Route::AdminList },
    NavItem { title: "Faculty", route: Route::FacultyList },
    NavItem { title: "Student", route: Route::StudentList },
    NavItem { title: "Subject", route: Route::SubjectList },
    NavItem { title: "Branch", route: Route::BranchList },
    NavItem { title: "Semester", route: Route::SemesterList },
    NavItem { title: "Batch", route: Route::BatchList },
];

const FACULTY_SIDEBAR: [NavItem; 1] = [NavItem { title: "Dashboard", route: Route::FacultyHome }];

impl Role {
    pub fn home(self) -> Route {
        match self {
            Self::Admin => Route::AdminHome,
            Self::Faculty => Route::FacultyHome,
        }
    }

    pub fn login_route(self) -> Route {
        match self {
            Self::Admin => Route::AdminLogin,
            Self::Faculty => Route::FacultyLogin,
        }
    }

    pub fn sidebar(self) -> &'static [NavItem] {
        match self {
            Self::Admin => &ADMIN_SIDEBAR,
            Self::Faculty => &FACULTY_SIDEBAR,
        }
    }

    /// Whether this role may open `route`.
    pub fn can_access(self, route: &Route) -> bool {
        if route.is_public() {
            return true;
        }
        match self {
            Self::Admin => *route != Route::FacultyHome,
            Self::Faculty => *route == Route::FacultyHome,
        }
    }
}

// ---------------------------------------------------------------------------
// Breadcrumbs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: String,
    /// The last crumb is the current page and is not a link.
    pub is_current: bool,
}

/// Build the breadcrumb trail for `path`, rooted at "Dashboard".
pub fn breadcrumbs(path: &str) -> Vec<Crumb> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut crumbs = vec![Crumb {
        label: "Dashboard".into(),
        href: "/".into(),
        is_current: segments.is_empty(),
    }];

    for (index, segment) in segments.iter().enumerate() {
        let mut chars = segment.chars();
        let label = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        crumbs.push(Crumb {
            label,
            href: format!("/{}", segments[..=index].join("/")),
            is_current: index == segments.len() - 1,
        });
    }
    crumbs
}

// ---------------------------------------------------------------------------
// Host rewrite
// ---------------------------------------------------------------------------

/// Map a request on the `admin.` or `faculty.` subdomain onto its section.
///
/// `admin.college.edu/view` becomes `/admin/view`. Hosts with fewer than
/// three labels, or with any other subdomain, pass through unchanged.
pub fn rewrite_for_host(host: &str, path: &str) -> String {
    let hostname = host.split(':').next().unwrap_or_default();
    let labels: Vec<&str> = hostname.split('.').collect();
    let subdomain = if labels.len() > 2 { Some(labels[0]) } else { None };

    let prefix = match subdomain {
        Some("admin") => "/admin",
        Some("faculty") => "/faculty",
        _ => return path.to_string(),
    };
    if path == "/" || path.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}{path}")
    }
}
