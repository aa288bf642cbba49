//! Fixed option lists behind the console's select inputs.

use serde::{Deserialize, Serialize};

/// Staff role label for admins and faculty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Designation {
    Principal,
    #[serde(rename = "HOD")]
    Hod,
    Tutor,
    Teacher,
}

impl Designation {
    pub const ALL: [Designation; 4] = [Self::Principal, Self::Hod, Self::Tutor, Self::Teacher];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Principal => "Principal",
            Self::Hod => "HOD",
            Self::Tutor => "Tutor",
            Self::Teacher => "Teacher",
        }
    }

    /// Case-insensitive parse; `lecturer` is accepted as `Teacher`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "principal" => Some(Self::Principal),
            "hod" => Some(Self::Hod),
            "tutor" => Some(Self::Tutor),
            "teacher" | "lecturer" => Some(Self::Teacher),
            _ => None,
        }
    }
}

/// Student admission category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Gen,
    Sc,
    St,
    Obc,
}

impl Category {
    pub const ALL: [Category; 4] = [Self::Gen, Self::Sc, Self::St, Self::Obc];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gen => "GEN",
            Self::Sc => "SC",
            Self::St => "ST",
            Self::Obc => "OBC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Gen => "General",
            Self::Sc => "SC (Scheduled Caste)",
            Self::St => "ST (Scheduled Tribe)",
            Self::Obc => "OBC (Other Backward Caste)",
        }
    }
}

/// Diploma course type of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseType {
    Full,
    Part,
}

impl CourseType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Part => "part",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "Full Time Diploma",
            Self::Part => "Part Time Diploma",
        }
    }
}
