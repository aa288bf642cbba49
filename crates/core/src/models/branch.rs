use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;

/// An academic branch (CSE, ECE, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: DbId,
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateBranch {
    #[validate(length(min = 1, message = "Branch is required"))]
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBranch {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
}

impl From<&Branch> for UpdateBranch {
    fn from(b: &Branch) -> Self {
        Self {
            title: b.title.clone(),
        }
    }
}
