//! Student snapshots.

use crate::models::users::PersonName;
use crate::types::{StudentGroupId, StudentId};
use serde::{Deserialize, Serialize};

/// Student snapshot with the person record eagerly attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier for the student
    pub id: StudentId,
    /// Person name from the linked account
    pub name: PersonName,
    /// Contact phone number (fixed-length digit string)
    pub phone: String,
    /// Group the student currently belongs to, if any (at most one)
    pub group_id: Option<StudentGroupId>,
}
