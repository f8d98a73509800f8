//! Student group snapshots.

use crate::models::subjects::Subject;
use crate::types::StudentGroupId;
use serde::{Deserialize, Serialize};

/// Student group snapshot.
///
/// The student membership is modeled on [`Student::group_id`]
/// (one-to-many); the subject bag is many-to-many and only available
/// through the eager listing variant below.
///
/// [`Student::group_id`]: crate::models::students::Student::group_id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentGroup {
    /// Unique identifier for the group
    pub id: StudentGroupId,
    /// Display name for the group
    pub name: String,
    /// Optional description of the group
    pub description: Option<String>,
}

/// Group with its subject bag attached by a separate association fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentGroupWithSubjects {
    /// The owning group
    pub group: StudentGroup,
    /// Subjects taught to this group, in association insertion order
    pub subjects: Vec<Subject>,
}
