//! Subject snapshots.

use crate::models::professors::Professor;
use crate::types::SubjectId;
use serde::{Deserialize, Serialize};

/// Subject snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Unique identifier for the subject
    pub id: SubjectId,
    /// Display name for the subject
    pub name: String,
    /// Optional description of the subject
    pub description: Option<String>,
}

/// Subject with its professor bag attached by a separate association fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectWithProfessors {
    /// The owning subject
    pub subject: Subject,
    /// Professors qualified to teach this subject, in association insertion order
    pub professors: Vec<Professor>,
}
