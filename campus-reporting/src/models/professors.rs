//! Professor snapshots.

use crate::models::users::PersonName;
use crate::types::{ProfessorId, UserId};
use serde::{Deserialize, Serialize};

/// Professor snapshot with the person record eagerly attached.
///
/// Professors teach subjects to groups through course assignments; the
/// snapshot itself carries no relationship collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professor {
    /// Unique identifier for the professor
    pub id: ProfessorId,
    /// Account the professor signs in with
    pub user_id: UserId,
    /// Person name from the linked account
    pub name: PersonName,
}
