//! Person names and login accounts.

use crate::types::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the person behind a user, student, or professor record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

impl fmt::Display for PersonName {
    /// Renders the "first last" display form used in dashboard listings.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Login account snapshot, used to resolve a login to a professor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique identifier for the account
    pub id: UserId,
    /// Login the person authenticates with (unique)
    pub login: String,
    /// Person name attached to the account
    pub name: PersonName,
}
