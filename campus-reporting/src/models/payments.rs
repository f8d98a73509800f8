//! Payment snapshots.

use crate::types::{PaymentId, StudentId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clearing status of a tuition or fee payment.
///
/// Serialized in the upper-case wire form the admin frontend consumes
/// (`"PENDING"`, `"ACCEPTED"`, `"REJECTED"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Accepted,
    Rejected,
}

impl PaymentStatus {
    /// Every enumeration value, in declaration order. Used to zero-fill
    /// per-status counters so absent statuses still appear.
    pub const ALL: [PaymentStatus; 3] = [PaymentStatus::Pending, PaymentStatus::Accepted, PaymentStatus::Rejected];
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Accepted => write!(f, "ACCEPTED"),
            PaymentStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Payment snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for the payment
    pub id: PaymentId,
    /// Amount paid (non-negative)
    pub amount: Decimal,
    /// Clearing status
    pub status: PaymentStatus,
    /// Instant the payment was recorded
    pub date: DateTime<Utc>,
    /// Student the payment belongs to, when one is linked
    pub student_id: Option<StudentId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_in_wire_case() {
        assert_eq!(serde_json::to_string(&PaymentStatus::Accepted).unwrap(), "\"ACCEPTED\"");
        assert_eq!(serde_json::from_str::<PaymentStatus>("\"PENDING\"").unwrap(), PaymentStatus::Pending);
    }

    #[test]
    fn test_status_display_matches_wire_case() {
        assert_eq!(PaymentStatus::Rejected.to_string(), "REJECTED");
    }
}
