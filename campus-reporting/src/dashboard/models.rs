//! Aggregate records returned by the reporting service.
//!
//! These are the plain data results handed to the (out-of-scope) HTTP
//! layer. Everything serializes with snake_case field names; money fields
//! are [`Decimal`] so aggregates stay exact.

use crate::models::PaymentStatus;
use crate::types::{CourseAssignmentId, PaymentId, ProfessorId, StudentGroupId, StudentId, SubjectId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accepted revenue for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    /// Uppercase English month name, e.g. `"JANUARY"`
    pub month: String,
    /// Calendar year the month falls in
    pub year: i32,
    /// Accepted revenue inside the month window
    pub revenue: Decimal,
}

/// A payment listed on the dashboard, with the paying student resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentPayment {
    /// Unique identifier for the payment
    pub id: PaymentId,
    /// Amount paid
    pub amount: Decimal,
    /// Clearing status
    pub status: PaymentStatus,
    /// Instant the payment was recorded
    pub date: DateTime<Utc>,
    /// Student the payment belongs to, when one is linked
    pub student_id: Option<StudentId>,
    /// "first last" display name; `"Unknown Student"` when unresolved
    pub student_name: String,
}

/// A course assignment listed as recent professor activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessorActivity {
    /// Unique identifier for the assignment
    pub id: CourseAssignmentId,
    /// Professor teaching it
    pub professor_id: ProfessorId,
    /// "first last" display name; `"Unknown Professor"` when unresolved
    pub professor_name: String,
    /// Subject display name; `"Unknown Subject"` when unresolved
    pub subject_name: String,
    /// Group receiving the course
    pub student_group_id: StudentGroupId,
    /// Group display name; `"Unknown Group"` when unresolved
    pub student_group_name: String,
}

/// Accepted revenue attributed to one student group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRevenue {
    /// Group display name; `"Unknown Group"` when the group record is gone
    pub group_name: String,
    /// Accepted revenue paid by the group's students
    pub revenue: Decimal,
}

/// Nested revenue overview on the dashboard snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueOverview {
    /// Sum of all accepted payment amounts
    pub total_revenue: Decimal,
    /// Accepted revenue from the first day of the current month to "now"
    pub current_month_revenue: Decimal,
    /// Accepted revenue across the full previous calendar month
    pub previous_month_revenue: Decimal,
    /// Percentage change of current vs previous month; 0 when the previous
    /// month had no revenue
    pub month_over_month_change: Decimal,
    /// Mean of the last 6 calendar months' revenue, current partial month
    /// included
    pub average_monthly_revenue: Decimal,
    /// Top groups by accepted revenue, descending, at most 5 entries
    pub top_revenue_by_student_group: Vec<GroupRevenue>,
}

/// Full dashboard snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Total number of students
    pub total_students: i64,
    /// Total number of professors
    pub total_professors: i64,
    /// Total number of student groups
    pub total_student_groups: i64,
    /// Total number of subjects
    pub total_subjects: i64,
    /// Total number of payments, any status
    pub total_payments: i64,
    /// Number of payments still pending
    pub pending_payments: i64,
    /// Mean amount over all payments regardless of status, 2 decimal
    /// places; 0 when there are no payments
    pub average_payment_amount: Decimal,
    /// Sum of all accepted payment amounts
    pub total_revenue: Decimal,
    /// Accepted revenue across the full previous calendar month
    pub revenue_last_month: Decimal,
    /// Last 4 calendar months of revenue, oldest first, current partial
    /// month last
    pub revenue_by_month: Vec<MonthlyRevenue>,
    /// The 10 most recent payments by date descending
    pub last_payments: Vec<RecentPayment>,
    /// The first 10 course assignments in store order
    pub professor_activities: Vec<ProfessorActivity>,
    /// Group name → current student count; empty groups appear with 0
    pub students_per_group: HashMap<String, i64>,
    /// Status → payment count; every status appears, zero-filled
    pub payments_per_status: HashMap<PaymentStatus, i64>,
    /// Revenue overview block
    pub revenue_overview: RevenueOverview,
}

/// One course assignment inside a professor's statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentDetail {
    /// Unique identifier for the assignment
    pub id: CourseAssignmentId,
    /// Subject being taught
    pub subject_id: SubjectId,
    /// Subject display name; `"Unknown Subject"` when unresolved
    pub subject_name: String,
    /// Group receiving the course
    pub student_group_id: StudentGroupId,
    /// Group display name; `"Unknown Group"` when unresolved
    pub student_group_name: String,
    /// Current number of students in the group
    pub student_count: i64,
}

/// Teaching statistics for one professor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessorStatistics {
    /// Number of course assignments held
    pub total_assignments: i64,
    /// Distinct groups taught
    pub total_student_groups: i64,
    /// Distinct subjects taught
    pub total_subjects: i64,
    /// Sum of group sizes across assignments; a group assigned twice
    /// contributes its size twice
    pub total_students: i64,
    /// The assignments themselves, in store order
    pub assignments: Vec<AssignmentDetail>,
    /// Subject name → assignment count
    pub subject_distribution: HashMap<String, i64>,
}
