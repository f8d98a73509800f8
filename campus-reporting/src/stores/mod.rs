//! Data-access contracts consumed by the reporting service.
//!
//! This module defines one read-only query trait per collaborator
//! (students, professors, payments, course assignments, student groups,
//! subjects, user accounts). The traits abstract whatever persistence sits
//! behind them; the reporting service only ever sees entity snapshots.
//!
//! [`memory::InMemoryStore`] is the reference implementation, backing all
//! seven contracts over plain vectors plus explicit association tables for
//! the many-to-many bags.
//!
//! # Bag relationships
//!
//! The many-to-many associations (group↔subject, subject↔professor) are
//! unordered "bags". Fetching several bags in one joined query explodes
//! into a cartesian product, so the eager listing variants use a two-step
//! fetch instead: load the owners, query each association table
//! separately, then merge in application code. Implementations must
//! preserve the owners' input order when re-attaching the bags.

use async_trait::async_trait;

use crate::models::{
    CourseAssignment, Payment, Professor, Student, StudentGroup, StudentGroupWithSubjects, Subject, SubjectWithProfessors, UserAccount,
};
use crate::types::{ProfessorId, StudentGroupId, SubjectId, UserId};

pub mod memory;

/// Result type for store queries
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by store implementations.
///
/// The reporting service treats these as opaque infrastructure failures and
/// propagates them unchanged; the variants exist so implementations can
/// attach context to the failing query.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A query failed in the backing store
    #[error("store query failed: {message}")]
    Query {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Read-only queries over student records.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Every student, with person records attached, in store order.
    async fn find_all(&self) -> Result<Vec<Student>>;

    /// Total number of students.
    async fn count(&self) -> Result<i64>;

    /// Number of students currently in the given group.
    async fn count_by_group(&self, group_id: StudentGroupId) -> Result<i64>;
}

/// Read-only queries over professor records.
#[async_trait]
pub trait ProfessorStore: Send + Sync {
    /// Every professor, with person records attached, in store order.
    async fn find_all(&self) -> Result<Vec<Professor>>;

    /// Total number of professors.
    async fn count(&self) -> Result<i64>;

    /// Look up one professor by id.
    async fn find_by_id(&self, id: ProfessorId) -> Result<Option<Professor>>;

    /// Look up the professor linked to a user account, if any.
    async fn find_by_user_id(&self, user_id: UserId) -> Result<Option<Professor>>;
}

/// Read-only queries over payment records.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Every payment, in store order.
    async fn find_all(&self) -> Result<Vec<Payment>>;

    /// The first `limit` payments ordered by date descending (page zero of
    /// the date-sorted listing). Payments sharing a date keep store order.
    async fn find_recent(&self, limit: usize) -> Result<Vec<Payment>>;
}

/// Read-only queries over course assignments.
#[async_trait]
pub trait CourseAssignmentStore: Send + Sync {
    /// Every assignment, in store order.
    async fn find_all(&self) -> Result<Vec<CourseAssignment>>;

    /// Assignments taught by one professor, in store order.
    async fn find_by_professor(&self, professor_id: ProfessorId) -> Result<Vec<CourseAssignment>>;

    /// Assignments covering one subject, in store order.
    async fn find_by_subject(&self, subject_id: SubjectId) -> Result<Vec<CourseAssignment>>;

    /// Assignments received by one group, in store order.
    async fn find_by_group(&self, group_id: StudentGroupId) -> Result<Vec<CourseAssignment>>;
}

/// Read-only queries over student groups.
#[async_trait]
pub trait StudentGroupStore: Send + Sync {
    /// Every group, in store order.
    async fn find_all(&self) -> Result<Vec<StudentGroup>>;

    /// Total number of groups.
    async fn count(&self) -> Result<i64>;

    /// Every group with its subject bag attached. Implementations must
    /// fetch the association separately and re-attach preserving the
    /// owners' order (see the module docs on bag relationships).
    async fn find_all_with_subjects(&self) -> Result<Vec<StudentGroupWithSubjects>>;
}

/// Read-only queries over subjects.
#[async_trait]
pub trait SubjectStore: Send + Sync {
    /// Every subject, in store order.
    async fn find_all(&self) -> Result<Vec<Subject>>;

    /// Total number of subjects.
    async fn count(&self) -> Result<i64>;

    /// Every subject with its professor bag attached, owners' order
    /// preserved as for [`StudentGroupStore::find_all_with_subjects`].
    async fn find_all_with_professors(&self) -> Result<Vec<SubjectWithProfessors>>;
}

/// Read-only queries over login accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up one account by its unique login.
    async fn find_by_login(&self, login: &str) -> Result<Option<UserAccount>>;
}
