//! Entity snapshot models.
//!
//! This module contains the read-only views of administrative records that
//! the reporting service consumes. Store contracts return these snapshots
//! fully resolved (to-one person records eagerly attached); the service
//! never mutates them.
//!
//! # Design Principles
//!
//! - **Read-only**: snapshots reflect the persisted state at call time;
//!   ownership and lifecycle stay with the external persistence layer
//! - **Flat references**: to-many relationships are carried as ids and
//!   resolved in application code, never as nested object graphs
//! - **Serde**: all snapshots serialize with the crate's default snake_case
//!   field naming
//!
//! # Model Categories
//!
//! - [`users`]: person names and login accounts
//! - [`students`]: students and their group membership
//! - [`professors`]: professors and their linked accounts
//! - [`groups`]: student groups and their subject bag
//! - [`subjects`]: subjects and their professor bag
//! - [`assignments`]: course assignments (professor × subject × group)
//! - [`payments`]: tuition/fee payments and their clearing status

pub mod assignments;
pub mod groups;
pub mod payments;
pub mod professors;
pub mod students;
pub mod subjects;
pub mod users;

pub use assignments::CourseAssignment;
pub use groups::{StudentGroup, StudentGroupWithSubjects};
pub use payments::{Payment, PaymentStatus};
pub use professors::Professor;
pub use students::Student;
pub use subjects::{Subject, SubjectWithProfessors};
pub use users::{PersonName, UserAccount};
