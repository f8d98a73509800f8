//! Common type definitions.
//!
//! This module defines type aliases for entity IDs. The administrative
//! platform keys every entity by a database-assigned 64-bit integer, so the
//! aliases exist for readability at call sites rather than type safety:
//!
//! - [`UserId`]: User account identifier
//! - [`StudentId`]: Student identifier
//! - [`ProfessorId`]: Professor identifier
//! - [`StudentGroupId`]: Student group identifier
//! - [`SubjectId`]: Subject identifier
//! - [`CourseAssignmentId`]: Course assignment identifier
//! - [`PaymentId`]: Payment identifier

// Type aliases for IDs
pub type UserId = i64;
pub type StudentId = i64;
pub type ProfessorId = i64;
pub type StudentGroupId = i64;
pub type SubjectId = i64;
pub type CourseAssignmentId = i64;
pub type PaymentId = i64;
