//! Course assignment snapshots.

use crate::types::{CourseAssignmentId, ProfessorId, StudentGroupId, SubjectId};
use serde::{Deserialize, Serialize};

/// One teaching relationship: a professor teaches a subject to a group.
///
/// This is the join entity behind all professor activity reporting. It has
/// no timestamp, so "recent" listings follow store order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseAssignment {
    /// Unique identifier for the assignment
    pub id: CourseAssignmentId,
    /// Group receiving the course
    pub student_group_id: StudentGroupId,
    /// Subject being taught
    pub subject_id: SubjectId,
    /// Professor teaching it
    pub professor_id: ProfessorId,
}
