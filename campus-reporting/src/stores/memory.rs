//! In-memory store implementation.
//!
//! Backs all seven store contracts with plain vectors. Useful for tests and
//! for callers that assemble entity snapshots themselves (imports, demos)
//! and want dashboards computed over them without a database.
//!
//! Data is loaded through the `add_*`/`link_*` mutators before the store is
//! shared; queries clone snapshots out, so a shared store never hands out
//! aliased state.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::models::{
    CourseAssignment, Payment, Professor, Student, StudentGroup, StudentGroupWithSubjects, Subject, SubjectWithProfessors, UserAccount,
};
use crate::stores::{
    CourseAssignmentStore, PaymentStore, ProfessorStore, Result, StudentGroupStore, StudentStore, SubjectStore, UserStore,
};
use crate::types::{ProfessorId, StudentGroupId, SubjectId, UserId};

/// Vector-backed implementation of every store contract.
///
/// Entity order is insertion order, which is what "store order" means for
/// this implementation. The many-to-many bags live in explicit association
/// tables and are only joined by the eager listing variants.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    students: Vec<Student>,
    professors: Vec<Professor>,
    payments: Vec<Payment>,
    assignments: Vec<CourseAssignment>,
    groups: Vec<StudentGroup>,
    subjects: Vec<Subject>,
    users: Vec<UserAccount>,
    // Association tables for the many-to-many bags.
    group_subjects: Vec<(StudentGroupId, SubjectId)>,
    subject_professors: Vec<(SubjectId, ProfessorId)>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_student(&mut self, student: Student) {
        self.students.push(student);
    }

    pub fn add_professor(&mut self, professor: Professor) {
        self.professors.push(professor);
    }

    pub fn add_payment(&mut self, payment: Payment) {
        self.payments.push(payment);
    }

    pub fn add_assignment(&mut self, assignment: CourseAssignment) {
        self.assignments.push(assignment);
    }

    pub fn add_group(&mut self, group: StudentGroup) {
        self.groups.push(group);
    }

    pub fn add_subject(&mut self, subject: Subject) {
        self.subjects.push(subject);
    }

    pub fn add_user(&mut self, user: UserAccount) {
        self.users.push(user);
    }

    /// Record that a subject is taught to a group.
    pub fn link_group_subject(&mut self, group_id: StudentGroupId, subject_id: SubjectId) {
        self.group_subjects.push((group_id, subject_id));
    }

    /// Record that a professor is qualified for a subject.
    pub fn link_subject_professor(&mut self, subject_id: SubjectId, professor_id: ProfessorId) {
        self.subject_professors.push((subject_id, professor_id));
    }
}

#[async_trait]
impl StudentStore for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Student>> {
        Ok(self.students.clone())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.students.len() as i64)
    }

    async fn count_by_group(&self, group_id: StudentGroupId) -> Result<i64> {
        Ok(self.students.iter().filter(|s| s.group_id == Some(group_id)).count() as i64)
    }
}

#[async_trait]
impl ProfessorStore for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Professor>> {
        Ok(self.professors.clone())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.professors.len() as i64)
    }

    async fn find_by_id(&self, id: ProfessorId) -> Result<Option<Professor>> {
        Ok(self.professors.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Option<Professor>> {
        Ok(self.professors.iter().find(|p| p.user_id == user_id).cloned())
    }
}

#[async_trait]
impl PaymentStore for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Payment>> {
        Ok(self.payments.clone())
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<Payment>> {
        let mut recent = self.payments.clone();
        // Stable sort keeps insertion order for equal dates.
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(limit);
        Ok(recent)
    }
}

#[async_trait]
impl CourseAssignmentStore for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<CourseAssignment>> {
        Ok(self.assignments.clone())
    }

    async fn find_by_professor(&self, professor_id: ProfessorId) -> Result<Vec<CourseAssignment>> {
        Ok(self.assignments.iter().filter(|a| a.professor_id == professor_id).cloned().collect())
    }

    async fn find_by_subject(&self, subject_id: SubjectId) -> Result<Vec<CourseAssignment>> {
        Ok(self.assignments.iter().filter(|a| a.subject_id == subject_id).cloned().collect())
    }

    async fn find_by_group(&self, group_id: StudentGroupId) -> Result<Vec<CourseAssignment>> {
        Ok(self.assignments.iter().filter(|a| a.student_group_id == group_id).cloned().collect())
    }
}

#[async_trait]
impl StudentGroupStore for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<StudentGroup>> {
        Ok(self.groups.clone())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.groups.len() as i64)
    }

    async fn find_all_with_subjects(&self) -> Result<Vec<StudentGroupWithSubjects>> {
        // Step one: the owners, in store order.
        let groups = self.groups.clone();

        // Step two: the association rows, grouped by owner.
        let subjects_by_id: HashMap<SubjectId, &Subject> = self.subjects.iter().map(|s| (s.id, s)).collect();
        let mut bags: HashMap<StudentGroupId, Vec<Subject>> = HashMap::new();
        for (group_id, subject_id) in &self.group_subjects {
            if let Some(subject) = subjects_by_id.get(subject_id) {
                bags.entry(*group_id).or_default().push((*subject).clone());
            }
        }

        // Re-attach preserving the owners' order.
        Ok(groups
            .into_iter()
            .map(|group| {
                let subjects = bags.remove(&group.id).unwrap_or_default();
                StudentGroupWithSubjects { group, subjects }
            })
            .collect())
    }
}

#[async_trait]
impl SubjectStore for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Subject>> {
        Ok(self.subjects.clone())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.subjects.len() as i64)
    }

    async fn find_all_with_professors(&self) -> Result<Vec<SubjectWithProfessors>> {
        let subjects = self.subjects.clone();

        let professors_by_id: HashMap<ProfessorId, &Professor> = self.professors.iter().map(|p| (p.id, p)).collect();
        let mut bags: HashMap<SubjectId, Vec<Professor>> = HashMap::new();
        for (subject_id, professor_id) in &self.subject_professors {
            if let Some(professor) = professors_by_id.get(professor_id) {
                bags.entry(*subject_id).or_default().push((*professor).clone());
            }
        }

        Ok(subjects
            .into_iter()
            .map(|subject| {
                let professors = bags.remove(&subject.id).unwrap_or_default();
                SubjectWithProfessors { subject, professors }
            })
            .collect())
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_login(&self, login: &str) -> Result<Option<UserAccount>> {
        Ok(self.users.iter().find(|u| u.login == login).cloned())
    }
}
