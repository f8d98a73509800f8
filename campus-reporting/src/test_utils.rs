//! Shared helpers for tests.
//!
//! [`CampusFixture`] seeds an [`InMemoryStore`] with entities through a
//! per-fixture ID counter, so tests describe data by name and never hard
//! code identifiers. [`FixedClock`] pins "now" so calendar windows are
//! deterministic.
//!
//! Only compiled for tests or with the `test-utils` feature.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::dashboard::DashboardService;
use crate::dashboard::calendar::Clock;
use crate::models::{CourseAssignment, Payment, PaymentStatus, PersonName, Professor, Student, StudentGroup, Subject, UserAccount};
use crate::stores::memory::InMemoryStore;
use crate::types::{CourseAssignmentId, PaymentId, ProfessorId, StudentGroupId, StudentId, SubjectId, UserId};

/// Clock frozen at a configured instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    /// Clock pinned at the given wall clock time in a UTC`offset_hours`
    /// time zone.
    pub fn at(offset_hours: i32, year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        Self(offset.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Shorthand for a UTC timestamp on the hour.
pub fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// Builder for a seeded in-memory campus.
///
/// Every `add_*` method returns the generated ID so related records can be
/// wired together. IDs are unique across entity kinds within one fixture,
/// which makes cross-entity mixups fail loudly in assertions.
#[derive(Debug, Default)]
pub struct CampusFixture {
    store: InMemoryStore,
    next_id: i64,
}

impl CampusFixture {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_group(&mut self, name: &str) -> StudentGroupId {
        let id = self.next_id();
        self.store.add_group(StudentGroup {
            id,
            name: name.to_string(),
            description: None,
        });
        id
    }

    pub fn add_subject(&mut self, name: &str) -> SubjectId {
        let id = self.next_id();
        self.store.add_subject(Subject {
            id,
            name: name.to_string(),
            description: None,
        });
        id
    }

    pub fn add_student(&mut self, first: &str, last: &str, group_id: Option<StudentGroupId>) -> StudentId {
        let id = self.next_id();
        self.store.add_student(Student {
            id,
            name: person(first, last),
            phone: format!("555-{id:04}"),
            group_id,
        });
        id
    }

    /// Account without a professor record, for exercising lookups by login.
    pub fn add_user(&mut self, first: &str, last: &str, login: &str) -> UserId {
        let id = self.next_id();
        self.store.add_user(UserAccount {
            id,
            login: login.to_string(),
            name: person(first, last),
        });
        id
    }

    /// Account plus linked professor record; returns the professor ID.
    pub fn add_professor(&mut self, first: &str, last: &str, login: &str) -> ProfessorId {
        let user_id = self.add_user(first, last, login);
        let id = self.next_id();
        self.store.add_professor(Professor {
            id,
            user_id,
            name: person(first, last),
        });
        id
    }

    pub fn add_assignment(&mut self, professor_id: ProfessorId, subject_id: SubjectId, group_id: StudentGroupId) -> CourseAssignmentId {
        let id = self.next_id();
        self.store.add_assignment(CourseAssignment {
            id,
            student_group_id: group_id,
            subject_id,
            professor_id,
        });
        id
    }

    pub fn add_payment(&mut self, student_id: Option<StudentId>, amount: Decimal, status: PaymentStatus, date: DateTime<Utc>) -> PaymentId {
        let id = self.next_id();
        self.store.add_payment(Payment {
            id,
            amount,
            status,
            date,
            student_id,
        });
        id
    }

    pub fn link_group_subject(&mut self, group_id: StudentGroupId, subject_id: SubjectId) {
        self.store.link_group_subject(group_id, subject_id);
    }

    pub fn link_subject_professor(&mut self, subject_id: SubjectId, professor_id: ProfessorId) {
        self.store.link_subject_professor(subject_id, professor_id);
    }

    pub fn into_store(self) -> Arc<InMemoryStore> {
        Arc::new(self.store)
    }

    /// Dashboard service backed entirely by this fixture's store.
    pub fn into_service(self, clock: impl Clock + 'static) -> DashboardService {
        let store = self.into_store();
        DashboardService::builder()
            .students(store.clone())
            .professors(store.clone())
            .payments(store.clone())
            .assignments(store.clone())
            .groups(store.clone())
            .subjects(store.clone())
            .users(store)
            .clock(Arc::new(clock))
            .build()
    }
}

fn person(first: &str, last: &str) -> PersonName {
    PersonName {
        first_name: first.to_string(),
        last_name: last.to_string(),
    }
}
