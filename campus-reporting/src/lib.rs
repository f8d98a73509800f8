//! # campus-reporting: Dashboard Aggregation for Campus Administration
//!
//! `campus-reporting` computes the administrative dashboard and professor
//! statistics for a campus management platform. It turns raw students,
//! professors, student groups, subjects, course assignments, and payment
//! records into the aggregate figures an administrator sees: entity counts,
//! revenue developments, top performing groups, and recent activity feeds.
//!
//! ## Overview
//!
//! Campus back offices need one place that answers "how is the school
//! doing": how many students are enrolled, how much tuition came in this
//! month versus last, which groups bring in the most revenue, and what the
//! teaching staff is assigned to. Those answers live scattered across
//! entity stores; this crate is the read side that joins and folds them
//! into ready-to-render aggregates.
//!
//! ### What It Computes
//!
//! The central entry point is [`DashboardService`]. One call to
//! [`DashboardService::snapshot`] produces the full dashboard: totals per
//! entity, pending payment counts, the average payment amount, accepted
//! revenue overall and per calendar month, the ten most recent payments and
//! course assignments with display names resolved, per-group student
//! counts, per-status payment counts, and a revenue overview block with
//! month-over-month change, a six month trailing average, and the top five
//! revenue generating student groups. Narrower operations serve the
//! individual dashboard widgets, and professor-facing statistics summarize
//! one professor's assignments with group sizes and a subject distribution.
//!
//! All operations are read-only aggregations. Nothing is cached or
//! mutated; every call recomputes from the stores' current state, so the
//! figures are as fresh as the data underneath.
//!
//! ## Architecture
//!
//! Entity access goes through narrow async store traits ([`stores`]), one
//! per entity family. Production code implements them against whatever
//! persistence the platform uses; [`stores::memory::InMemoryStore`]
//! implements all of them for tests and demos. The service owns `Arc`
//! handles to the traits, so any mix of backends can be wired in.
//!
//! Money is [`rust_decimal::Decimal`] end to end. Sums stay exact; only
//! derived figures (averages and percentages) are rounded, to two decimal
//! places. "Revenue" always means the sum of accepted payment amounts,
//! bucketed by calendar month in the server's local time zone. The clock
//! is injected through [`dashboard::calendar::Clock`], which keeps the
//! month windows deterministic under test.
//!
//! Operations return [`errors::Error`], which separates not-found and
//! invalid-argument conditions from store failures. The embedding layer
//! maps these onto its transport, using [`Error::user_message`] for the
//! client-safe rendering.

pub mod dashboard;
pub mod errors;
pub mod models;
pub mod stores;
mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use dashboard::{DashboardService, DashboardSnapshot, ProfessorStatistics};
pub use errors::{Error, Result};
pub use types::{CourseAssignmentId, PaymentId, ProfessorId, StudentGroupId, StudentId, SubjectId, UserId};
