//! Dashboard reporting service.
//!
//! [`DashboardService`] computes the administrative dashboard snapshot and
//! ad hoc statistics from the current state of students, professors,
//! payments, and course assignments. Every operation is a pure
//! read/aggregate: the collaborating stores return entity snapshots, the
//! service filters/groups/sums them in memory and returns plain aggregate
//! records. Nothing is cached and nothing is mutated; each call rebuilds
//! its result from scratch.
//!
//! Revenue series are bucketed by calendar month in the server's local
//! time zone (see [`calendar`]); "revenue" always means the sum of
//! `Accepted` payment amounts.
//!
//! Role checks (the snapshot is an admin view, professor statistics a
//! professor view) and parameter parsing happen in the embedding HTTP
//! layer; this service only validates the arguments it is handed.

pub mod calendar;
pub mod models;

use bon::Builder;
use rust_decimal::Decimal;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::errors::{Error, Result};
use crate::models::{CourseAssignment, Payment, PaymentStatus, Professor, Student, StudentGroup, Subject};
use crate::stores::{CourseAssignmentStore, PaymentStore, ProfessorStore, StudentGroupStore, StudentStore, SubjectStore, UserStore};
use crate::types::{ProfessorId, StudentGroupId, StudentId, SubjectId};
use calendar::{Clock, MonthWindow, SystemClock};
pub use models::{
    AssignmentDetail, DashboardSnapshot, GroupRevenue, MonthlyRevenue, ProfessorActivity, ProfessorStatistics, RecentPayment,
    RevenueOverview,
};

/// Months of revenue history on the snapshot.
const SNAPSHOT_REVENUE_MONTHS: u32 = 4;
/// Months in the trailing revenue average.
const TRAILING_AVERAGE_MONTHS: u32 = 6;
/// Entries in the snapshot payment and activity listings.
const SNAPSHOT_LISTING_LIMIT: usize = 10;
/// Groups shown in the top revenue ranking.
const TOP_GROUP_LIMIT: usize = 5;

/// Default window for the standalone revenue listing, applied upstream.
pub const DEFAULT_REVENUE_MONTHS: i32 = 6;
/// Default size for the standalone recent listings, applied upstream.
pub const DEFAULT_LISTING_LIMIT: i64 = 10;

const UNKNOWN_STUDENT: &str = "Unknown Student";
const UNKNOWN_PROFESSOR: &str = "Unknown Professor";
const UNKNOWN_SUBJECT: &str = "Unknown Subject";
const UNKNOWN_GROUP: &str = "Unknown Group";

/// Read-only reporting facade over the campus stores.
///
/// Cloning is cheap (the handles are shared); concurrent calls are fully
/// independent because no call holds state between reads.
#[derive(Clone, Builder)]
pub struct DashboardService {
    pub students: Arc<dyn StudentStore>,
    pub professors: Arc<dyn ProfessorStore>,
    pub payments: Arc<dyn PaymentStore>,
    pub assignments: Arc<dyn CourseAssignmentStore>,
    pub groups: Arc<dyn StudentGroupStore>,
    pub subjects: Arc<dyn SubjectStore>,
    pub users: Arc<dyn UserStore>,
    /// Source of "now" for the calendar windows.
    #[builder(default = Arc::new(SystemClock))]
    pub clock: Arc<dyn Clock>,
}

impl DashboardService {
    /// Full dashboard snapshot: entity counts, payment figures, revenue
    /// series, recent listings, and the revenue overview block.
    #[instrument(skip(self), err)]
    pub async fn snapshot(&self) -> Result<DashboardSnapshot> {
        debug!("computing dashboard snapshot");

        let total_students = self.students.count().await?;
        let total_professors = self.professors.count().await?;
        let total_student_groups = self.groups.count().await?;
        let total_subjects = self.subjects.count().await?;

        let all_payments = self.payments.find_all().await?;
        let total_payments = all_payments.len() as i64;
        let pending_payments = all_payments.iter().filter(|p| p.status == PaymentStatus::Pending).count() as i64;
        let average_payment_amount = average_amount(&all_payments);

        let accepted: Vec<Payment> = all_payments.iter().filter(|p| p.status == PaymentStatus::Accepted).cloned().collect();
        let total_revenue: Decimal = accepted.iter().map(|p| p.amount).sum();

        let now = self.clock.now();
        let revenue_last_month = revenue_in(&accepted, &calendar::previous_month(now));
        let revenue_by_month = calendar::last_months(now, SNAPSHOT_REVENUE_MONTHS)
            .iter()
            .map(|window| monthly_revenue(&accepted, window))
            .collect();

        // Join tables for the enriched listings and groupings.
        let students = self.students.find_all().await?;
        let students_by_id: HashMap<StudentId, &Student> = students.iter().map(|s| (s.id, s)).collect();
        let groups = self.groups.find_all().await?;
        let groups_by_id: HashMap<StudentGroupId, &StudentGroup> = groups.iter().map(|g| (g.id, g)).collect();
        let professors = self.professors.find_all().await?;
        let professors_by_id: HashMap<ProfessorId, &Professor> = professors.iter().map(|p| (p.id, p)).collect();
        let subjects = self.subjects.find_all().await?;
        let subjects_by_id: HashMap<_, &Subject> = subjects.iter().map(|s| (s.id, s)).collect();

        let last_payments = self
            .payments
            .find_recent(SNAPSHOT_LISTING_LIMIT)
            .await?
            .into_iter()
            .map(|payment| resolve_payment(payment, &students_by_id))
            .collect();

        let professor_activities = self
            .assignments
            .find_all()
            .await?
            .iter()
            .take(SNAPSHOT_LISTING_LIMIT)
            .map(|assignment| resolve_activity(assignment, &professors_by_id, &subjects_by_id, &groups_by_id))
            .collect();

        // Group name -> member count, zero-filled so empty groups show up.
        let mut students_per_group: HashMap<String, i64> = groups.iter().map(|g| (g.name.clone(), 0)).collect();
        for student in &students {
            let Some(group_id) = student.group_id else { continue };
            if let Some(group) = groups_by_id.get(&group_id) {
                if let Some(count) = students_per_group.get_mut(&group.name) {
                    *count += 1;
                }
            }
        }

        // Status -> payment count, every enumeration value present.
        let mut payments_per_status: HashMap<PaymentStatus, i64> = PaymentStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for payment in &all_payments {
            *payments_per_status.entry(payment.status).or_insert(0) += 1;
        }

        let current_month_revenue = revenue_in(&accepted, &calendar::current_month(now));
        let revenue_overview = RevenueOverview {
            total_revenue,
            current_month_revenue,
            previous_month_revenue: revenue_last_month,
            month_over_month_change: percentage_change(current_month_revenue, revenue_last_month),
            average_monthly_revenue: trailing_average(&accepted, &calendar::last_months(now, TRAILING_AVERAGE_MONTHS)),
            top_revenue_by_student_group: top_group_revenue(&accepted, &students_by_id, &groups_by_id),
        };

        Ok(DashboardSnapshot {
            total_students,
            total_professors,
            total_student_groups,
            total_subjects,
            total_payments,
            pending_payments,
            average_payment_amount,
            total_revenue,
            revenue_last_month,
            revenue_by_month,
            last_payments,
            professor_activities,
            students_per_group,
            payments_per_status,
            revenue_overview,
        })
    }

    /// Accepted revenue for each of the last `months_back` calendar months,
    /// oldest first, the current partial month last.
    #[instrument(skip(self), err)]
    pub async fn revenue_by_month(&self, months_back: i32) -> Result<Vec<MonthlyRevenue>> {
        debug!("computing revenue for the last {months_back} months");
        if months_back <= 0 {
            return Err(Error::InvalidArgument {
                message: format!("months must be positive, got {months_back}"),
            });
        }

        let accepted: Vec<Payment> = self
            .payments
            .find_all()
            .await?
            .into_iter()
            .filter(|p| p.status == PaymentStatus::Accepted)
            .collect();

        Ok(calendar::last_months(self.clock.now(), months_back as u32)
            .iter()
            .map(|window| monthly_revenue(&accepted, window))
            .collect())
    }

    /// The `limit` most recent payments by date descending, with the paying
    /// student resolved to a display name.
    #[instrument(skip(self), err)]
    pub async fn recent_payments(&self, limit: i64) -> Result<Vec<RecentPayment>> {
        debug!("listing the {limit} most recent payments");
        let limit = positive_limit(limit)?;

        let recent = self.payments.find_recent(limit).await?;
        let students = self.students.find_all().await?;
        let students_by_id: HashMap<StudentId, &Student> = students.iter().map(|s| (s.id, s)).collect();

        Ok(recent.into_iter().map(|payment| resolve_payment(payment, &students_by_id)).collect())
    }

    /// The first `limit` course assignments in store order, resolved to
    /// professor/subject/group display names. The entity carries no
    /// timestamp, so store order is the only "recency" available.
    #[instrument(skip(self), err)]
    pub async fn recent_professor_activities(&self, limit: i64) -> Result<Vec<ProfessorActivity>> {
        debug!("listing the {limit} most recent professor activities");
        let limit = positive_limit(limit)?;

        let assignments = self.assignments.find_all().await?;
        let professors = self.professors.find_all().await?;
        let professors_by_id: HashMap<ProfessorId, &Professor> = professors.iter().map(|p| (p.id, p)).collect();
        let subjects = self.subjects.find_all().await?;
        let subjects_by_id: HashMap<_, &Subject> = subjects.iter().map(|s| (s.id, s)).collect();
        let groups = self.groups.find_all().await?;
        let groups_by_id: HashMap<StudentGroupId, &StudentGroup> = groups.iter().map(|g| (g.id, g)).collect();

        Ok(assignments
            .iter()
            .take(limit)
            .map(|assignment| resolve_activity(assignment, &professors_by_id, &subjects_by_id, &groups_by_id))
            .collect())
    }

    /// Teaching statistics for one professor: their assignments with group
    /// sizes attached, distinct group/subject counts, the total students
    /// taught, and the per-subject assignment distribution.
    #[instrument(skip(self), err)]
    pub async fn professor_statistics(&self, professor_id: ProfessorId) -> Result<ProfessorStatistics> {
        debug!("computing statistics for professor {professor_id}");
        if self.professors.find_by_id(professor_id).await?.is_none() {
            return Err(Error::NotFound {
                resource: "professor".to_string(),
                id: professor_id.to_string(),
            });
        }

        let assignments = self.assignments.find_by_professor(professor_id).await?;
        let subjects = self.subjects.find_all().await?;
        let subjects_by_id: HashMap<_, &Subject> = subjects.iter().map(|s| (s.id, s)).collect();
        let groups = self.groups.find_all().await?;
        let groups_by_id: HashMap<StudentGroupId, &StudentGroup> = groups.iter().map(|g| (g.id, g)).collect();

        // One size query per distinct group; the same group assigned twice
        // still contributes its size twice below.
        let mut group_sizes: HashMap<StudentGroupId, i64> = HashMap::new();
        for assignment in &assignments {
            if !group_sizes.contains_key(&assignment.student_group_id) {
                let size = self.students.count_by_group(assignment.student_group_id).await?;
                group_sizes.insert(assignment.student_group_id, size);
            }
        }

        let details: Vec<AssignmentDetail> = assignments
            .iter()
            .map(|assignment| AssignmentDetail {
                id: assignment.id,
                subject_id: assignment.subject_id,
                subject_name: subjects_by_id
                    .get(&assignment.subject_id)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string()),
                student_group_id: assignment.student_group_id,
                student_group_name: groups_by_id
                    .get(&assignment.student_group_id)
                    .map(|g| g.name.clone())
                    .unwrap_or_else(|| UNKNOWN_GROUP.to_string()),
                student_count: group_sizes.get(&assignment.student_group_id).copied().unwrap_or(0),
            })
            .collect();

        let total_student_groups = assignments.iter().map(|a| a.student_group_id).collect::<HashSet<_>>().len() as i64;
        let total_subjects = assignments.iter().map(|a| a.subject_id).collect::<HashSet<_>>().len() as i64;
        let total_students = details.iter().map(|d| d.student_count).sum();

        let mut subject_distribution: HashMap<String, i64> = HashMap::new();
        for detail in &details {
            *subject_distribution.entry(detail.subject_name.clone()).or_insert(0) += 1;
        }

        Ok(ProfessorStatistics {
            total_assignments: details.len() as i64,
            total_student_groups,
            total_subjects,
            total_students,
            assignments: details,
            subject_distribution,
        })
    }

    /// Resolves a login to its professor and delegates to
    /// [`professor_statistics`](Self::professor_statistics).
    #[instrument(skip(self), err)]
    pub async fn professor_statistics_by_login(&self, login: &str) -> Result<ProfessorStatistics> {
        debug!("computing statistics for professor with login {login}");
        let user = self.users.find_by_login(login).await?.ok_or_else(|| Error::NotFound {
            resource: "user".to_string(),
            id: login.to_string(),
        })?;
        let professor = self
            .professors
            .find_by_user_id(user.id)
            .await?
            .ok_or_else(|| Error::NotFound {
                resource: "professor".to_string(),
                id: login.to_string(),
            })?;

        self.professor_statistics(professor.id).await
    }
}

fn positive_limit(limit: i64) -> Result<usize> {
    if limit <= 0 {
        return Err(Error::InvalidArgument {
            message: format!("limit must be positive, got {limit}"),
        });
    }
    Ok(usize::try_from(limit).unwrap_or(usize::MAX))
}

/// Mean amount over all payments regardless of status, 2 decimal places.
fn average_amount(payments: &[Payment]) -> Decimal {
    if payments.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = payments.iter().map(|p| p.amount).sum();
    (total / Decimal::from(payments.len() as i64)).round_dp(2)
}

/// Sum of the accepted amounts dated inside the window.
fn revenue_in(accepted: &[Payment], window: &MonthWindow) -> Decimal {
    accepted.iter().filter(|p| window.contains(p.date)).map(|p| p.amount).sum()
}

fn monthly_revenue(accepted: &[Payment], window: &MonthWindow) -> MonthlyRevenue {
    MonthlyRevenue {
        month: window.month_name(),
        year: window.year(),
        revenue: revenue_in(accepted, window),
    }
}

/// Percentage change against `previous`, 0 when there is nothing to compare
/// against (avoids the division by zero on quiet months).
fn percentage_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    ((current - previous) / previous * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Mean monthly revenue across the given windows, 2 decimal places.
fn trailing_average(accepted: &[Payment], windows: &[MonthWindow]) -> Decimal {
    if windows.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = windows.iter().map(|window| revenue_in(accepted, window)).sum();
    (total / Decimal::from(windows.len() as i64)).round_dp(2)
}

/// Accepted revenue grouped by the paying student's group, ranked
/// descending and capped. Ties keep first-appearance order among the
/// accepted payments; payments that cannot be attributed to a group are
/// skipped.
fn top_group_revenue(
    accepted: &[Payment],
    students_by_id: &HashMap<StudentId, &Student>,
    groups_by_id: &HashMap<StudentGroupId, &StudentGroup>,
) -> Vec<GroupRevenue> {
    let mut order: Vec<StudentGroupId> = Vec::new();
    let mut revenue: HashMap<StudentGroupId, Decimal> = HashMap::new();
    for payment in accepted {
        let Some(student_id) = payment.student_id else { continue };
        let Some(student) = students_by_id.get(&student_id) else { continue };
        let Some(group_id) = student.group_id else { continue };
        match revenue.entry(group_id) {
            Entry::Occupied(mut entry) => *entry.get_mut() += payment.amount,
            Entry::Vacant(entry) => {
                order.push(group_id);
                entry.insert(payment.amount);
            }
        }
    }

    let mut ranked: Vec<GroupRevenue> = order
        .into_iter()
        .map(|group_id| GroupRevenue {
            group_name: groups_by_id
                .get(&group_id)
                .map(|g| g.name.clone())
                .unwrap_or_else(|| UNKNOWN_GROUP.to_string()),
            revenue: revenue.get(&group_id).copied().unwrap_or_default(),
        })
        .collect();
    // Stable sort keeps first-appearance order on ties.
    ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    ranked.truncate(TOP_GROUP_LIMIT);
    ranked
}

fn resolve_payment(payment: Payment, students_by_id: &HashMap<StudentId, &Student>) -> RecentPayment {
    let student = payment.student_id.and_then(|id| students_by_id.get(&id));
    RecentPayment {
        id: payment.id,
        amount: payment.amount,
        status: payment.status,
        date: payment.date,
        student_id: payment.student_id,
        student_name: student.map(|s| s.name.to_string()).unwrap_or_else(|| UNKNOWN_STUDENT.to_string()),
    }
}

fn resolve_activity(
    assignment: &CourseAssignment,
    professors_by_id: &HashMap<ProfessorId, &Professor>,
    subjects_by_id: &HashMap<SubjectId, &Subject>,
    groups_by_id: &HashMap<StudentGroupId, &StudentGroup>,
) -> ProfessorActivity {
    ProfessorActivity {
        id: assignment.id,
        professor_id: assignment.professor_id,
        professor_name: professors_by_id
            .get(&assignment.professor_id)
            .map(|p| p.name.to_string())
            .unwrap_or_else(|| UNKNOWN_PROFESSOR.to_string()),
        subject_name: subjects_by_id
            .get(&assignment.subject_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string()),
        student_group_id: assignment.student_group_id,
        student_group_name: groups_by_id
            .get(&assignment.student_group_id)
            .map(|g| g.name.clone())
            .unwrap_or_else(|| UNKNOWN_GROUP.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{CampusFixture, FixedClock, utc};
    use async_trait::async_trait;
    use chrono::TimeZone;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    /// Clock pinned to 2024-02-20 12:00 UTC, matching the ledger scenarios.
    fn february_clock() -> FixedClock {
        FixedClock::at(0, 2024, 2, 20, 12, 0)
    }

    #[test_log::test(tokio::test)]
    async fn test_empty_stores_produce_zeroed_snapshot() {
        let service = CampusFixture::new().into_service(february_clock());

        let snapshot = service.snapshot().await.unwrap();
        assert_eq!(snapshot.total_students, 0);
        assert_eq!(snapshot.total_professors, 0);
        assert_eq!(snapshot.total_student_groups, 0);
        assert_eq!(snapshot.total_subjects, 0);
        assert_eq!(snapshot.total_payments, 0);
        assert_eq!(snapshot.pending_payments, 0);
        assert_eq!(snapshot.average_payment_amount, Decimal::ZERO);
        assert_eq!(snapshot.total_revenue, Decimal::ZERO);
        assert_eq!(snapshot.revenue_last_month, Decimal::ZERO);
        assert_eq!(snapshot.revenue_by_month.len(), 4);
        assert!(snapshot.revenue_by_month.iter().all(|m| m.revenue == Decimal::ZERO));
        assert!(snapshot.last_payments.is_empty());
        assert!(snapshot.professor_activities.is_empty());
        assert!(snapshot.students_per_group.is_empty());
        assert_eq!(snapshot.payments_per_status.len(), 3);
        assert!(snapshot.payments_per_status.values().all(|&n| n == 0));

        let overview = &snapshot.revenue_overview;
        assert_eq!(overview.total_revenue, Decimal::ZERO);
        assert_eq!(overview.month_over_month_change, Decimal::ZERO);
        assert_eq!(overview.average_monthly_revenue, Decimal::ZERO);
        assert!(overview.top_revenue_by_student_group.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_snapshot_money_figures_follow_the_ledger() {
        let mut fixture = CampusFixture::new();
        let group = fixture.add_group("CS-101");
        let student = fixture.add_student("Ada", "Lovelace", Some(group));
        fixture.add_payment(Some(student), dec(100), PaymentStatus::Accepted, utc(2024, 1, 15, 9));
        fixture.add_payment(Some(student), dec(50), PaymentStatus::Pending, utc(2024, 1, 20, 9));
        fixture.add_payment(Some(student), dec(200), PaymentStatus::Accepted, utc(2024, 2, 10, 9));
        let service = fixture.into_service(february_clock());

        let snapshot = service.snapshot().await.unwrap();
        assert_eq!(snapshot.total_payments, 3);
        assert_eq!(snapshot.pending_payments, 1);
        assert_eq!(snapshot.total_revenue, dec(300));
        // 350 / 3, rounded to cents, over every status.
        assert_eq!(snapshot.average_payment_amount, Decimal::new(11667, 2));
        // January in full.
        assert_eq!(snapshot.revenue_last_month, dec(100));

        let by_month: Vec<(&str, Decimal)> = snapshot.revenue_by_month.iter().map(|m| (m.month.as_str(), m.revenue)).collect();
        assert_eq!(
            by_month,
            vec![
                ("NOVEMBER", Decimal::ZERO),
                ("DECEMBER", Decimal::ZERO),
                ("JANUARY", dec(100)),
                ("FEBRUARY", dec(200)),
            ]
        );

        assert_eq!(snapshot.payments_per_status[&PaymentStatus::Accepted], 2);
        assert_eq!(snapshot.payments_per_status[&PaymentStatus::Pending], 1);
        assert_eq!(snapshot.payments_per_status[&PaymentStatus::Rejected], 0);

        let overview = &snapshot.revenue_overview;
        assert_eq!(overview.total_revenue, dec(300));
        assert_eq!(overview.current_month_revenue, dec(200));
        assert_eq!(overview.previous_month_revenue, dec(100));
        // (200 - 100) / 100, as a percentage.
        assert_eq!(overview.month_over_month_change, dec(100));
        // (0 + 0 + 0 + 0 + 100 + 200) / 6.
        assert_eq!(overview.average_monthly_revenue, dec(50));
    }

    #[test_log::test(tokio::test)]
    async fn test_snapshot_groupings_resolve_names() {
        let mut fixture = CampusFixture::new();
        let cs = fixture.add_group("CS-101");
        fixture.add_group("MATH-201");
        let ada = fixture.add_student("Ada", "Lovelace", Some(cs));
        fixture.add_student("Alan", "Turing", Some(cs));
        fixture.add_student("Grace", "Hopper", None);
        let algebra = fixture.add_subject("Algebra");
        let knuth = fixture.add_professor("Donald", "Knuth", "dknuth");
        fixture.add_assignment(knuth, algebra, cs);
        fixture.add_payment(Some(ada), dec(75), PaymentStatus::Accepted, utc(2024, 2, 5, 10));
        let service = fixture.into_service(february_clock());

        let snapshot = service.snapshot().await.unwrap();
        assert_eq!(snapshot.total_students, 3);
        assert_eq!(snapshot.total_professors, 1);
        assert_eq!(snapshot.total_student_groups, 2);
        assert_eq!(snapshot.total_subjects, 1);

        // Empty groups are listed with zero; ungrouped students are not.
        assert_eq!(snapshot.students_per_group["CS-101"], 2);
        assert_eq!(snapshot.students_per_group["MATH-201"], 0);
        assert_eq!(snapshot.students_per_group.len(), 2);

        assert_eq!(snapshot.last_payments.len(), 1);
        assert_eq!(snapshot.last_payments[0].student_name, "Ada Lovelace");

        assert_eq!(snapshot.professor_activities.len(), 1);
        let activity = &snapshot.professor_activities[0];
        assert_eq!(activity.professor_name, "Donald Knuth");
        assert_eq!(activity.subject_name, "Algebra");
        assert_eq!(activity.student_group_name, "CS-101");
    }

    #[test_log::test(tokio::test)]
    async fn test_revenue_by_month_returns_exactly_the_window() {
        let mut fixture = CampusFixture::new();
        let group = fixture.add_group("CS-101");
        let student = fixture.add_student("Ada", "Lovelace", Some(group));
        // One accepted payment per month, growing amounts.
        fixture.add_payment(Some(student), dec(10), PaymentStatus::Accepted, utc(2023, 11, 3, 8));
        fixture.add_payment(Some(student), dec(20), PaymentStatus::Accepted, utc(2023, 12, 3, 8));
        fixture.add_payment(Some(student), dec(30), PaymentStatus::Accepted, utc(2024, 1, 3, 8));
        fixture.add_payment(Some(student), dec(40), PaymentStatus::Accepted, utc(2024, 2, 3, 8));
        // Rejected money never counts.
        fixture.add_payment(Some(student), dec(999), PaymentStatus::Rejected, utc(2024, 2, 4, 8));
        let service = fixture.into_service(february_clock());

        let months = service.revenue_by_month(4).await.unwrap();
        assert_eq!(months.len(), 4);
        let labels: Vec<(&str, i32, Decimal)> = months.iter().map(|m| (m.month.as_str(), m.year, m.revenue)).collect();
        assert_eq!(
            labels,
            vec![
                ("NOVEMBER", 2023, dec(10)),
                ("DECEMBER", 2023, dec(20)),
                ("JANUARY", 2024, dec(30)),
                ("FEBRUARY", 2024, dec(40)),
            ]
        );

        // A single month is just the current partial one.
        let current = service.revenue_by_month(1).await.unwrap();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].month, "FEBRUARY");
        assert_eq!(current[0].revenue, dec(40));
    }

    #[test_log::test(tokio::test)]
    async fn test_revenue_months_are_half_open_windows() {
        let mut fixture = CampusFixture::new();
        let group = fixture.add_group("CS-101");
        let student = fixture.add_student("Ada", "Lovelace", Some(group));
        // Exactly at the January/February boundary: belongs to February.
        fixture.add_payment(
            Some(student),
            dec(5),
            PaymentStatus::Accepted,
            chrono::Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        );
        // One second earlier: January.
        fixture.add_payment(
            Some(student),
            dec(7),
            PaymentStatus::Accepted,
            chrono::Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap(),
        );
        let service = fixture.into_service(february_clock());

        let months = service.revenue_by_month(2).await.unwrap();
        assert_eq!(months[0].month, "JANUARY");
        assert_eq!(months[0].revenue, dec(7));
        assert_eq!(months[1].month, "FEBRUARY");
        assert_eq!(months[1].revenue, dec(5));
    }

    #[test_log::test(tokio::test)]
    async fn test_revenue_by_month_rejects_non_positive_months() {
        let service = CampusFixture::new().into_service(february_clock());

        for months in [0, -3] {
            let err = service.revenue_by_month(months).await.unwrap_err();
            assert!(matches!(err, Error::InvalidArgument { .. }), "months={months} gave {err:?}");
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_month_over_month_change_is_zero_without_previous_revenue() {
        let mut fixture = CampusFixture::new();
        let group = fixture.add_group("CS-101");
        let student = fixture.add_student("Ada", "Lovelace", Some(group));
        // Revenue only in the current month.
        fixture.add_payment(Some(student), dec(500), PaymentStatus::Accepted, utc(2024, 2, 5, 10));
        let service = fixture.into_service(february_clock());

        let overview = service.snapshot().await.unwrap().revenue_overview;
        assert_eq!(overview.previous_month_revenue, Decimal::ZERO);
        assert_eq!(overview.current_month_revenue, dec(500));
        assert_eq!(overview.month_over_month_change, Decimal::ZERO);
    }

    #[test_log::test(tokio::test)]
    async fn test_top_groups_ranked_by_revenue_descending() {
        let mut fixture = CampusFixture::new();
        let a = fixture.add_group("A");
        let b = fixture.add_group("B");
        let c = fixture.add_group("C");
        let in_a = fixture.add_student("Ada", "Lovelace", Some(a));
        let in_b = fixture.add_student("Alan", "Turing", Some(b));
        let in_c = fixture.add_student("Grace", "Hopper", Some(c));
        fixture.add_payment(Some(in_a), dec(500), PaymentStatus::Accepted, utc(2024, 2, 1, 8));
        fixture.add_payment(Some(in_b), dec(300), PaymentStatus::Accepted, utc(2024, 2, 2, 8));
        fixture.add_payment(Some(in_c), dec(900), PaymentStatus::Accepted, utc(2024, 2, 3, 8));
        let service = fixture.into_service(february_clock());

        let top = service.snapshot().await.unwrap().revenue_overview.top_revenue_by_student_group;
        let ranked: Vec<(&str, Decimal)> = top.iter().map(|g| (g.group_name.as_str(), g.revenue)).collect();
        assert_eq!(ranked, vec![("C", dec(900)), ("A", dec(500)), ("B", dec(300))]);
    }

    #[test_log::test(tokio::test)]
    async fn test_top_groups_capped_at_five_with_stable_ties() {
        let mut fixture = CampusFixture::new();
        // Six groups; two of them tie at 40.
        let amounts: [(&str, i64); 6] = [("G1", 10), ("G2", 40), ("G3", 40), ("G4", 70), ("G5", 55), ("G6", 25)];
        for (name, amount) in amounts {
            let group = fixture.add_group(name);
            let student = fixture.add_student("Student", name, Some(group));
            fixture.add_payment(Some(student), dec(amount), PaymentStatus::Accepted, utc(2024, 2, 5, 9));
        }
        let service = fixture.into_service(february_clock());

        let top = service.snapshot().await.unwrap().revenue_overview.top_revenue_by_student_group;
        let ranked: Vec<&str> = top.iter().map(|g| g.group_name.as_str()).collect();
        // Five entries at most; G2 appeared before G3, so the tie keeps
        // that order; G1 falls off the end.
        assert_eq!(ranked, vec!["G4", "G5", "G2", "G3", "G6"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_group_revenue_skips_unattributable_payments() {
        let mut fixture = CampusFixture::new();
        let group = fixture.add_group("CS-101");
        let grouped = fixture.add_student("Ada", "Lovelace", Some(group));
        let ungrouped = fixture.add_student("Alan", "Turing", None);
        fixture.add_payment(Some(grouped), dec(100), PaymentStatus::Accepted, utc(2024, 2, 5, 9));
        // No student, no group, or only pending: all ignored.
        fixture.add_payment(None, dec(40), PaymentStatus::Accepted, utc(2024, 2, 5, 9));
        fixture.add_payment(Some(ungrouped), dec(40), PaymentStatus::Accepted, utc(2024, 2, 5, 9));
        fixture.add_payment(Some(grouped), dec(40), PaymentStatus::Pending, utc(2024, 2, 5, 9));
        let service = fixture.into_service(february_clock());

        let top = service.snapshot().await.unwrap().revenue_overview.top_revenue_by_student_group;
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].group_name, "CS-101");
        assert_eq!(top[0].revenue, dec(100));
    }

    #[test_log::test(tokio::test)]
    async fn test_recent_payments_sorted_and_limited() {
        let mut fixture = CampusFixture::new();
        let group = fixture.add_group("CS-101");
        let student = fixture.add_student("Ada", "Lovelace", Some(group));
        for day in 1..=12 {
            fixture.add_payment(Some(student), dec(day as i64), PaymentStatus::Accepted, utc(2024, 2, day, 9));
        }
        let service = fixture.into_service(february_clock());

        let recent = service.recent_payments(10).await.unwrap();
        assert_eq!(recent.len(), 10);
        let amounts: Vec<Decimal> = recent.iter().map(|p| p.amount).collect();
        let expected: Vec<Decimal> = (3..=12).rev().map(dec).collect();
        assert_eq!(amounts, expected);
        assert!(recent.iter().all(|p| p.student_name == "Ada Lovelace"));

        let top_three = service.recent_payments(3).await.unwrap();
        assert_eq!(top_three.len(), 3);
        assert_eq!(top_three[0].amount, dec(12));
    }

    #[test_log::test(tokio::test)]
    async fn test_recent_payments_fall_back_on_unknown_students() {
        let mut fixture = CampusFixture::new();
        fixture.add_payment(None, dec(10), PaymentStatus::Pending, utc(2024, 2, 5, 9));
        fixture.add_payment(Some(4242), dec(20), PaymentStatus::Accepted, utc(2024, 2, 6, 9));
        let service = fixture.into_service(february_clock());

        let recent = service.recent_payments(10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert!(recent.iter().all(|p| p.student_name == "Unknown Student"));
        assert_eq!(recent[0].student_id, Some(4242));
        assert_eq!(recent[1].student_id, None);
    }

    #[test_log::test(tokio::test)]
    async fn test_recent_payments_reject_non_positive_limits() {
        let service = CampusFixture::new().into_service(february_clock());

        for limit in [0, -5] {
            let err = service.recent_payments(limit).await.unwrap_err();
            assert!(matches!(err, Error::InvalidArgument { .. }), "limit={limit} gave {err:?}");
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_professor_activities_keep_store_order_and_limit() {
        let mut fixture = CampusFixture::new();
        let group = fixture.add_group("CS-101");
        let algebra = fixture.add_subject("Algebra");
        let physics = fixture.add_subject("Physics");
        let knuth = fixture.add_professor("Donald", "Knuth", "dknuth");
        let first = fixture.add_assignment(knuth, algebra, group);
        let second = fixture.add_assignment(knuth, physics, group);
        let third = fixture.add_assignment(knuth, algebra, group);
        let service = fixture.into_service(february_clock());

        let activities = service.recent_professor_activities(10).await.unwrap();
        let ids: Vec<_> = activities.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![first, second, third]);
        assert_eq!(activities[0].professor_name, "Donald Knuth");
        assert_eq!(activities[1].subject_name, "Physics");

        let limited = service.recent_professor_activities(2).await.unwrap();
        assert_eq!(limited.len(), 2);

        let err = service.recent_professor_activities(0).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test_log::test(tokio::test)]
    async fn test_professor_activities_fall_back_on_dangling_references() {
        let mut fixture = CampusFixture::new();
        // References to records that were never created.
        fixture.add_assignment(999, 998, 997);
        let service = fixture.into_service(february_clock());

        let activities = service.recent_professor_activities(10).await.unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].professor_name, "Unknown Professor");
        assert_eq!(activities[0].subject_name, "Unknown Subject");
        assert_eq!(activities[0].student_group_name, "Unknown Group");
        assert_eq!(activities[0].professor_id, 999);
    }

    #[test_log::test(tokio::test)]
    async fn test_professor_statistics_count_distincts_but_not_students() {
        let mut fixture = CampusFixture::new();
        let cs = fixture.add_group("CS-101");
        let math = fixture.add_group("MATH-201");
        fixture.add_student("Ada", "Lovelace", Some(cs));
        fixture.add_student("Alan", "Turing", Some(cs));
        for i in 0..3 {
            fixture.add_student("Math", &format!("Student{i}"), Some(math));
        }
        let algebra = fixture.add_subject("Algebra");
        let physics = fixture.add_subject("Physics");
        let knuth = fixture.add_professor("Donald", "Knuth", "dknuth");
        fixture.add_assignment(knuth, algebra, cs);
        fixture.add_assignment(knuth, algebra, math);
        fixture.add_assignment(knuth, physics, cs);
        let service = fixture.into_service(february_clock());

        let stats = service.professor_statistics(knuth).await.unwrap();
        assert_eq!(stats.total_assignments, 3);
        assert_eq!(stats.total_student_groups, 2);
        assert_eq!(stats.total_subjects, 2);
        // CS-101 counts once per assignment: 2 + 3 + 2.
        assert_eq!(stats.total_students, 7);

        assert_eq!(stats.assignments.len(), 3);
        assert_eq!(stats.assignments[0].subject_name, "Algebra");
        assert_eq!(stats.assignments[0].student_group_name, "CS-101");
        assert_eq!(stats.assignments[0].student_count, 2);
        assert_eq!(stats.assignments[1].student_count, 3);

        assert_eq!(stats.subject_distribution["Algebra"], 2);
        assert_eq!(stats.subject_distribution["Physics"], 1);
    }

    #[test_log::test(tokio::test)]
    async fn test_professor_statistics_unknown_id_is_not_found() {
        let service = CampusFixture::new().into_service(february_clock());

        let err = service.professor_statistics(404).await.unwrap_err();
        match err {
            Error::NotFound { resource, id } => {
                assert_eq!(resource, "professor");
                assert_eq!(id, "404");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_professor_statistics_resolve_by_login() {
        let mut fixture = CampusFixture::new();
        let cs = fixture.add_group("CS-101");
        fixture.add_student("Ada", "Lovelace", Some(cs));
        let algebra = fixture.add_subject("Algebra");
        let knuth = fixture.add_professor("Donald", "Knuth", "dknuth");
        fixture.add_assignment(knuth, algebra, cs);
        let service = fixture.into_service(february_clock());

        let stats = service.professor_statistics_by_login("dknuth").await.unwrap();
        assert_eq!(stats.total_assignments, 1);
        assert_eq!(stats.assignments[0].student_count, 1);
    }

    #[test_log::test(tokio::test)]
    async fn test_statistics_by_login_not_found_cases() {
        let mut fixture = CampusFixture::new();
        // An account exists but no professor is linked to it.
        fixture.add_user("Ada", "Lovelace", "alovelace");
        let service = fixture.into_service(february_clock());

        let err = service.professor_statistics_by_login("ghost").await.unwrap_err();
        match err {
            Error::NotFound { resource, id } => {
                assert_eq!(resource, "user");
                assert_eq!(id, "ghost");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }

        let err = service.professor_statistics_by_login("alovelace").await.unwrap_err();
        match err {
            Error::NotFound { resource, id } => {
                assert_eq!(resource, "professor");
                assert_eq!(id, "alovelace");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    struct FailingPayments;

    #[async_trait]
    impl PaymentStore for FailingPayments {
        async fn find_all(&self) -> crate::stores::Result<Vec<Payment>> {
            Err(crate::stores::StoreError::Query {
                message: "payments offline".to_string(),
                source: anyhow::anyhow!("connection reset"),
            })
        }

        async fn find_recent(&self, _limit: usize) -> crate::stores::Result<Vec<Payment>> {
            self.find_all().await
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_store_failures_surface_transparently() {
        let store = CampusFixture::new().into_store();
        let service = DashboardService::builder()
            .students(store.clone())
            .professors(store.clone())
            .payments(Arc::new(FailingPayments))
            .assignments(store.clone())
            .groups(store.clone())
            .subjects(store.clone())
            .users(store)
            .clock(Arc::new(february_clock()))
            .build();

        let err = service.recent_payments(5).await.unwrap_err();
        assert!(matches!(err, Error::Store(_)));
        assert_eq!(err.user_message(), "Internal server error");

        let err = service.snapshot().await.unwrap_err();
        assert!(matches!(err, Error::Store(_)));
    }

    #[test_log::test(tokio::test)]
    async fn test_snapshot_serializes_for_the_wire() {
        let mut fixture = CampusFixture::new();
        let group = fixture.add_group("CS-101");
        let student = fixture.add_student("Ada", "Lovelace", Some(group));
        fixture.add_payment(Some(student), dec(100), PaymentStatus::Accepted, utc(2024, 2, 5, 9));
        let service = fixture.into_service(february_clock());

        let snapshot = service.snapshot().await.unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["total_students"], 1);
        assert_eq!(json["payments_per_status"]["ACCEPTED"], 1);
        assert_eq!(json["payments_per_status"]["REJECTED"], 0);
        assert_eq!(json["last_payments"][0]["student_name"], "Ada Lovelace");
        assert_eq!(json["last_payments"][0]["status"], "ACCEPTED");
        assert_eq!(json["revenue_overview"]["top_revenue_by_student_group"][0]["group_name"], "CS-101");
        // The placeholder payment-method split is not part of the contract.
        assert!(json["revenue_overview"].get("revenue_by_payment_method").is_none());
    }
}
