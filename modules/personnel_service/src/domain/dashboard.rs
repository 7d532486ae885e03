//! Dashboard aggregates for the landing page
//!
//! Pure functions over already-fetched collections. Every top-N list is a
//! stable sort followed by a truncation, so equal dates keep input order.

use super::merge::NameIndex;
use crate::contract::{
    ActivityEntry, CareerNote, CareerStatus, Employee, GenderCount, PromotionDue, RankSexCount,
    RecentActivity, SalaryIncrementDue, Sex,
};
use chrono::{DateTime, NaiveDate, Utc};

/// Label for employees without a rank
pub const UNKNOWN_RANK: &str = "Tidak Diketahui";

/// Count employees by sex; unknown values are not counted
pub fn gender_count(employees: &[Employee]) -> GenderCount {
    employees
        .iter()
        .fold(GenderCount::default(), |mut acc, e| {
            match e.sex {
                Some(Sex::Male) => acc.male += 1,
                Some(Sex::Female) => acc.female += 1,
                None => {}
            }
            acc
        })
}

/// Employees per rank split by sex, ranks in order of first appearance
pub fn rank_sex_breakdown(employees: &[Employee]) -> Vec<RankSexCount> {
    let mut rows: Vec<RankSexCount> = Vec::new();

    for employee in employees {
        let rank = match employee.rank.trim() {
            "" => UNKNOWN_RANK,
            r => r,
        };

        let idx = match rows.iter().position(|row| row.rank == rank) {
            Some(idx) => idx,
            None => {
                rows.push(RankSexCount {
                    rank: rank.to_string(),
                    male: 0,
                    female: 0,
                });
                rows.len() - 1
            }
        };

        match employee.sex {
            Some(Sex::Male) => rows[idx].male += 1,
            Some(Sex::Female) => rows[idx].female += 1,
            None => {}
        }
    }

    rows
}

/// Soonest salary increments falling on or after `today`
pub fn upcoming_salary_increments(
    employees: &[Employee],
    today: NaiveDate,
    limit: usize,
) -> Vec<SalaryIncrementDue> {
    let mut due: Vec<SalaryIncrementDue> = employees
        .iter()
        .filter_map(|e| {
            let date = e.next_salary_increment?;
            (date >= today).then(|| SalaryIncrementDue {
                nip: e.nip.clone(),
                name: e.name.clone(),
                due: date,
            })
        })
        .collect();

    due.sort_by_key(|d| d.due);
    due.truncate(limit);
    due
}

/// Soonest promotion eligibilities among career notes marked "Layak".
/// Names fall back to the NIP; notes without a date sort last.
pub fn upcoming_promotions(
    notes: &[CareerNote],
    employees: &[Employee],
    limit: usize,
) -> Vec<PromotionDue> {
    let names = NameIndex::new(employees);

    let mut due: Vec<PromotionDue> = notes
        .iter()
        .filter(|n| n.status == Some(CareerStatus::Eligible))
        .map(|n| PromotionDue {
            nip: n.employee_ref.clone(),
            name: names.display_name(&n.employee_ref).to_string(),
            eligible_on: n.eligible_on,
            potential_rank: n.potential_rank.clone(),
        })
        .collect();

    due.sort_by_key(|d| (d.eligible_on.is_none(), d.eligible_on));
    due.truncate(limit);
    due
}

/// Most recent activity entries, in the order the backend reports them
pub fn recent_activity(
    entries: &[ActivityEntry],
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<RecentActivity> {
    entries
        .iter()
        .take(limit)
        .map(|entry| RecentActivity {
            relative: entry
                .at
                .map(|at| relative_time(now, at))
                .unwrap_or_else(|| "-".to_string()),
            entry: entry.clone(),
        })
        .collect()
}

/// "Baru saja", "N menit yang lalu" or "N jam yang lalu"
pub fn relative_time(now: DateTime<Utc>, at: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes();
    if minutes < 1 {
        "Baru saja".to_string()
    } else if minutes < 60 {
        format!("{} menit yang lalu", minutes)
    } else {
        format!("{} jam yang lalu", minutes / 60)
    }
}
