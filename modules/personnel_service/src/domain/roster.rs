//! Employee list filtering and ordering

use crate::contract::{Employee, RosterQuery, RosterSort};
use chrono::NaiveDate;
use std::cmp::Reverse;

/// Stand-in for a missing salary increment date when sorting
pub fn far_future() -> NaiveDate {
    NaiveDate::from_ymd_opt(2100, 1, 1).unwrap_or(NaiveDate::MAX)
}

/// Apply name search and sort order
pub fn apply(mut employees: Vec<Employee>, query: &RosterQuery) -> Vec<Employee> {
    if let Some(needle) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
    {
        employees.retain(|e| e.name.to_lowercase().contains(&needle));
    }

    match query.sort {
        RosterSort::Default => {}
        RosterSort::Grade => {
            employees.sort_by_key(|e| {
                let grade = e.grade();
                (grade.is_none(), Reverse(grade))
            });
        }
        RosterSort::SalaryIncrement => {
            let fallback = far_future();
            employees.sort_by_key(|e| e.next_salary_increment.unwrap_or(fallback));
        }
    }

    employees
}
