//! Record merger - joins employee-keyed rows with employee names
//!
//! Every list view goes through [`merge`]. The join is total: a reference that
//! does not resolve keeps the raw reference as its display name.

use crate::contract::{
    CareerNote, EducationRecord, Employee, Merged, PositionAssignment, ResolvedPosition,
    TrainingRecord,
};
use std::collections::HashMap;

/// Rows that reference an employee by NIP
pub trait EmployeeRef {
    fn employee_ref(&self) -> &str;
}

impl EmployeeRef for EducationRecord {
    fn employee_ref(&self) -> &str {
        &self.employee_ref
    }
}

impl EmployeeRef for TrainingRecord {
    fn employee_ref(&self) -> &str {
        &self.employee_ref
    }
}

impl EmployeeRef for CareerNote {
    fn employee_ref(&self) -> &str {
        &self.employee_ref
    }
}

impl EmployeeRef for PositionAssignment {
    fn employee_ref(&self) -> &str {
        &self.employee_ref
    }
}

impl EmployeeRef for ResolvedPosition {
    fn employee_ref(&self) -> &str {
        &self.position.employee_ref
    }
}

/// NIP -> name lookup; the first employee with a given NIP wins
pub struct NameIndex<'a> {
    names: HashMap<&'a str, &'a str>,
}

impl<'a> NameIndex<'a> {
    pub fn new(employees: &'a [Employee]) -> Self {
        let mut names = HashMap::with_capacity(employees.len());
        for employee in employees {
            names
                .entry(employee.nip.as_str())
                .or_insert(employee.name.as_str());
        }
        Self { names }
    }

    /// Resolved name, or `employee_ref` itself when unknown
    pub fn display_name<'r>(&self, employee_ref: &'r str) -> &'r str
    where
        'a: 'r,
    {
        self.names.get(employee_ref).copied().unwrap_or(employee_ref)
    }

    pub fn contains(&self, employee_ref: &str) -> bool {
        self.names.contains_key(employee_ref)
    }
}

/// Join `rows` with `employees`, preserving order and cardinality
pub fn merge<T>(rows: &[T], employees: &[Employee]) -> Vec<Merged<T>>
where
    T: EmployeeRef + Clone,
{
    let index = NameIndex::new(employees);
    let merged: Vec<Merged<T>> = rows
        .iter()
        .map(|row| Merged {
            display_name: index.display_name(row.employee_ref()).to_string(),
            record: row.clone(),
        })
        .collect();

    let unresolved = rows
        .iter()
        .filter(|row| !index.contains(row.employee_ref()))
        .count();
    if unresolved > 0 {
        tracing::debug!(
            rows = rows.len(),
            unresolved,
            "Employee references fell back to raw identifiers"
        );
    }

    merged
}

/// Case-insensitive search over display name and raw reference.
/// A blank term keeps every row.
pub fn search_by_display_name<T>(rows: Vec<Merged<T>>, term: Option<&str>) -> Vec<Merged<T>>
where
    T: EmployeeRef,
{
    let needle = match term.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_lowercase(),
        _ => return rows,
    };

    rows.into_iter()
        .filter(|row| {
            row.display_name.to_lowercase().contains(&needle)
                || row.record.employee_ref().to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(nip: &str, name: &str) -> Employee {
        Employee {
            nip: nip.to_string(),
            name: name.to_string(),
            birth_place_date: String::new(),
            last_education: String::new(),
            rank: String::new(),
            next_salary_increment: None,
            rank_effective_date: None,
            sex: None,
            religion: None,
            employment_status: None,
            base_salary: 0,
            children: 0,
        }
    }

    fn education(id: &str, employee_ref: &str, level: &str) -> EducationRecord {
        EducationRecord {
            id: id.to_string(),
            employee_ref: employee_ref.to_string(),
            level: level.to_string(),
            field_of_study: String::new(),
            institution: String::new(),
            graduation_year: None,
        }
    }

    #[test]
    fn test_merge_resolves_and_falls_back() {
        let employees = vec![employee("1", "Budi")];
        let rows = vec![education("e1", "1", "S1"), education("e2", "9", "S2")];

        let merged = merge(&rows, &employees);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].display_name, "Budi");
        assert_eq!(merged[0].record, rows[0]);
        assert_eq!(merged[1].display_name, "9");
        assert_eq!(merged[1].record, rows[1]);
    }

    #[test]
    fn test_merge_with_no_employees_falls_back_everywhere() {
        let rows = vec![education("e1", "198701", "S1"), education("e2", "", "D3")];

        let merged = merge(&rows, &[]);

        assert_eq!(merged[0].display_name, "198701");
        assert_eq!(merged[1].display_name, "");
    }

    #[test]
    fn test_merge_first_duplicate_wins() {
        let employees = vec![employee("7", "Ani"), employee("7", "Ana")];
        let rows = vec![education("e1", "7", "S1")];

        assert_eq!(merge(&rows, &employees)[0].display_name, "Ani");
    }

    #[test]
    fn test_merge_match_is_case_sensitive_and_exact() {
        let employees = vec![employee("abc", "Citra")];
        let rows = vec![education("e1", "ABC", "S1"), education("e2", "abc ", "S1")];

        let merged = merge(&rows, &employees);
        assert_eq!(merged[0].display_name, "ABC");
        assert_eq!(merged[1].display_name, "abc ");
    }

    #[test]
    fn test_merge_preserves_order() {
        let employees = vec![employee("2", "Dewi"), employee("1", "Budi")];
        let rows: Vec<_> = (0..5)
            .map(|i| education(&format!("e{i}"), if i % 2 == 0 { "1" } else { "2" }, "S1"))
            .collect();

        let merged = merge(&rows, &employees);
        let ids: Vec<&str> = merged.iter().map(|m| m.record.id.as_str()).collect();
        assert_eq!(ids, vec!["e0", "e1", "e2", "e3", "e4"]);
    }

    #[test]
    fn test_search_matches_name_or_reference() {
        let employees = vec![employee("1", "Budi Santoso"), employee("2", "Dewi")];
        let rows = vec![
            education("e1", "1", "S1"),
            education("e2", "2", "S1"),
            education("e3", "3301", "S1"),
        ];
        let merged = merge(&rows, &employees);

        let by_name = search_by_display_name(merged.clone(), Some("santoso"));
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].record.id, "e1");

        let by_ref = search_by_display_name(merged.clone(), Some("330"));
        assert_eq!(by_ref.len(), 1);
        assert_eq!(by_ref[0].record.id, "e3");

        assert_eq!(search_by_display_name(merged, Some("  ")).len(), 3);
    }
}
