//! Advisory checks run before a record is submitted upstream
//!
//! The backend does not promise to enforce any of these; they mirror what the
//! administration forms check.

use crate::contract::{EducationRecord, PersonnelError};

/// Validate NIP format: non-empty, ASCII digits only
pub fn validate_nip(nip: &str) -> Result<(), PersonnelError> {
    let nip = nip.trim();
    if nip.is_empty() {
        return Err(PersonnelError::validation("nip", "NIP cannot be empty"));
    }

    if !nip.chars().all(|c| c.is_ascii_digit()) {
        return Err(PersonnelError::validation(
            "nip",
            format!("NIP '{}' must contain digits only", nip),
        ));
    }

    Ok(())
}

/// Validate a 4-digit year
pub fn validate_year(field: &str, year: Option<i32>) -> Result<(), PersonnelError> {
    match year {
        Some(y) if (1000..=9999).contains(&y) => Ok(()),
        Some(y) => Err(PersonnelError::validation(
            field,
            format!("{} is not a 4-digit year", y),
        )),
        None => Err(PersonnelError::validation(field, "year is required")),
    }
}

fn require(field: &str, value: &str) -> Result<(), PersonnelError> {
    if value.trim().is_empty() {
        return Err(PersonnelError::validation(field, format!("{} is required", field)));
    }
    Ok(())
}

/// True when `existing` already holds the candidate's (employee, level) pair.
/// The record being edited (same id) is not a clash.
pub fn education_level_taken(existing: &[EducationRecord], candidate: &EducationRecord) -> bool {
    let nip = candidate.employee_ref.trim();
    let level = candidate.level.trim().to_lowercase();

    existing.iter().any(|record| {
        (candidate.id.is_empty() || record.id != candidate.id)
            && record.employee_ref.trim() == nip
            && record.level.trim().to_lowercase() == level
    })
}

/// Full pre-submission check for an education record
pub fn validate_education_entry(
    existing: &[EducationRecord],
    candidate: &EducationRecord,
) -> Result<(), PersonnelError> {
    validate_nip(&candidate.employee_ref)?;
    require("level", &candidate.level)?;
    require("field_of_study", &candidate.field_of_study)?;
    require("institution", &candidate.institution)?;
    validate_year("graduation_year", candidate.graduation_year)?;

    if education_level_taken(existing, candidate) {
        return Err(PersonnelError::validation(
            "level",
            format!(
                "employee {} already has education level {}",
                candidate.employee_ref.trim(),
                candidate.level.trim().to_uppercase()
            ),
        ));
    }

    Ok(())
}
