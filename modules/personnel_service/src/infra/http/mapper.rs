//! Conversions from backend records to contract models

use super::wire::{RawActivity, RawCareerNote, RawEducation, RawEmployee, RawPosition, RawTraining};
use crate::contract::{
    ActivityEntry, CareerNote, CareerStatus, EducationRecord, Employee, EmploymentStatus,
    PositionAssignment, Religion, Sex, TrainingRecord,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// `YYYY-MM-DD`, optionally followed by a time part; unparseable input is unknown
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Some(at) = parse_timestamp(raw) {
        return Some(at.date_naive());
    }
    raw.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// RFC 3339, or a naive timestamp taken as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn non_blank(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl From<RawEmployee> for Employee {
    fn from(raw: RawEmployee) -> Self {
        Self {
            next_salary_increment: parse_date(&raw.next_salary_increment),
            rank_effective_date: parse_date(&raw.rank_effective_date),
            sex: Sex::parse(&raw.sex),
            religion: Religion::parse(&raw.religion),
            employment_status: EmploymentStatus::parse(&raw.employment_status),
            children: u32::try_from(raw.children).unwrap_or(u32::MAX),
            nip: raw.nip,
            name: raw.name,
            birth_place_date: raw.birth_place_date,
            last_education: raw.last_education,
            rank: raw.rank,
            base_salary: raw.base_salary,
        }
    }
}

impl From<RawEducation> for EducationRecord {
    fn from(raw: RawEducation) -> Self {
        Self {
            id: raw.id,
            employee_ref: raw.employee_ref,
            level: raw.level,
            field_of_study: raw.field_of_study,
            institution: raw.institution,
            graduation_year: raw.graduation_year,
        }
    }
}

impl From<RawTraining> for TrainingRecord {
    fn from(raw: RawTraining) -> Self {
        Self {
            id: raw.id,
            employee_ref: raw.employee_ref,
            name: raw.name,
            year: raw.year,
            organizer: raw.organizer,
        }
    }
}

impl From<RawCareerNote> for CareerNote {
    fn from(raw: RawCareerNote) -> Self {
        Self {
            eligible_on: parse_date(&raw.eligible_on),
            status: CareerStatus::parse(&raw.status),
            id: raw.id,
            employee_ref: raw.employee_ref,
            current_rank: raw.current_rank,
            potential_rank: raw.potential_rank,
            note: raw.note,
        }
    }
}

impl From<RawPosition> for PositionAssignment {
    fn from(raw: RawPosition) -> Self {
        Self {
            effective_date: parse_date(&raw.effective_date),
            parent_id: non_blank(raw.parent_id),
            id: raw.id,
            employee_ref: raw.employee_ref,
            title: raw.title,
        }
    }
}

impl From<RawActivity> for ActivityEntry {
    fn from(raw: RawActivity) -> Self {
        Self {
            at: parse_timestamp(&raw.at),
            kind: raw.kind,
            action: raw.action,
            description: raw.description,
        }
    }
}
