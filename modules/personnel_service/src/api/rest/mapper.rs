//! Conversions between REST DTOs and contract models

use super::dto::*;
use crate::contract::{
    self, CareerNote, DashboardSummary, EducationRecord, Employee, Merged, OrgNode, ParentOrigin,
    RecentActivity, ResolvedPosition, RosterSort, TrainingRecord,
};

/// Parse the `sort` query value; `None` for unknown modes
pub fn parse_roster_sort(raw: Option<&str>) -> Option<RosterSort> {
    match raw.map(str::trim).map(str::to_lowercase).as_deref() {
        None | Some("") | Some("default") => Some(RosterSort::Default),
        Some("golongan") => Some(RosterSort::Grade),
        Some("kgb") => Some(RosterSort::SalaryIncrement),
        Some(_) => None,
    }
}

impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
        Self {
            grade: e.grade().map(|g| g.code().to_string()),
            sex: e.sex.map(|s| s.label().to_string()),
            religion: e.religion.map(|r| r.label().to_string()),
            employment_status: e.employment_status.map(|s| s.label().to_string()),
            nip: e.nip,
            name: e.name,
            birth_place_date: e.birth_place_date,
            last_education: e.last_education,
            rank: e.rank,
            next_salary_increment: e.next_salary_increment,
            rank_effective_date: e.rank_effective_date,
            base_salary: e.base_salary,
            children: e.children,
        }
    }
}

impl From<Merged<EducationRecord>> for EducationDto {
    fn from(m: Merged<EducationRecord>) -> Self {
        let r = m.record;
        Self {
            id: r.id,
            nip: r.employee_ref,
            employee_name: m.display_name,
            level: r.level,
            field_of_study: r.field_of_study,
            institution: r.institution,
            graduation_year: r.graduation_year,
        }
    }
}

impl From<Merged<TrainingRecord>> for TrainingDto {
    fn from(m: Merged<TrainingRecord>) -> Self {
        let r = m.record;
        Self {
            id: r.id,
            nip: r.employee_ref,
            employee_name: m.display_name,
            name: r.name,
            year: r.year,
            organizer: r.organizer,
        }
    }
}

impl From<Merged<CareerNote>> for CareerNoteDto {
    fn from(m: Merged<CareerNote>) -> Self {
        let r = m.record;
        Self {
            id: r.id,
            nip: r.employee_ref,
            employee_name: m.display_name,
            current_rank: r.current_rank,
            potential_rank: r.potential_rank,
            eligible_on: r.eligible_on,
            status: r.status.map(|s| s.label().to_string()),
            note: r.note,
        }
    }
}

impl From<ParentOrigin> for ParentOriginDto {
    fn from(origin: ParentOrigin) -> Self {
        match origin {
            ParentOrigin::Explicit => Self::Explicit,
            ParentOrigin::Inferred => Self::Inferred,
            ParentOrigin::Root => Self::Root,
            ParentOrigin::Unattached => Self::Unattached,
        }
    }
}

impl From<Merged<ResolvedPosition>> for PositionDto {
    fn from(m: Merged<ResolvedPosition>) -> Self {
        let ResolvedPosition {
            position,
            parent_id,
            origin,
        } = m.record;
        Self {
            id: position.id,
            nip: position.employee_ref,
            employee_name: m.display_name,
            title: position.title,
            effective_date: position.effective_date,
            parent_id,
            parent_origin: origin.into(),
        }
    }
}

impl From<OrgNode> for OrgNodeDto {
    fn from(node: OrgNode) -> Self {
        Self {
            position: node.position.into(),
            children: node.children.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<RecentActivity> for ActivityDto {
    fn from(a: RecentActivity) -> Self {
        Self {
            kind: a.entry.kind,
            action: a.entry.action,
            at: a.entry.at,
            description: a.entry.description,
            relative: a.relative,
        }
    }
}

impl From<DashboardSummary> for DashboardDto {
    fn from(s: DashboardSummary) -> Self {
        Self {
            total_employees: s.total_employees,
            total_positions: s.total_positions,
            gender: GenderCountDto {
                male: s.gender.male,
                female: s.gender.female,
            },
            by_rank: s
                .by_rank
                .into_iter()
                .map(|r| RankSexCountDto {
                    rank: r.rank,
                    male: r.male,
                    female: r.female,
                })
                .collect(),
            salary_increments: s
                .salary_increments
                .into_iter()
                .map(|d| SalaryIncrementDto {
                    nip: d.nip,
                    name: d.name,
                    due: d.due,
                })
                .collect(),
            promotions: s
                .promotions
                .into_iter()
                .map(|p| PromotionDto {
                    nip: p.nip,
                    name: p.name,
                    eligible_on: p.eligible_on,
                    potential_rank: p.potential_rank,
                })
                .collect(),
            recent_activity: s.recent_activity.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<EducationEntryRequest> for contract::EducationRecord {
    fn from(req: EducationEntryRequest) -> Self {
        Self {
            id: req.id.unwrap_or_default(),
            employee_ref: req.nip,
            level: req.level,
            field_of_study: req.field_of_study,
            institution: req.institution,
            graduation_year: req.graduation_year,
        }
    }
}
