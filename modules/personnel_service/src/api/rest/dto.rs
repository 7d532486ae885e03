//! REST DTOs with serde derives for HTTP API

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// List envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

// ===== Employee DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeDto {
    /// Employee identifier (NIP)
    #[schema(example = "198703152010121001")]
    pub nip: String,
    pub name: String,
    pub birth_place_date: String,
    pub last_education: String,
    /// Rank as recorded upstream
    #[schema(example = "IIIa")]
    pub rank: String,
    /// Normalized grade code, when the rank carries one
    #[schema(example = "IIIa")]
    pub grade: Option<String>,
    /// Next periodic salary increment (KGB)
    pub next_salary_increment: Option<NaiveDate>,
    /// Rank effective date (TMT)
    pub rank_effective_date: Option<NaiveDate>,
    #[schema(example = "Laki-laki")]
    pub sex: Option<String>,
    pub religion: Option<String>,
    #[schema(example = "PNS")]
    pub employment_status: Option<String>,
    pub base_salary: u64,
    pub children: u32,
}

/// Employee list query
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RosterParams {
    /// Case-insensitive name search
    pub q: Option<String>,
    /// `default`, `golongan` or `kgb`
    #[schema(example = "golongan")]
    pub sort: Option<String>,
}

/// Name search over a merged list
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SearchParams {
    pub q: Option<String>,
}

// ===== Record DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EducationDto {
    pub id: String,
    pub nip: String,
    /// Employee name, or the NIP when it does not resolve
    pub employee_name: String,
    #[schema(example = "S1")]
    pub level: String,
    pub field_of_study: String,
    pub institution: String,
    pub graduation_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainingDto {
    pub id: String,
    pub nip: String,
    pub employee_name: String,
    pub name: String,
    pub year: Option<i32>,
    pub organizer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CareerNoteDto {
    pub id: String,
    pub nip: String,
    pub employee_name: String,
    pub current_rank: String,
    pub potential_rank: String,
    pub eligible_on: Option<NaiveDate>,
    #[schema(example = "Layak")]
    pub status: Option<String>,
    pub note: String,
}

/// Education record submitted for the advisory check
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EducationEntryRequest {
    /// Present when editing an existing record
    #[serde(default)]
    pub id: Option<String>,
    pub nip: String,
    pub level: String,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default)]
    pub institution: String,
    pub graduation_year: Option<i32>,
}

// ===== Structure DTOs =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParentOriginDto {
    Explicit,
    Inferred,
    Root,
    Unattached,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PositionDto {
    pub id: String,
    pub nip: String,
    pub employee_name: String,
    #[schema(example = "Kepala Stasiun")]
    pub title: String,
    pub effective_date: Option<NaiveDate>,
    /// Resolved parent position id
    pub parent_id: Option<String>,
    pub parent_origin: ParentOriginDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrgNodeDto {
    pub position: PositionDto,
    #[schema(no_recursion)]
    pub children: Vec<OrgNodeDto>,
}

// ===== Dashboard DTOs =====

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenderCountDto {
    pub male: usize,
    pub female: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RankSexCountDto {
    #[schema(example = "IIIa")]
    pub rank: String,
    pub male: usize,
    pub female: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SalaryIncrementDto {
    pub nip: String,
    pub name: String,
    pub due: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PromotionDto {
    pub nip: String,
    pub name: String,
    pub eligible_on: Option<NaiveDate>,
    pub potential_rank: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityDto {
    #[schema(example = "Pendidikan")]
    pub kind: String,
    pub action: String,
    pub at: Option<DateTime<Utc>>,
    pub description: String,
    /// Relative time label
    #[schema(example = "5 menit yang lalu")]
    pub relative: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub total_employees: usize,
    pub total_positions: usize,
    pub gender: GenderCountDto,
    pub by_rank: Vec<RankSexCountDto>,
    pub salary_increments: Vec<SalaryIncrementDto>,
    pub promotions: Vec<PromotionDto>,
    pub recent_activity: Vec<ActivityDto>,
}
