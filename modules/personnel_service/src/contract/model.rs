//! Contract models for personnel service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - wire shapes live in `infra::http::wire`, REST shapes in `api::rest::dto`.

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Civil-service rank/grade code (pangkat/golongan), ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    Ia,
    Ib,
    Ic,
    Id,
    IIa,
    IIb,
    IIc,
    IId,
    IIIa,
    IIIb,
    IIIc,
    IIId,
    IVa,
    IVb,
    IVc,
    IVd,
    IVe,
}

impl Grade {
    /// All grades in ascending order
    pub const ALL: [Grade; 17] = [
        Grade::Ia,
        Grade::Ib,
        Grade::Ic,
        Grade::Id,
        Grade::IIa,
        Grade::IIb,
        Grade::IIc,
        Grade::IId,
        Grade::IIIa,
        Grade::IIIb,
        Grade::IIIc,
        Grade::IIId,
        Grade::IVa,
        Grade::IVb,
        Grade::IVc,
        Grade::IVd,
        Grade::IVe,
    ];

    /// Wire code, e.g. "IIIa"
    pub fn code(self) -> &'static str {
        match self {
            Grade::Ia => "Ia",
            Grade::Ib => "Ib",
            Grade::Ic => "Ic",
            Grade::Id => "Id",
            Grade::IIa => "IIa",
            Grade::IIb => "IIb",
            Grade::IIc => "IIc",
            Grade::IId => "IId",
            Grade::IIIa => "IIIa",
            Grade::IIIb => "IIIb",
            Grade::IIIc => "IIIc",
            Grade::IIId => "IIId",
            Grade::IVa => "IVa",
            Grade::IVb => "IVb",
            Grade::IVc => "IVc",
            Grade::IVd => "IVd",
            Grade::IVe => "IVe",
        }
    }

    /// Parse a grade code; tolerant of surrounding whitespace, a "/" separator and letter case
    pub fn parse(raw: &str) -> Option<Self> {
        let compact: String = raw.trim().chars().filter(|c| *c != '/').collect();
        Self::ALL
            .into_iter()
            .find(|g| g.code().eq_ignore_ascii_case(&compact))
    }
}

/// Employee sex (jenis kelamin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Laki-laki",
            Sex::Female => "Perempuan",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.eq_ignore_ascii_case("laki-laki") {
            Some(Sex::Male)
        } else if value.eq_ignore_ascii_case("perempuan") {
            Some(Sex::Female)
        } else {
            None
        }
    }
}

/// Religion (agama)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Religion {
    Islam,
    Kristen,
    Katolik,
    Hindu,
    Buddha,
    Konghucu,
}

impl Religion {
    pub const ALL: [Religion; 6] = [
        Religion::Islam,
        Religion::Kristen,
        Religion::Katolik,
        Religion::Hindu,
        Religion::Buddha,
        Religion::Konghucu,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Religion::Islam => "Islam",
            Religion::Kristen => "Kristen",
            Religion::Katolik => "Katolik",
            Religion::Hindu => "Hindu",
            Religion::Buddha => "Buddha",
            Religion::Konghucu => "Konghucu",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(value))
    }
}

/// Employment status (status kepegawaian)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmploymentStatus {
    /// PNS
    Permanent,
    /// Kontrak
    Contract,
    /// Honorer
    Honorary,
}

impl EmploymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            EmploymentStatus::Permanent => "PNS",
            EmploymentStatus::Contract => "Kontrak",
            EmploymentStatus::Honorary => "Honorer",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        [
            EmploymentStatus::Permanent,
            EmploymentStatus::Contract,
            EmploymentStatus::Honorary,
        ]
        .into_iter()
        .find(|s| s.label().eq_ignore_ascii_case(value))
    }
}

/// Promotion eligibility status of a career note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CareerStatus {
    /// "Layak"
    Eligible,
    /// "Belum Layak" - still under review
    NotYetEligible,
    /// "Tidak Layak"
    NotEligible,
}

impl CareerStatus {
    pub fn label(self) -> &'static str {
        match self {
            CareerStatus::Eligible => "Layak",
            CareerStatus::NotYetEligible => "Belum Layak",
            CareerStatus::NotEligible => "Tidak Layak",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        [
            CareerStatus::Eligible,
            CareerStatus::NotYetEligible,
            CareerStatus::NotEligible,
        ]
        .into_iter()
        .find(|s| s.label().eq_ignore_ascii_case(value))
    }
}

/// Employee record (pegawai)
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    /// NIP
    pub nip: String,
    pub name: String,
    pub birth_place_date: String,
    pub last_education: String,
    /// Raw rank string as stored upstream; see [`Employee::grade`]
    pub rank: String,
    /// KGB Berikutnya
    pub next_salary_increment: Option<NaiveDate>,
    /// TMT of the current rank
    pub rank_effective_date: Option<NaiveDate>,
    pub sex: Option<Sex>,
    pub religion: Option<Religion>,
    pub employment_status: Option<EmploymentStatus>,
    pub base_salary: u64,
    pub children: u32,
}

impl Employee {
    pub fn grade(&self) -> Option<Grade> {
        Grade::parse(&self.rank)
    }
}

/// Education history entry (pendidikan)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationRecord {
    pub id: String,
    /// NIP of the owning employee
    pub employee_ref: String,
    /// Jenjang, e.g. "S1"
    pub level: String,
    pub field_of_study: String,
    pub institution: String,
    pub graduation_year: Option<i32>,
}

/// Training/leveling record (penjenjangan)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingRecord {
    pub id: String,
    pub employee_ref: String,
    pub name: String,
    pub year: Option<i32>,
    pub organizer: String,
}

/// Career note (catatan karir)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareerNote {
    pub id: String,
    pub employee_ref: String,
    pub current_rank: String,
    pub potential_rank: String,
    /// Tanggal Layak
    pub eligible_on: Option<NaiveDate>,
    pub status: Option<CareerStatus>,
    pub note: String,
}

/// Organisational position assignment (struktur)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionAssignment {
    pub id: String,
    pub employee_ref: String,
    /// Jabatan, free text
    pub title: String,
    /// TMT
    pub effective_date: Option<NaiveDate>,
    pub parent_id: Option<String>,
}

/// How a position obtained its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentOrigin {
    /// Parent supplied by the backend
    Explicit,
    /// Parent inferred from the title
    Inferred,
    /// Title marks the station head
    Root,
    /// No rule matched, or the matched rule found no parent
    Unattached,
}

/// Position with its parent resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPosition {
    pub position: PositionAssignment,
    pub parent_id: Option<String>,
    pub origin: ParentOrigin,
}

/// Row joined with the display name of the employee it references
#[derive(Debug, Clone, PartialEq)]
pub struct Merged<T> {
    pub record: T,
    /// Employee name, or the raw reference when it does not resolve
    pub display_name: String,
}

/// Node of the organisation chart
#[derive(Debug, Clone, PartialEq)]
pub struct OrgNode {
    pub position: Merged<ResolvedPosition>,
    pub children: Vec<OrgNode>,
}

impl OrgNode {
    /// Number of nodes in this subtree, including self
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(OrgNode::size).sum::<usize>()
    }
}

/// Recent activity entry (aktivitas)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    /// e.g. "Pendidikan"
    pub kind: String,
    pub action: String,
    pub at: Option<DateTime<Utc>>,
    pub description: String,
}

// ===== Dashboard =====

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenderCount {
    pub male: usize,
    pub female: usize,
}

/// Employees of one rank split by sex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankSexCount {
    pub rank: String,
    pub male: usize,
    pub female: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryIncrementDue {
    pub nip: String,
    pub name: String,
    pub due: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionDue {
    pub nip: String,
    pub name: String,
    pub eligible_on: Option<NaiveDate>,
    pub potential_rank: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentActivity {
    pub entry: ActivityEntry,
    /// Human readable age, e.g. "5 menit yang lalu"
    pub relative: String,
}

/// Everything the landing page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_employees: usize,
    pub total_positions: usize,
    pub gender: GenderCount,
    pub by_rank: Vec<RankSexCount>,
    pub salary_increments: Vec<SalaryIncrementDue>,
    pub promotions: Vec<PromotionDue>,
    pub recent_activity: Vec<RecentActivity>,
}

// ===== Roster =====

/// Sort order for the employee list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RosterSort {
    /// Upstream order
    #[default]
    Default,
    /// Highest grade first
    Grade,
    /// Soonest salary increment first
    SalaryIncrement,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterQuery {
    pub search: Option<String>,
    pub sort: RosterSort,
}

// ===== Session =====

/// Authenticated user session, passed explicitly to every view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// True once the session is within `leeway` of expiring
    pub fn needs_refresh(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        now + leeway >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_parse_variants() {
        assert_eq!(Grade::parse("IIIa"), Some(Grade::IIIa));
        assert_eq!(Grade::parse(" iiib "), Some(Grade::IIIb));
        assert_eq!(Grade::parse("IV/e"), Some(Grade::IVe));
        assert_eq!(Grade::parse("V"), None);
        assert_eq!(Grade::parse(""), None);
    }

    #[test]
    fn test_grade_ordering() {
        assert!(Grade::IVe > Grade::IIId);
        assert!(Grade::Ia < Grade::Ib);
        assert!(Grade::IId < Grade::IIIa);
    }

    #[test]
    fn test_enum_labels_roundtrip() {
        for sex in [Sex::Male, Sex::Female] {
            assert_eq!(Sex::parse(sex.label()), Some(sex));
        }
        for religion in Religion::ALL {
            assert_eq!(Religion::parse(religion.label()), Some(religion));
        }
        assert_eq!(CareerStatus::parse("belum layak"), Some(CareerStatus::NotYetEligible));
        assert_eq!(EmploymentStatus::parse("pns"), Some(EmploymentStatus::Permanent));
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = Session {
            user_id: "u1".to_string(),
            email: None,
            access_token: "t".to_string(),
            expires_at: now + Duration::minutes(3),
        };

        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::minutes(3)));
        assert!(session.needs_refresh(now, Duration::minutes(5)));
        assert!(!session.needs_refresh(now, Duration::minutes(1)));
    }
}
