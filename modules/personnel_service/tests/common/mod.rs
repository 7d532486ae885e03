//! Common test utilities: a small station roster and in-memory collaborators

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use parking_lot::RwLock;
use personnel_service::contract::*;
use personnel_service::domain::RecordSource;
use std::collections::HashSet;
use std::sync::Arc;

pub const TOKEN: &str = "token-admin";

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn session() -> Session {
    Session {
        user_id: "admin".to_string(),
        email: Some("admin@stasiun.go.id".to_string()),
        access_token: TOKEN.to_string(),
        expires_at: Utc::now() + Duration::hours(1),
    }
}

pub fn expired_session() -> Session {
    Session {
        expires_at: Utc::now() - Duration::minutes(1),
        ..session()
    }
}

pub fn employee(nip: &str, name: &str, sex: Sex, rank: &str, kgb: Option<&str>) -> Employee {
    Employee {
        nip: nip.to_string(),
        name: name.to_string(),
        birth_place_date: "Bengkulu, 1 Januari 1980".to_string(),
        last_education: "S1".to_string(),
        rank: rank.to_string(),
        next_salary_increment: kgb.map(date),
        rank_effective_date: None,
        sex: Some(sex),
        religion: Some(Religion::Islam),
        employment_status: Some(EmploymentStatus::Permanent),
        base_salary: 3_000_000,
        children: 1,
    }
}

pub fn position(id: &str, nip: &str, title: &str, parent_id: Option<&str>) -> PositionAssignment {
    PositionAssignment {
        id: id.to_string(),
        employee_ref: nip.to_string(),
        title: title.to_string(),
        effective_date: Some(date("2020-01-01")),
        parent_id: parent_id.map(str::to_string),
    }
}

pub fn education(id: &str, nip: &str, level: &str) -> EducationRecord {
    EducationRecord {
        id: id.to_string(),
        employee_ref: nip.to_string(),
        level: level.to_string(),
        field_of_study: "Meteorologi".to_string(),
        institution: "STMKG".to_string(),
        graduation_year: Some(2010),
    }
}

pub fn training(id: &str, nip: &str, name: &str) -> TrainingRecord {
    TrainingRecord {
        id: id.to_string(),
        employee_ref: nip.to_string(),
        name: name.to_string(),
        year: Some(2022),
        organizer: "BMKG".to_string(),
    }
}

pub fn career_note(id: &str, nip: &str, status: CareerStatus, eligible_on: &str) -> CareerNote {
    CareerNote {
        id: id.to_string(),
        employee_ref: nip.to_string(),
        current_rank: "IIIa".to_string(),
        potential_rank: "IIIb".to_string(),
        eligible_on: Some(date(eligible_on)),
        status: Some(status),
        note: String::new(),
    }
}

/// Climatology station staff
/// Kepala Stasiun → {Koordinator Data, Koordinator Observasi, Tata Usaha} → staff
#[derive(Debug, Clone)]
pub struct TestStation {
    pub employees: Vec<Employee>,
    pub positions: Vec<PositionAssignment>,
    pub education: Vec<EducationRecord>,
    pub training: Vec<TrainingRecord>,
    pub career_notes: Vec<CareerNote>,
    pub activity: Vec<ActivityEntry>,
}

impl TestStation {
    pub fn new() -> Self {
        let employees = vec![
            employee("1001", "Agus Salim", Sex::Male, "IVa", Some("2099-04-01")),
            employee("1002", "Dewi Lestari", Sex::Female, "IIIc", Some("2099-02-01")),
            employee("1003", "Rahmat Hidayat", Sex::Male, "IIIb", None),
            employee("1004", "Sri Wahyuni", Sex::Female, "IIIa", Some("2000-01-01")),
            employee("1005", "Budi Santoso", Sex::Male, "IIb", Some("2099-03-01")),
            employee("1006", "Andi Pratama", Sex::Male, "IIc", None),
            employee("1007", "Rina Marlina", Sex::Female, "IIa", None),
        ];

        let positions = vec![
            position("s1", "1001", "Kepala Stasiun", None),
            position("s2", "1002", "Sub Bagian Koordinator Data dan Informasi", None),
            position("s3", "1003", "Koordinator Observasi", None),
            position("s4", "1004", "Tata Usaha", None),
            position("s5", "1005", "Staf Data dan Informasi", None),
            position("s6", "1006", "Staf Observasi", None),
            position("s7", "1007", "Staf Tata Usaha", None),
            position("s8", "9999", "Pengemudi", Some("")),
        ];

        let now = Utc::now();
        let activity = vec![
            ActivityEntry {
                kind: "Pendidikan".to_string(),
                action: "Menambahkan data pendidikan".to_string(),
                at: Some(now - Duration::minutes(5)),
                description: "Menambahkan pendidikan untuk pegawai 1005".to_string(),
            },
            ActivityEntry {
                kind: "Struktur".to_string(),
                action: "Mengubah struktur".to_string(),
                at: Some(now - Duration::hours(3)),
                description: String::new(),
            },
            ActivityEntry {
                kind: "Pegawai".to_string(),
                action: "Menambahkan pegawai".to_string(),
                at: None,
                description: String::new(),
            },
            ActivityEntry {
                kind: "Pegawai".to_string(),
                action: "Menghapus pegawai".to_string(),
                at: Some(now - Duration::hours(30)),
                description: String::new(),
            },
        ];

        Self {
            employees,
            positions,
            education: vec![
                education("e1", "1001", "S2"),
                education("e2", "1005", "D3"),
                education("e3", "9999", "SMA"),
            ],
            training: vec![
                training("t1", "1003", "Diklat Observasi Permukaan"),
                training("t2", "1002", "Pelatihan Database Klimatologi"),
            ],
            career_notes: vec![
                career_note("c1", "1004", CareerStatus::Eligible, "2025-06-01"),
                career_note("c2", "1005", CareerStatus::NotYetEligible, "2024-01-01"),
                career_note("c3", "1007", CareerStatus::Eligible, "2025-01-01"),
                career_note("c4", "8888", CareerStatus::Eligible, "2025-03-01"),
                career_note("c5", "1006", CareerStatus::Eligible, "2026-01-01"),
            ],
            activity,
        }
    }
}

impl Default for TestStation {
    fn default() -> Self {
        Self::new()
    }
}

/// Collections the mock can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Employees,
    Education,
    Training,
    CareerNotes,
    Positions,
    Activity,
}

/// In-memory record source with per-collection failure injection
#[derive(Clone)]
pub struct MockRecordSource {
    data: Arc<RwLock<TestStation>>,
    failing: Arc<RwLock<HashSet<Collection>>>,
}

impl MockRecordSource {
    pub fn new(station: TestStation) -> Self {
        Self {
            data: Arc::new(RwLock::new(station)),
            failing: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    pub fn fail(&self, collection: Collection) {
        self.failing.write().insert(collection);
    }

    pub fn recover(&self, collection: Collection) {
        self.failing.write().remove(&collection);
    }

    pub fn update(&self, f: impl FnOnce(&mut TestStation)) {
        f(&mut self.data.write());
    }

    fn read<T: Clone>(
        &self,
        collection: Collection,
        pick: impl FnOnce(&TestStation) -> &Vec<T>,
    ) -> Result<Vec<T>> {
        if self.failing.read().contains(&collection) {
            return Err(anyhow!("{:?} backend unavailable", collection));
        }
        Ok(pick(&self.data.read()).clone())
    }
}

#[async_trait]
impl RecordSource for MockRecordSource {
    async fn employees(&self) -> Result<Vec<Employee>> {
        self.read(Collection::Employees, |s| &s.employees)
    }

    async fn education_records(&self) -> Result<Vec<EducationRecord>> {
        self.read(Collection::Education, |s| &s.education)
    }

    async fn training_records(&self) -> Result<Vec<TrainingRecord>> {
        self.read(Collection::Training, |s| &s.training)
    }

    async fn career_notes(&self) -> Result<Vec<CareerNote>> {
        self.read(Collection::CareerNotes, |s| &s.career_notes)
    }

    async fn positions(&self) -> Result<Vec<PositionAssignment>> {
        self.read(Collection::Positions, |s| &s.positions)
    }

    async fn recent_activity(&self) -> Result<Vec<ActivityEntry>> {
        self.read(Collection::Activity, |s| &s.activity)
    }
}
