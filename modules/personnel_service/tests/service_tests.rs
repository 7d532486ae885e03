//! Integration tests for the personnel domain service

use chrono::Utc;
use personnel_service::contract::*;
use personnel_service::domain::{HierarchyResolver, Service};
use personnel_service::api::native::NativeClient;
use personnel_service::config::DashboardConfig;
use std::sync::Arc;

mod common;
use common::{education, employee, session, Collection, MockRecordSource, TestStation};

fn service_with(source: &MockRecordSource) -> Service {
    Service::new(Arc::new(source.clone()))
}

fn ids<T>(rows: &[Merged<T>], id: impl Fn(&T) -> &str) -> Vec<String> {
    rows.iter().map(|r| id(&r.record).to_string()).collect()
}

fn names<T>(rows: &[Merged<T>]) -> Vec<&str> {
    rows.iter().map(|r| r.display_name.as_str()).collect()
}

// ===== Record merging =====

#[tokio::test]
async fn test_education_falls_back_to_raw_nip() {
    let source = MockRecordSource::new(TestStation::new());
    source.update(|s| {
        s.employees = vec![employee("1", "Budi", Sex::Male, "IIIa", None)];
        s.education = vec![education("e1", "1", "S1"), education("e2", "9", "S2")];
    });
    let service = service_with(&source);

    let rows = service.education(&session(), None).await.unwrap();

    assert_eq!(ids(&rows, |r| r.id.as_str()), vec!["e1", "e2"]);
    assert_eq!(names(&rows), vec!["Budi", "9"]);
    assert_eq!(rows[1].record.level, "S2");
}

#[tokio::test]
async fn test_merge_keeps_row_count_and_order() {
    let station = TestStation::new();
    let expected: Vec<String> = station.education.iter().map(|e| e.id.clone()).collect();
    let source = MockRecordSource::new(station);
    let service = service_with(&source);

    let rows = service.education(&session(), None).await.unwrap();

    assert_eq!(ids(&rows, |r| r.id.as_str()), expected);
    assert_eq!(names(&rows), vec!["Agus Salim", "Budi Santoso", "9999"]);
}

#[tokio::test]
async fn test_search_matches_display_name_or_nip() {
    let source = MockRecordSource::new(TestStation::new());
    let service = service_with(&source);

    let by_name = service.training(&session(), Some("dewi")).await.unwrap();
    assert_eq!(ids(&by_name, |r| r.id.as_str()), vec!["t2"]);

    let by_nip = service.education(&session(), Some("9999")).await.unwrap();
    assert_eq!(ids(&by_nip, |r| r.id.as_str()), vec!["e3"]);

    let blank = service.career_notes(&session(), Some("   ")).await.unwrap();
    assert_eq!(blank.len(), 5);
}

#[tokio::test]
async fn test_career_notes_fallback_name() {
    let source = MockRecordSource::new(TestStation::new());
    let service = service_with(&source);

    let rows = service.career_notes(&session(), None).await.unwrap();
    let c4 = rows.iter().find(|r| r.record.id == "c4").unwrap();
    assert_eq!(c4.display_name, "8888");
}

// ===== Structure & organigram =====

#[tokio::test]
async fn test_structure_infers_station_parents() {
    let source = MockRecordSource::new(TestStation::new());
    let service = service_with(&source);

    let rows = service.structure(&session(), None).await.unwrap();
    let parent = |id: &str| {
        rows.iter()
            .find(|r| r.record.position.id == id)
            .and_then(|r| r.record.parent_id.clone())
    };

    assert_eq!(parent("s1"), None);
    assert_eq!(parent("s2").as_deref(), Some("s1"));
    assert_eq!(parent("s3").as_deref(), Some("s1"));
    assert_eq!(parent("s4").as_deref(), Some("s1"));
    assert_eq!(parent("s5").as_deref(), Some("s2"));
    assert_eq!(parent("s6").as_deref(), Some("s3"));
    assert_eq!(parent("s7").as_deref(), Some("s4"));
    assert_eq!(parent("s8"), None);

    let driver = rows.iter().find(|r| r.record.position.id == "s8").unwrap();
    assert_eq!(driver.record.origin, ParentOrigin::Unattached);
    assert_eq!(driver.display_name, "9999");
}

#[tokio::test]
async fn test_explicit_parent_is_never_overwritten() {
    let source = MockRecordSource::new(TestStation::new());
    source.update(|s| s.positions[4].parent_id = Some("s4".to_string()));
    let service = service_with(&source);

    let rows = service.structure(&session(), None).await.unwrap();
    let staff = rows.iter().find(|r| r.record.position.id == "s5").unwrap();
    assert_eq!(staff.record.parent_id.as_deref(), Some("s4"));
    assert_eq!(staff.record.origin, ParentOrigin::Explicit);
}

#[tokio::test]
async fn test_explicit_only_resolver_skips_inference() {
    let source = MockRecordSource::new(TestStation::new());
    let service = Service::with_options(
        Arc::new(source.clone()),
        HierarchyResolver::explicit_only(),
        DashboardConfig::default(),
    );

    let rows = service.structure(&session(), None).await.unwrap();
    assert!(rows.iter().all(|r| r.record.parent_id.is_none()));
}

#[tokio::test]
async fn test_organigram_forest() {
    let source = MockRecordSource::new(TestStation::new());
    let service = service_with(&source);

    let roots = service.organigram(&session()).await.unwrap();

    let root_ids: Vec<&str> = roots.iter().map(|n| n.position.record.position.id.as_str()).collect();
    assert_eq!(root_ids, vec!["s1", "s8"]);

    let head = &roots[0];
    assert_eq!(head.position.display_name, "Agus Salim");
    assert_eq!(head.size(), 7);
    let branches: Vec<&str> = head
        .children
        .iter()
        .map(|n| n.position.record.position.id.as_str())
        .collect();
    assert_eq!(branches, vec!["s2", "s3", "s4"]);
    assert_eq!(head.children[0].children[0].position.display_name, "Budi Santoso");
}

#[tokio::test]
async fn test_organigram_survives_explicit_cycle() {
    let source = MockRecordSource::new(TestStation::new());
    source.update(|s| {
        s.positions[0].parent_id = Some("s2".to_string());
        s.positions[1].parent_id = Some("s1".to_string());
    });
    let service = service_with(&source);

    let roots = service.organigram(&session()).await.unwrap();
    let total: usize = roots.iter().map(OrgNode::size).sum();
    assert_eq!(total, 8);
}

// ===== Roster =====

#[tokio::test]
async fn test_roster_sorting() {
    let source = MockRecordSource::new(TestStation::new());
    let service = service_with(&source);

    let by_grade = service
        .roster(&session(), &RosterQuery { search: None, sort: RosterSort::Grade })
        .await
        .unwrap();
    let nips: Vec<&str> = by_grade.iter().map(|e| e.nip.as_str()).collect();
    assert_eq!(nips, vec!["1001", "1002", "1003", "1004", "1006", "1005", "1007"]);

    let by_kgb = service
        .roster(
            &session(),
            &RosterQuery { search: None, sort: RosterSort::SalaryIncrement },
        )
        .await
        .unwrap();
    let nips: Vec<&str> = by_kgb.iter().map(|e| e.nip.as_str()).collect();
    assert_eq!(nips, vec!["1004", "1002", "1005", "1001", "1003", "1006", "1007"]);
}

#[tokio::test]
async fn test_roster_search() {
    let source = MockRecordSource::new(TestStation::new());
    let service = service_with(&source);

    let found = service
        .roster(
            &session(),
            &RosterQuery { search: Some("santoso".to_string()), sort: RosterSort::Default },
        )
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].nip, "1005");
}

// ===== Dashboard =====

#[tokio::test]
async fn test_dashboard_summary() {
    let source = MockRecordSource::new(TestStation::new());
    let service = service_with(&source);

    let summary = service.dashboard_at(&session(), Utc::now()).await.unwrap();

    assert_eq!(summary.total_employees, 7);
    assert_eq!(summary.total_positions, 8);
    assert_eq!(summary.gender, GenderCount { male: 4, female: 3 });
    assert_eq!(summary.by_rank.len(), 7);
    assert_eq!(summary.by_rank[0].rank, "IVa");

    let kgb: Vec<&str> = summary.salary_increments.iter().map(|d| d.nip.as_str()).collect();
    assert_eq!(kgb, vec!["1002", "1005"]);

    let promotions: Vec<(&str, &str)> = summary
        .promotions
        .iter()
        .map(|p| (p.nip.as_str(), p.name.as_str()))
        .collect();
    assert_eq!(
        promotions,
        vec![("1007", "Rina Marlina"), ("8888", "8888"), ("1004", "Sri Wahyuni")]
    );

    let relative: Vec<&str> = summary.recent_activity.iter().map(|a| a.relative.as_str()).collect();
    assert_eq!(relative, vec!["5 menit yang lalu", "3 jam yang lalu", "-"]);
}

#[tokio::test]
async fn test_dashboard_limits_are_configurable() {
    let source = MockRecordSource::new(TestStation::new());
    let service = Service::with_options(
        Arc::new(source.clone()),
        HierarchyResolver::default(),
        DashboardConfig {
            salary_increments: 3,
            promotions: 1,
            activities: 10,
        },
    );

    let summary = service.dashboard(&session()).await.unwrap();
    assert_eq!(summary.salary_increments.len(), 3);
    assert_eq!(summary.promotions.len(), 1);
    assert_eq!(summary.recent_activity.len(), 4);
}

// ===== Failure propagation =====

#[tokio::test]
async fn test_any_failed_fetch_fails_the_view() {
    let source = MockRecordSource::new(TestStation::new());
    let service = service_with(&source);

    source.fail(Collection::Employees);
    let err = service.education(&session(), None).await.unwrap_err();
    assert!(matches!(err, PersonnelError::Upstream { ref resource, .. } if resource == "pegawai"));

    source.recover(Collection::Employees);
    source.fail(Collection::Positions);
    let err = service.organigram(&session()).await.unwrap_err();
    assert!(matches!(err, PersonnelError::Upstream { ref resource, .. } if resource == "struktur"));

    source.recover(Collection::Positions);
    source.fail(Collection::Activity);
    let err = service.dashboard(&session()).await.unwrap_err();
    assert!(matches!(err, PersonnelError::Upstream { .. }));

    source.recover(Collection::Activity);
    assert!(service.dashboard(&session()).await.is_ok());
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let source = MockRecordSource::new(TestStation::new());
    let service = service_with(&source);

    let err = service
        .roster(&common::expired_session(), &RosterQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err, PersonnelError::SessionExpired { user_id: "admin".to_string() });
}

// ===== Validation =====

#[tokio::test]
async fn test_check_education_entry() {
    let source = MockRecordSource::new(TestStation::new());
    let service = service_with(&source);

    let duplicate = education("", "1001", " s2 ");
    let err = service.check_education_entry(&session(), &duplicate).await.unwrap_err();
    assert!(matches!(err, PersonnelError::Validation { ref field, .. } if field == "level"));

    let edit_own = education("e1", "1001", "S2");
    assert!(service.check_education_entry(&session(), &edit_own).await.is_ok());

    let fresh = education("", "1001", "S3");
    assert!(service.check_education_entry(&session(), &fresh).await.is_ok());
}

// ===== Native client =====

#[tokio::test]
async fn test_native_client_delegates() {
    let source = MockRecordSource::new(TestStation::new());
    let client: Arc<dyn PersonnelApi> = Arc::new(NativeClient::new(Arc::new(service_with(&source))));

    let roster = client.roster(&session(), RosterQuery::default()).await.unwrap();
    assert_eq!(roster.len(), 7);

    let structure = client.structure(&session(), Some("budi")).await.unwrap();
    assert_eq!(structure.len(), 1);
    assert_eq!(structure[0].record.parent_id.as_deref(), Some("s2"));

    let chart = client.organigram(&session()).await.unwrap();
    assert_eq!(chart.len(), 2);
}
