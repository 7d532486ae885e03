//! Domain service - view composition over the record source

use super::dashboard;
use super::hierarchy::{forest, HierarchyResolver};
use super::merge::{merge, search_by_display_name};
use super::repository::RecordSource;
use super::roster;
use super::session::ensure_active;
use super::validation::validate_education_entry;
use crate::config::DashboardConfig;
use crate::contract::{
    CareerNote, DashboardSummary, EducationRecord, Employee, Merged, OrgNode, PersonnelError,
    ResolvedPosition, RosterQuery, Session, TrainingRecord,
};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;

/// Domain service for personnel views
///
/// Every view takes the caller's [`Session`], issues its fetches concurrently
/// and fails as a whole when any of them fails.
pub struct Service {
    source: Arc<dyn RecordSource>,
    resolver: HierarchyResolver,
    limits: DashboardConfig,
}

impl Service {
    /// Create a new service instance using the station hierarchy rules
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self::with_options(source, HierarchyResolver::default(), DashboardConfig::default())
    }

    pub fn with_options(
        source: Arc<dyn RecordSource>,
        resolver: HierarchyResolver,
        limits: DashboardConfig,
    ) -> Self {
        Self {
            source,
            resolver,
            limits,
        }
    }

    pub fn resolver(&self) -> &HierarchyResolver {
        &self.resolver
    }

    // ===== List views =====

    /// Employee list with name search and sort order applied
    pub async fn roster(
        &self,
        session: &Session,
        query: &RosterQuery,
    ) -> Result<Vec<Employee>, PersonnelError> {
        ensure_active(session, Utc::now())?;

        let employees = fetch("pegawai", self.source.employees()).await?;
        Ok(roster::apply(employees, query))
    }

    pub async fn education(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<Merged<EducationRecord>>, PersonnelError> {
        ensure_active(session, Utc::now())?;

        let (employees, records) = tokio::try_join!(
            fetch("pegawai", self.source.employees()),
            fetch("pendidikan", self.source.education_records()),
        )?;
        Ok(search_by_display_name(merge(&records, &employees), search))
    }

    pub async fn training(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<Merged<TrainingRecord>>, PersonnelError> {
        ensure_active(session, Utc::now())?;

        let (employees, records) = tokio::try_join!(
            fetch("pegawai", self.source.employees()),
            fetch("penjenjangan", self.source.training_records()),
        )?;
        Ok(search_by_display_name(merge(&records, &employees), search))
    }

    pub async fn career_notes(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<Merged<CareerNote>>, PersonnelError> {
        ensure_active(session, Utc::now())?;

        let (employees, notes) = tokio::try_join!(
            fetch("pegawai", self.source.employees()),
            fetch("catatan-karir", self.source.career_notes()),
        )?;
        Ok(search_by_display_name(merge(&notes, &employees), search))
    }

    /// Position assignments with parents resolved and holders named
    pub async fn structure(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<Merged<ResolvedPosition>>, PersonnelError> {
        ensure_active(session, Utc::now())?;

        let (employees, positions) = tokio::try_join!(
            fetch("pegawai", self.source.employees()),
            fetch("struktur", self.source.positions()),
        )?;

        let resolved = self.resolver.resolve(&positions);
        Ok(search_by_display_name(merge(&resolved, &employees), search))
    }

    // ===== Aggregates =====

    pub async fn organigram(&self, session: &Session) -> Result<Vec<OrgNode>, PersonnelError> {
        let positions = self.structure(session, None).await?;
        let roots = forest(positions);

        tracing::debug!(roots = roots.len(), "Built organisation chart");
        Ok(roots)
    }

    pub async fn dashboard(&self, session: &Session) -> Result<DashboardSummary, PersonnelError> {
        self.dashboard_at(session, Utc::now()).await
    }

    /// Landing page aggregates as of `now`
    pub async fn dashboard_at(
        &self,
        session: &Session,
        now: DateTime<Utc>,
    ) -> Result<DashboardSummary, PersonnelError> {
        ensure_active(session, now)?;

        let (employees, notes, positions, activity) = tokio::try_join!(
            fetch("pegawai", self.source.employees()),
            fetch("catatan-karir", self.source.career_notes()),
            fetch("struktur", self.source.positions()),
            fetch("aktivitas", self.source.recent_activity()),
        )?;

        Ok(DashboardSummary {
            total_employees: employees.len(),
            total_positions: positions.len(),
            gender: dashboard::gender_count(&employees),
            by_rank: dashboard::rank_sex_breakdown(&employees),
            salary_increments: dashboard::upcoming_salary_increments(
                &employees,
                now.date_naive(),
                self.limits.salary_increments,
            ),
            promotions: dashboard::upcoming_promotions(
                &notes,
                &employees,
                self.limits.promotions,
            ),
            recent_activity: dashboard::recent_activity(&activity, now, self.limits.activities),
        })
    }

    // ===== Validation =====

    /// Check a new or edited education record against the current records
    pub async fn check_education_entry(
        &self,
        session: &Session,
        candidate: &EducationRecord,
    ) -> Result<(), PersonnelError> {
        ensure_active(session, Utc::now())?;

        let existing = fetch("pendidikan", self.source.education_records()).await?;
        validate_education_entry(&existing, candidate)
    }
}

async fn fetch<T>(
    resource: &'static str,
    request: impl Future<Output = anyhow::Result<T>>,
) -> Result<T, PersonnelError> {
    request.await.map_err(|e| {
        tracing::error!(resource, error = %e, "Record source request failed");
        PersonnelError::Upstream {
            resource: resource.to_string(),
            message: format!("{:#}", e),
        }
    })
}
