//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    CareerNote, DashboardSummary, EducationRecord, Employee, Merged, OrgNode, PersonnelApi,
    PersonnelError, ResolvedPosition, RosterQuery, Session, TrainingRecord,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// Used by in-process consumers without HTTP overhead.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PersonnelApi for NativeClient {
    async fn roster(
        &self,
        session: &Session,
        query: RosterQuery,
    ) -> Result<Vec<Employee>, PersonnelError> {
        self.service.roster(session, &query).await
    }

    async fn education(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<Merged<EducationRecord>>, PersonnelError> {
        self.service.education(session, search).await
    }

    async fn training(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<Merged<TrainingRecord>>, PersonnelError> {
        self.service.training(session, search).await
    }

    async fn career_notes(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<Merged<CareerNote>>, PersonnelError> {
        self.service.career_notes(session, search).await
    }

    async fn structure(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<Merged<ResolvedPosition>>, PersonnelError> {
        self.service.structure(session, search).await
    }

    async fn organigram(&self, session: &Session) -> Result<Vec<OrgNode>, PersonnelError> {
        self.service.organigram(session).await
    }

    async fn dashboard(&self, session: &Session) -> Result<DashboardSummary, PersonnelError> {
        self.service.dashboard(session).await
    }

    async fn check_education_entry(
        &self,
        session: &Session,
        candidate: &EducationRecord,
    ) -> Result<(), PersonnelError> {
        self.service.check_education_entry(session, candidate).await
    }
}
