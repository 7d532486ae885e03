//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to read personnel views.
//! NO HTTP - direct function calls for performance.

use super::error::PersonnelError;
use super::model::{
    CareerNote, DashboardSummary, EducationRecord, Employee, Merged, OrgNode, ResolvedPosition,
    RosterQuery, Session, TrainingRecord,
};
use async_trait::async_trait;

/// Personnel service API for inter-module communication
#[async_trait]
pub trait PersonnelApi: Send + Sync {
    // ===== List views =====

    /// Employee list, filtered by name and sorted
    async fn roster(
        &self,
        session: &Session,
        query: RosterQuery,
    ) -> Result<Vec<Employee>, PersonnelError>;

    /// Education records joined with employee names
    async fn education(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<Merged<EducationRecord>>, PersonnelError>;

    /// Training records joined with employee names
    async fn training(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<Merged<TrainingRecord>>, PersonnelError>;

    /// Career notes joined with employee names
    async fn career_notes(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<Merged<CareerNote>>, PersonnelError>;

    /// Position assignments with resolved parents and employee names
    async fn structure(
        &self,
        session: &Session,
        search: Option<&str>,
    ) -> Result<Vec<Merged<ResolvedPosition>>, PersonnelError>;

    // ===== Aggregates =====

    /// Organisation chart forest
    async fn organigram(&self, session: &Session) -> Result<Vec<OrgNode>, PersonnelError>;

    /// Landing page aggregates
    async fn dashboard(&self, session: &Session) -> Result<DashboardSummary, PersonnelError>;

    // ===== Validation =====

    /// Advisory check before creating or editing an education record
    async fn check_education_entry(
        &self,
        session: &Session,
        candidate: &EducationRecord,
    ) -> Result<(), PersonnelError>;
}
