//! Record source trait for data access
//!
//! This trait defines read access to the remote record-keeping backend.
//! The HTTP implementation is in infra/http/source.rs

use crate::contract::{
    ActivityEntry, CareerNote, EducationRecord, Employee, PositionAssignment, TrainingRecord,
};
use anyhow::Result;
use async_trait::async_trait;

/// Collections served by the record-keeping backend
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// All employees (pegawai)
    async fn employees(&self) -> Result<Vec<Employee>>;

    /// All education records (pendidikan)
    async fn education_records(&self) -> Result<Vec<EducationRecord>>;

    /// All training records (penjenjangan)
    async fn training_records(&self) -> Result<Vec<TrainingRecord>>;

    /// All career notes (catatan karir)
    async fn career_notes(&self) -> Result<Vec<CareerNote>>;

    /// All position assignments (struktur)
    async fn positions(&self) -> Result<Vec<PositionAssignment>>;

    /// Latest activity entries, newest first
    async fn recent_activity(&self) -> Result<Vec<ActivityEntry>>;
}
