//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::PersonnelApi;
pub use error::PersonnelError;
pub use model::{
    ActivityEntry, CareerNote, CareerStatus, DashboardSummary, EducationRecord, Employee,
    EmploymentStatus, GenderCount, Grade, Merged, OrgNode, ParentOrigin, PositionAssignment,
    PromotionDue, RankSexCount, RecentActivity, Religion, ResolvedPosition, RosterQuery,
    RosterSort, SalaryIncrementDue, Session, Sex, TrainingRecord,
};
