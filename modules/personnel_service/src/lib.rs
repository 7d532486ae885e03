//! Personnel Service Module
//!
//! Read-side views over a station's personnel records: employee roster,
//! education, training and career notes joined with employee names, the
//! position hierarchy with inferred parents, the organisation chart and the
//! landing page dashboard.

// Public exports
pub mod contract;
pub use contract::{
    client::PersonnelApi, error::PersonnelError, CareerNote, DashboardSummary, EducationRecord,
    Employee, Merged, OrgNode, PositionAssignment, ResolvedPosition, RosterQuery, RosterSort,
    Session, TrainingRecord,
};

pub mod config;
pub use config::Config;

pub mod module;
pub use module::PersonnelModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
