//! Domain layer - business logic and services

pub mod dashboard;
pub mod hierarchy;
pub mod merge;
pub mod repository;
pub mod roster;
pub mod service;
pub mod session;
pub mod validation;

pub use hierarchy::{HierarchyResolver, OrgPosition, PlacementRule, STATION_RULES};
pub use merge::{merge, search_by_display_name, EmployeeRef, NameIndex};
pub use repository::RecordSource;
pub use service::Service;
pub use session::{
    ensure_active, route_access, IdentityProvider, RouteAccess, SessionCache,
    StaticIdentityProvider,
};
