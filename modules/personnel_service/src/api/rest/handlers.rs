//! HTTP request handlers - thin layer that delegates to domain service

use super::auth::AuthSession;
use super::dto::*;
use super::error::{map_domain_error, Problem};
use super::mapper::parse_roster_sort;
use crate::contract::{EducationRecord, RosterQuery};
use crate::domain::Service;
use axum::{extract::Query, http::StatusCode, Extension, Json};
use std::sync::Arc;

type SharedService = Extension<Arc<Service>>;

/// Employee list with optional name search and sort mode
pub async fn list_employees(
    Extension(service): SharedService,
    AuthSession(session): AuthSession,
    Query(params): Query<RosterParams>,
) -> Result<Json<ListResponse<EmployeeDto>>, Problem> {
    let sort = parse_roster_sort(params.sort.as_deref()).ok_or_else(|| {
        Problem::new(StatusCode::BAD_REQUEST, "Validation Error")
            .with_detail("sort must be one of: default, golongan, kgb")
    })?;
    let query = RosterQuery {
        search: params.q,
        sort,
    };

    let employees = service
        .roster(&session, &query)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(
        employees.into_iter().map(EmployeeDto::from).collect::<Vec<_>>().into(),
    ))
}

pub async fn list_education(
    Extension(service): SharedService,
    AuthSession(session): AuthSession,
    Query(params): Query<SearchParams>,
) -> Result<Json<ListResponse<EducationDto>>, Problem> {
    let rows = service
        .education(&session, params.q.as_deref())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(rows.into_iter().map(EducationDto::from).collect::<Vec<_>>().into()))
}

/// Advisory check for a new or edited education record
pub async fn validate_education(
    Extension(service): SharedService,
    AuthSession(session): AuthSession,
    Json(req): Json<EducationEntryRequest>,
) -> Result<StatusCode, Problem> {
    let candidate: EducationRecord = req.into();
    service
        .check_education_entry(&session, &candidate)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_training(
    Extension(service): SharedService,
    AuthSession(session): AuthSession,
    Query(params): Query<SearchParams>,
) -> Result<Json<ListResponse<TrainingDto>>, Problem> {
    let rows = service
        .training(&session, params.q.as_deref())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(rows.into_iter().map(TrainingDto::from).collect::<Vec<_>>().into()))
}

pub async fn list_career_notes(
    Extension(service): SharedService,
    AuthSession(session): AuthSession,
    Query(params): Query<SearchParams>,
) -> Result<Json<ListResponse<CareerNoteDto>>, Problem> {
    let rows = service
        .career_notes(&session, params.q.as_deref())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(rows.into_iter().map(CareerNoteDto::from).collect::<Vec<_>>().into()))
}

/// Position list with resolved parents
pub async fn list_structure(
    Extension(service): SharedService,
    AuthSession(session): AuthSession,
    Query(params): Query<SearchParams>,
) -> Result<Json<ListResponse<PositionDto>>, Problem> {
    let rows = service
        .structure(&session, params.q.as_deref())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(rows.into_iter().map(PositionDto::from).collect::<Vec<_>>().into()))
}

pub async fn get_organigram(
    Extension(service): SharedService,
    AuthSession(session): AuthSession,
) -> Result<Json<Vec<OrgNodeDto>>, Problem> {
    let roots = service
        .organigram(&session)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(roots.into_iter().map(OrgNodeDto::from).collect()))
}

pub async fn get_dashboard(
    Extension(service): SharedService,
    AuthSession(session): AuthSession,
) -> Result<Json<DashboardDto>, Problem> {
    let summary = service
        .dashboard(&session)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(summary.into()))
}
