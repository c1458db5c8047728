// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{AdminAccess, ViewAccess},
    error::{ApiError, ErrorBody},
    models::{
        CreateElementRequest, ElementPage, ElementSummary, ElementView, ListElementsQuery,
        UpdateElementRequest,
    },
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/elements",
    params(ListElementsQuery),
    tag = "Elements",
    responses(
        (status = 200, description = "Top-level elements in insertion order", body = ElementPage),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_elements(
    _access: ViewAccess,
    State(state): State<AppState>,
    Query(query): Query<ListElementsQuery>,
) -> Result<Json<ElementPage>, ApiError> {
    Ok(Json(state.inventory.list_top_level_elements(&query)?))
}

#[utoipa::path(
    get,
    path = "/v1/element/{element_id}",
    params(("element_id" = String, Path, description = "Element identifier")),
    tag = "Elements",
    responses(
        (status = 200, description = "Element with children, interfaces and tags", body = ElementView),
        (status = 404, description = "Element not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_element(
    _access: ViewAccess,
    State(state): State<AppState>,
    Path(element_id): Path<String>,
) -> Result<Json<ElementView>, ApiError> {
    Ok(Json(state.inventory.get_element(&element_id)?))
}

#[utoipa::path(
    post,
    path = "/v1/element",
    request_body = CreateElementRequest,
    tag = "Elements",
    responses(
        (status = 201, description = "Element created", body = ElementView),
        (status = 400, description = "Invalid name", body = ErrorBody),
        (status = 404, description = "Parent not found", body = ErrorBody),
        (status = 409, description = "Name already in use", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_element(
    AdminAccess(user): AdminAccess,
    State(state): State<AppState>,
    Json(request): Json<CreateElementRequest>,
) -> Result<(StatusCode, Json<ElementView>), ApiError> {
    tracing::debug!(user_id = %user.user_id, name = %request.name, "Create element requested");
    let element = state.inventory.create_element(request, None)?;
    Ok((StatusCode::CREATED, Json(element)))
}

#[utoipa::path(
    post,
    path = "/v1/element/{element_id}",
    params(("element_id" = String, Path, description = "Parent element identifier")),
    request_body = CreateElementRequest,
    tag = "Elements",
    responses(
        (status = 201, description = "Child element created", body = ElementView),
        (status = 404, description = "Parent not found", body = ErrorBody),
        (status = 409, description = "Name already in use", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_child_element(
    AdminAccess(user): AdminAccess,
    State(state): State<AppState>,
    Path(parent_id): Path<String>,
    Json(request): Json<CreateElementRequest>,
) -> Result<(StatusCode, Json<ElementView>), ApiError> {
    tracing::debug!(
        user_id = %user.user_id,
        parent_id = %parent_id,
        name = %request.name,
        "Create child element requested"
    );
    let element = state.inventory.create_element(request, Some(parent_id))?;
    Ok((StatusCode::CREATED, Json(element)))
}

#[utoipa::path(
    put,
    path = "/v1/element/{element_id}",
    params(("element_id" = String, Path, description = "Element identifier")),
    request_body = UpdateElementRequest,
    tag = "Elements",
    responses(
        (status = 200, description = "Element updated", body = ElementView),
        (status = 404, description = "Element or parent not found", body = ErrorBody),
        (status = 409, description = "Name in use or parent cycle", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_element(
    _access: AdminAccess,
    State(state): State<AppState>,
    Path(element_id): Path<String>,
    Json(request): Json<UpdateElementRequest>,
) -> Result<Json<ElementView>, ApiError> {
    Ok(Json(state.inventory.update_element(&element_id, request)?))
}

#[utoipa::path(
    delete,
    path = "/v1/element/{element_id}",
    params(("element_id" = String, Path, description = "Element identifier")),
    tag = "Elements",
    responses(
        (status = 200, description = "Element deleted", body = ElementSummary),
        (status = 404, description = "Element not found", body = ErrorBody),
        (status = 409, description = "Element still has children, interfaces or tags", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_element(
    AdminAccess(user): AdminAccess,
    State(state): State<AppState>,
    Path(element_id): Path<String>,
) -> Result<Json<ElementSummary>, ApiError> {
    let deleted = state.inventory.delete_element(&element_id)?;
    tracing::debug!(user_id = %user.user_id, element_id = %element_id, "Element delete completed");
    Ok(Json(deleted))
}
