// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    auth::{AdminAccess, ViewAccess},
    error::{ApiError, ErrorBody},
    interfaces::{Document, InterfaceTypeInfo},
    models::InterfaceView,
    state::AppState,
};

/// Interface payloads must be JSON objects.
fn into_document(body: Value) -> Result<Document, ApiError> {
    match body {
        Value::Object(document) => Ok(document),
        _ => Err(ApiError::bad_request("Interface data must be a JSON object")),
    }
}

#[utoipa::path(
    get,
    path = "/v1/interfaces",
    tag = "Interfaces",
    responses(
        (status = 200, description = "Registered interface types", body = [InterfaceTypeInfo])
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_interface_types(
    _access: ViewAccess,
    State(state): State<AppState>,
) -> Json<Vec<InterfaceTypeInfo>> {
    Json(state.inventory.list_interface_types())
}

#[utoipa::path(
    post,
    path = "/v1/element/{element_id}/{interface}",
    params(
        ("element_id" = String, Path, description = "Element identifier"),
        ("interface" = String, Path, description = "Interface type name")
    ),
    request_body(content = Value, description = "Interface metadata fields"),
    tag = "Interfaces",
    responses(
        (status = 201, description = "Interface added", body = InterfaceView),
        (status = 400, description = "Invalid interface data", body = ErrorBody),
        (status = 404, description = "Element or interface type not found", body = ErrorBody),
        (status = 409, description = "Element already has this interface", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_interface(
    _access: AdminAccess,
    State(state): State<AppState>,
    Path((element_id, interface)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<InterfaceView>), ApiError> {
    let document = into_document(body)?;
    let view = state
        .inventory
        .add_interface(&element_id, &interface, &document)?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    put,
    path = "/v1/element/{element_id}/{interface}",
    params(
        ("element_id" = String, Path, description = "Element identifier"),
        ("interface" = String, Path, description = "Interface type name")
    ),
    request_body(content = Value, description = "Fields merged into the stored metadata"),
    tag = "Interfaces",
    responses(
        (status = 200, description = "Interface updated", body = InterfaceView),
        (status = 400, description = "Invalid interface data", body = ErrorBody),
        (status = 404, description = "Interface not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_interface(
    _access: AdminAccess,
    State(state): State<AppState>,
    Path((element_id, interface)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<InterfaceView>, ApiError> {
    let document = into_document(body)?;
    let view = state
        .inventory
        .update_interface(&element_id, &interface, &document)?;
    Ok(Json(view))
}

#[utoipa::path(
    get,
    path = "/v1/element/{element_id}/{interface}",
    params(
        ("element_id" = String, Path, description = "Element identifier"),
        ("interface" = String, Path, description = "Interface type name")
    ),
    tag = "Interfaces",
    responses(
        (status = 200, description = "Interface with decrypted metadata", body = InterfaceView),
        (status = 404, description = "Interface not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn view_interface(
    _access: ViewAccess,
    State(state): State<AppState>,
    Path((element_id, interface)): Path<(String, String)>,
) -> Result<Json<InterfaceView>, ApiError> {
    Ok(Json(state.inventory.view_interface(&element_id, &interface)?))
}

#[utoipa::path(
    delete,
    path = "/v1/element/{element_id}/{interface}",
    params(
        ("element_id" = String, Path, description = "Element identifier"),
        ("interface" = String, Path, description = "Interface type name")
    ),
    tag = "Interfaces",
    responses((status = 204, description = "Interface removed (or was absent)")),
    security(("bearer_auth" = []))
)]
pub async fn delete_interface(
    _access: AdminAccess,
    State(state): State<AppState>,
    Path((element_id, interface)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.inventory.delete_interface(&element_id, &interface)?;
    Ok(StatusCode::NO_CONTENT)
}
