// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::AdminAccess,
    error::{ApiError, ErrorBody},
    models::ElementView,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/v1/element/{element_id}/tag/{tag}",
    params(
        ("element_id" = String, Path, description = "Element identifier"),
        ("tag" = String, Path, description = "Tag name")
    ),
    tag = "Tags",
    responses(
        (status = 201, description = "Tag added, returns the element", body = ElementView),
        (status = 404, description = "Element not found", body = ErrorBody),
        (status = 409, description = "Tag name already used by an element", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_tag(
    _access: AdminAccess,
    State(state): State<AppState>,
    Path((element_id, tag)): Path<(String, String)>,
) -> Result<(StatusCode, Json<ElementView>), ApiError> {
    let element = state.inventory.add_tag(&element_id, &tag)?;
    Ok((StatusCode::CREATED, Json(element)))
}

#[utoipa::path(
    delete,
    path = "/v1/element/{element_id}/tag/{tag}",
    params(
        ("element_id" = String, Path, description = "Element identifier"),
        ("tag" = String, Path, description = "Tag name")
    ),
    tag = "Tags",
    responses(
        (status = 200, description = "Tag removed (or was absent), returns the element", body = ElementView),
        (status = 404, description = "Element not found", body = ErrorBody)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_tag(
    _access: AdminAccess,
    State(state): State<AppState>,
    Path((element_id, tag)): Path<(String, String)>,
) -> Result<Json<ElementView>, ApiError> {
    Ok(Json(state.inventory.delete_tag(&element_id, &tag)?))
}
