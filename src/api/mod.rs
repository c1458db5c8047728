// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::Role,
    error::{ApiError, ErrorBody},
    interfaces::{FieldDescriptor, InterfaceTypeInfo},
    models::{
        CreateElementRequest, ElementPage, ElementSummary, ElementView, InterfaceView, TagView,
        UpdateElementRequest,
    },
    state::AppState,
};

pub mod elements;
pub mod health;
pub mod interfaces;
pub mod tags;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/elements", get(elements::list_elements))
        .route("/element", post(elements::create_element))
        .route(
            "/element/{element_id}",
            get(elements::get_element)
                .post(elements::create_child_element)
                .put(elements::update_element)
                .patch(elements::update_element)
                .delete(elements::delete_element),
        )
        .route(
            "/element/{element_id}/tag/{tag}",
            post(tags::add_tag).delete(tags::delete_tag),
        )
        .route(
            "/element/{element_id}/{interface}",
            get(interfaces::view_interface)
                .post(interfaces::add_interface)
                .put(interfaces::update_interface)
                .patch(interfaces::update_interface)
                .delete(interfaces::delete_interface),
        )
        .route("/interfaces", get(interfaces::list_interface_types));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest("/v1", v1_routes)
        .fallback(not_found)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

async fn not_found() -> ApiError {
    ApiError::not_found("No such route")
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        elements::list_elements,
        elements::get_element,
        elements::create_element,
        elements::create_child_element,
        elements::update_element,
        elements::delete_element,
        interfaces::list_interface_types,
        interfaces::add_interface,
        interfaces::update_interface,
        interfaces::view_interface,
        interfaces::delete_interface,
        tags::add_tag,
        tags::delete_tag
    ),
    components(
        schemas(
            ElementSummary,
            ElementPage,
            ElementView,
            InterfaceView,
            TagView,
            CreateElementRequest,
            UpdateElementRequest,
            InterfaceTypeInfo,
            FieldDescriptor,
            ErrorBody,
            Role,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Elements", description = "Element hierarchy management"),
        (name = "Interfaces", description = "Typed, encrypted element interfaces"),
        (name = "Tags", description = "Element tags")
    )
)]
struct ApiDoc;

#[cfg(test)]
pub(crate) mod test_support {
    use tempfile::TempDir;

    use crate::auth::{AuthenticatedUser, Role};
    use crate::inventory::temp_inventory;
    use crate::state::AppState;

    /// App state over a fresh database, in development auth mode.
    pub fn test_state() -> (AppState, TempDir) {
        let (inventory, dir) = temp_inventory();
        (AppState::new(inventory), dir)
    }

    pub fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "admin_1".to_string(),
            role: Role::Admin,
        }
    }

    pub fn viewer() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "viewer_1".to_string(),
            role: Role::Viewer,
        }
    }
}
