//! Route definitions for the Deskbook HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.

use axum::Router;
use axum::routing::{delete, get, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the API router and thread `AppState` through every route.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(area_routes())
        .merge(item_group_routes())
        .merge(booking_routes())
        .merge(admin_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Inventory reads, availability, presence
fn area_routes() -> Router<AppState> {
    Router::new()
        .route("/areas", get(handlers::areas::list_areas))
        .route("/areas/{id}", get(handlers::areas::get_area))
        .route(
            "/areas/{id}/item-groups",
            get(handlers::areas::list_item_groups),
        )
        .route(
            "/areas/{id}/availability",
            get(handlers::areas::get_availability),
        )
        .route("/areas/{id}/presence", get(handlers::areas::get_presence))
}

fn item_group_routes() -> Router<AppState> {
    Router::new().route(
        "/item-groups/{id}/items",
        get(handlers::item_groups::list_items),
    )
}

fn booking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookings",
            get(handlers::bookings::list_bookings).post(handlers::bookings::create_booking),
        )
        .route("/bookings/history", get(handlers::bookings::list_history))
        .route("/bookings/{id}", delete(handlers::bookings::cancel_booking))
}

/// Inventory administration (admin only)
fn admin_routes() -> Router<AppState> {
    use handlers::admin::{inventory, snapshot};

    Router::new()
        .route("/admin/areas", post(inventory::create_area))
        .route(
            "/admin/areas/{id}",
            put(inventory::update_area).delete(inventory::delete_area),
        )
        .route("/admin/item-groups", post(inventory::create_item_group))
        .route(
            "/admin/item-groups/{id}",
            put(inventory::update_item_group).delete(inventory::delete_item_group),
        )
        .route("/admin/items", post(inventory::create_item))
        .route(
            "/admin/items/{id}",
            put(inventory::update_item).delete(inventory::delete_item),
        )
        .route("/admin/reload", post(snapshot::reload))
}
