use crate::{handlers, AppState};
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Auth
        .route("/api/login", post(handlers::auth::login))
        // Dashboards
        .route("/api/admin/dashboard", get(handlers::dashboard::admin_dashboard))
        .route(
            "/api/student/dashboard/{student_id}",
            get(handlers::dashboard::student_dashboard),
        )
        // Rooms
        .route("/api/rooms", get(handlers::rooms::list_rooms))
        .route(
            "/api/rooms/{identifier}/details",
            get(handlers::rooms::room_details),
        )
        // Payments
        .route("/api/payments", get(handlers::payments::list_payments))
        .route(
            "/api/payments/{payment_id}",
            put(handlers::payments::update_payment),
        )
        // Complaints
        .route(
            "/api/complaints",
            get(handlers::complaints::list_complaints).post(handlers::complaints::create_complaint),
        )
        .route(
            "/api/complaints/{complaint_id}",
            put(handlers::complaints::update_complaint),
        )
        // Menu
        .route("/api/menu", get(handlers::menu::weekly_menu))
        // Waiting list
        .route(
            "/api/waiting-list",
            get(handlers::waiting_list::list_waiting).post(handlers::waiting_list::join_waiting_list),
        )
        .route(
            "/api/admin/waiting-list/{waiting_id}/assign",
            post(handlers::waiting_list::assign_waiting),
        )
        // Maintenance
        .route(
            "/api/maintenance",
            get(handlers::maintenance::list_maintenance)
                .post(handlers::maintenance::create_maintenance),
        )
        // Room changes
        .route(
            "/api/room-change-requests",
            get(handlers::room_changes::list_room_changes)
                .post(handlers::room_changes::create_room_change),
        )
        .route(
            "/api/room-change-requests/{request_id}/approve",
            put(handlers::room_changes::approve_room_change),
        )
        .route(
            "/api/room-change-requests/{request_id}/deny",
            put(handlers::room_changes::deny_room_change),
        )
        // Announcements
        .route(
            "/api/announcements",
            get(handlers::announcements::list_announcements)
                .post(handlers::announcements::create_announcement),
        )
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(TraceLayer::new_for_http())
}
