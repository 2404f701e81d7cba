use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{admin, auth, customer, support};
use crate::middleware::auth::{auth_middleware, require_admin, require_customer, require_support};
use crate::middleware::rate_limit::create_public_governor;
use crate::middleware::role_rate_limit::{create_role_governor, RateLimitedRole};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Create role-specific governor layers
    let customer_governor = create_role_governor(RateLimitedRole::Customer);
    let support_governor = create_role_governor(RateLimitedRole::Support);
    // Create IP-based governor for public routes (with customer-level limits)
    let public_governor = create_public_governor();

    // Public routes (with customer-level rate limiting per IP)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(public_governor.clone());

    // Public catalog and contact routes
    let public_routes = Router::new()
        .route("/trips", get(customer::list_trips))
        .route("/trips/{id}", get(customer::get_trip))
        .route("/boats", get(customer::list_boats))
        .route("/boats/{id}", get(customer::get_boat))
        .route("/support/contact", post(support::contact))
        .route("/support/staff", get(support::staff_directory))
        .layer(public_governor);

    // Admin routes (requires auth + admin role)
    let admin_routes = Router::new()
        // Boat management
        .route("/boats", get(admin::list_boats))
        .route("/boats", post(admin::create_boat))
        .route("/boats/{id}", put(admin::update_boat))
        .route("/boats/{id}", delete(admin::delete_boat))
        // Trip management
        .route("/trips", get(admin::list_trips))
        .route("/trips", post(admin::create_trip))
        .route("/trips/{id}", put(admin::update_trip))
        .route("/trips/{id}", delete(admin::delete_trip))
        .route("/trips/{id}/assign-guide", post(admin::assign_guide))
        .route("/trips/{id}/bookings", get(admin::trip_bookings))
        // User management
        .route("/users", get(admin::list_all_users))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/users/{id}/role", put(admin::update_user_role))
        // Booking management
        .route("/bookings", get(admin::list_all_bookings))
        .route("/bookings/{id}", delete(admin::delete_booking))
        // Payments
        .route("/payments", get(admin::list_payments))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Support-desk routes (requires auth + IT support or admin role)
    let support_routes = Router::new()
        .route("/tickets", get(support::list_tickets))
        .route("/tickets/{id}/status", put(support::update_ticket_status))
        .route("/bookings", get(support::booking_history))
        .layer(support_governor)
        .layer(middleware::from_fn(require_support))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Booking routes (requires auth + customer role)
    let booking_routes = Router::new()
        .route("/", post(customer::create_booking))
        .route("/", get(customer::my_bookings))
        .route("/{id}", get(customer::get_booking))
        .route("/{id}/confirm", post(customer::confirm_booking))
        .route("/{id}/pay", post(customer::pay_booking))
        .layer(customer_governor.clone())
        .layer(middleware::from_fn(require_customer))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Feedback routes (requires auth + customer role)
    let feedback_routes = Router::new()
        .route("/", post(customer::create_feedback))
        .route("/", get(customer::my_feedback))
        .layer(customer_governor)
        .layer(middleware::from_fn(require_customer))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api", public_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/support", support_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/feedback", feedback_routes)
        .with_state(state)
}
