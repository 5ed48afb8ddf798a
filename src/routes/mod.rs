use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{admin, auth, booking, bus, oauth, rental, review, user};
use crate::middleware::auth::{auth_middleware, require_admin};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public auth endpoints
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route(
            "/o/google",
            get(oauth::google_oauth_get).post(oauth::google_oauth),
        );

    // Public resource endpoints
    let api_routes = Router::new()
        .route("/buses", get(bus::list_buses))
        .route("/buses/{id}", get(bus::get_bus))
        .route("/routes", get(bus::list_routes))
        .route("/routes/{id}", get(bus::get_route))
        .route("/bus-routes", get(bus::list_bus_routes))
        .route("/bus-routes", post(bus::create_bus_route))
        .route("/bus-routes/{id}", get(bus::get_bus_route))
        .route("/bus-routes/{id}", put(bus::update_bus_route))
        .route("/bus-routes/{id}", delete(bus::delete_bus_route))
        .route("/bookings", get(booking::list_bookings))
        .route("/bookings", post(booking::create_booking))
        .route("/bookings/{id}", get(booking::get_booking))
        .route("/bookings/{id}", delete(booking::delete_booking))
        .route("/booking-details", get(booking::list_booking_details))
        .route("/booking-details/{id}", get(booking::get_booking_detail))
        .route("/feedback-reviews", get(review::list_feedback_reviews))
        .route("/feedback-reviews/{id}", get(review::get_feedback_review))
        .route("/feedback-reviews/{id}", put(review::update_feedback_review))
        .route(
            "/feedback-reviews/{id}",
            delete(review::delete_feedback_review),
        )
        .route("/faqs", get(review::list_faqs))
        .route("/faqs/{id}", get(review::get_faq))
        .route("/users", get(user::list_users))
        .route("/users/{id}", get(user::get_user));

    // Posting feedback requires a logged-in user
    let feedback_routes = Router::new()
        .route("/feedback-reviews", post(review::create_feedback_review))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Fleet management (requires auth + admin user type)
    let admin_routes = Router::new()
        .route("/buses", post(admin::create_bus))
        .route("/buses/{id}", put(admin::update_bus))
        .route("/buses/{id}", delete(admin::delete_bus))
        .route("/routes", post(admin::create_route))
        .route("/routes/{id}", put(admin::update_route))
        .route("/routes/{id}", delete(admin::delete_route))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(auth_routes)
        .route("/reservations", post(rental::create_reservation))
        .nest("/api/v1", api_routes.merge(feedback_routes))
        .nest("/api/admin", admin_routes)
        .with_state(state)
}
