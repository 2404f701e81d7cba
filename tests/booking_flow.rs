use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use boat_safari_backend::entities::booking::{self, BookingStatus};
use boat_safari_backend::entities::trip;
use boat_safari_backend::entities::user::UserRole;
use boat_safari_backend::handlers::{admin, customer, support};
use boat_safari_backend::utils::jwt::Claims;
use boat_safari_backend::{AppError, AppState, Config};

fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_expiration_hours: 24,
        booking_hold_minutes: 15,
        server_host: "127.0.0.1".to_string(),
        server_port: 3000,
    }
}

fn state_with(db: DatabaseConnection) -> AppState {
    AppState {
        db,
        config: test_config(),
    }
}

fn customer_claims(user_id: Uuid) -> Claims {
    let now = Utc::now();
    Claims {
        sub: user_id,
        email: "amal@example.com".to_string(),
        role: UserRole::Customer,
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    }
}

fn whale_trip(capacity: i32) -> trip::Model {
    trip::Model {
        id: Uuid::new_v4(),
        name: "Mirissa Whale Watching".to_string(),
        description: None,
        date: NaiveDate::from_ymd_opt(2030, 1, 15).unwrap(),
        start_time: NaiveTime::from_hms_opt(6, 30, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        duration: 240,
        capacity,
        price: Decimal::new(4500, 2),
        location: Some("Mirissa".to_string()),
        route: None,
        image_url: None,
        boat_id: None,
        guide_id: None,
        created_at: Utc::now().into(),
    }
}

fn confirmed_booking(trip_id: Uuid, passengers: i32) -> booking::Model {
    booking::Model {
        id: Uuid::new_v4(),
        trip_id,
        customer_id: Uuid::new_v4(),
        name: "Earlier Party".to_string(),
        contact: "0770000000".to_string(),
        email: "earlier@example.com".to_string(),
        passengers,
        status: BookingStatus::Confirmed,
        hold_expires_at: None,
        total_cost: Decimal::new(4500, 2) * Decimal::from(passengers),
        created_at: Utc::now().into(),
    }
}

fn booking_request(trip_id: Uuid, passengers: i32) -> customer::CreateBookingRequest {
    customer::CreateBookingRequest {
        trip_id,
        name: "Amal Fernando".to_string(),
        contact: "0771234567".to_string(),
        email: "amal@example.com".to_string(),
        passengers,
    }
}

// ============ Booking creation: validation ============

#[tokio::test]
async fn booking_requires_a_name() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let mut request = booking_request(Uuid::new_v4(), 2);
    request.name = "   ".to_string();

    let err = customer::create_booking(
        State(state_with(db)),
        Extension(customer_claims(Uuid::new_v4())),
        Json(request),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(err.to_string(), "Name is required");
}

#[tokio::test]
async fn booking_requires_a_contact_number() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let mut request = booking_request(Uuid::new_v4(), 2);
    request.contact = "".to_string();

    let err = customer::create_booking(
        State(state_with(db)),
        Extension(customer_claims(Uuid::new_v4())),
        Json(request),
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Contact number is required");
}

#[tokio::test]
async fn booking_rejects_malformed_email() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let mut request = booking_request(Uuid::new_v4(), 2);
    request.email = "not-an-email".to_string();

    let err = customer::create_booking(
        State(state_with(db)),
        Extension(customer_claims(Uuid::new_v4())),
        Json(request),
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Valid email is required");
}

#[tokio::test]
async fn booking_requires_at_least_one_passenger() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = customer::create_booking(
        State(state_with(db)),
        Extension(customer_claims(Uuid::new_v4())),
        Json(booking_request(Uuid::new_v4(), 0)),
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Number of passengers must be at least 1");
}

#[tokio::test]
async fn booking_fails_for_missing_trip() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<trip::Model>::new()])
        .into_connection();

    let err = customer::create_booking(
        State(state_with(db)),
        Extension(customer_claims(Uuid::new_v4())),
        Json(booking_request(Uuid::new_v4(), 2)),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(err.to_string(), "Trip not found");
}

// ============ Booking creation: capacity ============

#[tokio::test]
async fn booking_reports_remaining_seats_when_full() {
    let trip = whale_trip(10);
    let trip_id = trip.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![trip]])
        .append_query_results([vec![confirmed_booking(trip_id, 8)]])
        .into_connection();

    let err = customer::create_booking(
        State(state_with(db)),
        Extension(customer_claims(Uuid::new_v4())),
        Json(booking_request(trip_id, 3)),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(err.to_string(), "Not enough seats available. Available: 2");
}

#[tokio::test]
async fn booking_succeeds_when_seats_remain() {
    let trip = whale_trip(10);
    let trip_id = trip.id;
    let customer_id = Uuid::new_v4();

    let held = booking::Model {
        id: Uuid::new_v4(),
        trip_id,
        customer_id,
        name: "Amal Fernando".to_string(),
        contact: "0771234567".to_string(),
        email: "amal@example.com".to_string(),
        passengers: 2,
        status: BookingStatus::Provisional,
        hold_expires_at: Some((Utc::now() + Duration::minutes(15)).into()),
        total_cost: Decimal::new(9000, 2),
        created_at: Utc::now().into(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![trip]])
        .append_query_results([vec![confirmed_booking(trip_id, 8)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![held]])
        .into_connection();

    let (status, Json(saved)) = customer::create_booking(
        State(state_with(db)),
        Extension(customer_claims(customer_id)),
        Json(booking_request(trip_id, 2)),
    )
    .await
    .unwrap();

    assert_eq!(status, axum::http::StatusCode::CREATED);
    assert_eq!(saved.status, BookingStatus::Provisional);
    assert_eq!(saved.passengers, 2);
    // price 45.00 x 2 passengers
    assert_eq!(saved.total_cost, Decimal::new(9000, 2));
}

// ============ Confirmation ============

fn own_provisional_booking(customer_id: Uuid, minutes_from_now: i64) -> booking::Model {
    booking::Model {
        id: Uuid::new_v4(),
        trip_id: Uuid::new_v4(),
        customer_id,
        name: "Amal Fernando".to_string(),
        contact: "0771234567".to_string(),
        email: "amal@example.com".to_string(),
        passengers: 2,
        status: BookingStatus::Provisional,
        hold_expires_at: Some((Utc::now() + Duration::minutes(minutes_from_now)).into()),
        total_cost: Decimal::new(9000, 2),
        created_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn confirm_fails_for_missing_booking() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<booking::Model>::new()])
        .into_connection();

    let err = customer::confirm_booking(
        State(state_with(db)),
        Extension(customer_claims(Uuid::new_v4())),
        Path(Uuid::new_v4()),
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Booking not found");
}

#[tokio::test]
async fn confirm_rejects_other_peoples_bookings() {
    let booking = own_provisional_booking(Uuid::new_v4(), 10);
    let booking_id = booking.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![booking]])
        .into_connection();

    let err = customer::confirm_booking(
        State(state_with(db)),
        Extension(customer_claims(Uuid::new_v4())),
        Path(booking_id),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn confirm_fails_once_the_hold_has_lapsed() {
    let customer_id = Uuid::new_v4();
    let booking = own_provisional_booking(customer_id, -5);
    let booking_id = booking.id;
    let expired = booking::Model {
        status: BookingStatus::Expired,
        ..booking.clone()
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![booking]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results([vec![expired]])
        .into_connection();

    let err = customer::confirm_booking(
        State(state_with(db)),
        Extension(customer_claims(customer_id)),
        Path(booking_id),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::InvalidState(_)));
    assert_eq!(err.to_string(), "Booking has expired");
}

#[tokio::test]
async fn confirm_fails_when_already_confirmed() {
    let customer_id = Uuid::new_v4();
    let booking = booking::Model {
        status: BookingStatus::Confirmed,
        ..own_provisional_booking(customer_id, 10)
    };
    let booking_id = booking.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![booking]])
        .into_connection();

    let err = customer::confirm_booking(
        State(state_with(db)),
        Extension(customer_claims(customer_id)),
        Path(booking_id),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::InvalidState(_)));
    assert_eq!(err.to_string(), "Booking is not in PROVISIONAL state");
}

// ============ Role assignment ============

#[tokio::test]
async fn role_assignment_rejects_unknown_roles() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = admin::update_user_role(
        State(state_with(db)),
        Path(Uuid::new_v4()),
        Json(admin::UpdateRoleRequest {
            role: "SKIPPER".to_string(),
        }),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::UnsupportedRole(_)));
    assert_eq!(err.to_string(), "Unsupported role: SKIPPER");
}

// ============ Support contact ============

#[tokio::test]
async fn contact_form_requires_all_fields() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = support::contact(
        State(state_with(db)),
        Json(support::ContactRequest {
            name: "Amal Fernando".to_string(),
            email: "amal@example.com".to_string(),
            phone: None,
            subject: "  ".to_string(),
            message: "My booking receipt never arrived".to_string(),
            preferred_contact: None,
        }),
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Please fill all required fields.");
}
