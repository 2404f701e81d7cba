use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::booking::{self, BookingStatus};
use crate::entities::{boat, feedback, payment, trip, user};
use crate::error::{AppError, AppResult};
use crate::utils::capacity;
use crate::utils::jwt::Claims;
use crate::utils::validation::{is_blank, is_valid_email};
use crate::AppState;

// ============ Trip Catalog ============

#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration: i32,
    pub capacity: i32,
    pub price: Decimal,
    pub location: Option<String>,
    pub route: Option<String>,
    pub image_url: Option<String>,
    pub available_seats: i32,
    pub boat: Option<BoatInfo>,
    pub guide: Option<GuideInfo>,
}

#[derive(Debug, Serialize)]
pub struct BoatInfo {
    pub id: Uuid,
    pub name: String,
    pub boat_type: Option<String>,
    pub capacity: i32,
}

#[derive(Debug, Serialize)]
pub struct GuideInfo {
    pub id: Uuid,
    pub name: String,
}

fn trip_response(
    trip: trip::Model,
    available: i32,
    boats: &[boat::Model],
    guides: &[user::Model],
) -> TripResponse {
    let boat = trip.boat_id.and_then(|bid| {
        boats.iter().find(|b| b.id == bid).map(|b| BoatInfo {
            id: b.id,
            name: b.name.clone(),
            boat_type: b.boat_type.clone(),
            capacity: b.capacity,
        })
    });

    let guide = trip.guide_id.and_then(|gid| {
        guides.iter().find(|g| g.id == gid).map(|g| GuideInfo {
            id: g.id,
            name: format!("{} {}", g.first_name, g.second_name),
        })
    });

    TripResponse {
        id: trip.id,
        name: trip.name,
        description: trip.description,
        date: trip.date,
        start_time: trip.start_time,
        end_time: trip.end_time,
        duration: trip.duration,
        capacity: trip.capacity,
        price: trip.price,
        location: trip.location,
        route: trip.route,
        image_url: trip.image_url,
        available_seats: available,
        boat,
        guide,
    }
}

/// List upcoming trips open for booking
pub async fn list_trips(State(state): State<AppState>) -> AppResult<Json<Vec<TripResponse>>> {
    let now = Utc::now();
    let today = now.date_naive();

    let trips = trip::Entity::find().all(&state.db).await?;
    let boats = boat::Entity::find().all(&state.db).await?;
    let guides = user::Entity::find()
        .filter(user::Column::Role.eq(user::UserRole::Guide))
        .all(&state.db)
        .await?;

    let mut responses = Vec::new();
    for t in trips {
        // Skip past trips
        if t.date < today {
            continue;
        }

        let bookings = booking::Entity::find()
            .filter(booking::Column::TripId.eq(t.id))
            .all(&state.db)
            .await?;
        let booked = capacity::booked_seats(&bookings, now);
        let available = capacity::available_seats(t.capacity, booked);

        responses.push(trip_response(t, available, &boats, &guides));
    }

    Ok(Json(responses))
}

/// Get trip details
pub async fn get_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> AppResult<Json<TripResponse>> {
    let now = Utc::now();

    let trip = trip::Entity::find_by_id(trip_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

    let boats = boat::Entity::find().all(&state.db).await?;
    let guides = user::Entity::find()
        .filter(user::Column::Role.eq(user::UserRole::Guide))
        .all(&state.db)
        .await?;

    let bookings = booking::Entity::find()
        .filter(booking::Column::TripId.eq(trip.id))
        .all(&state.db)
        .await?;
    let booked = capacity::booked_seats(&bookings, now);
    let available = capacity::available_seats(trip.capacity, booked);

    Ok(Json(trip_response(trip, available, &boats, &guides)))
}

// ============ Boats ============

/// List the fleet
pub async fn list_boats(State(state): State<AppState>) -> AppResult<Json<Vec<boat::Model>>> {
    let boats = boat::Entity::find().all(&state.db).await?;
    Ok(Json(boats))
}

/// Get boat details
pub async fn get_boat(
    State(state): State<AppState>,
    Path(boat_id): Path<Uuid>,
) -> AppResult<Json<boat::Model>> {
    let boat = boat::Entity::find_by_id(boat_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Boat not found".to_string()))?;

    Ok(Json(boat))
}

// ============ Booking Lifecycle ============

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub trip_id: Uuid,
    pub name: String,
    pub contact: String,
    pub email: String,
    pub passengers: i32,
}

/// Create a provisional booking holding seats for a limited time
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<booking::Model>)> {
    tracing::info!(
        customer = %claims.sub,
        trip = %payload.trip_id,
        passengers = payload.passengers,
        "create booking"
    );

    if is_blank(&payload.name) {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if is_blank(&payload.contact) {
        return Err(AppError::BadRequest(
            "Contact number is required".to_string(),
        ));
    }
    if !is_valid_email(&payload.email) {
        return Err(AppError::BadRequest("Valid email is required".to_string()));
    }
    if payload.passengers < 1 {
        return Err(AppError::BadRequest(
            "Number of passengers must be at least 1".to_string(),
        ));
    }

    // The capacity check and the insert run in one transaction holding an
    // exclusive lock on the trip row, so two near-capacity requests cannot
    // both pass the check and overbook the trip.
    let txn = state.db.begin().await?;

    let trip = trip::Entity::find_by_id(payload.trip_id)
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

    let now = Utc::now();
    let bookings = booking::Entity::find()
        .filter(booking::Column::TripId.eq(trip.id))
        .all(&txn)
        .await?;
    let booked = capacity::booked_seats(&bookings, now);

    if booked + payload.passengers > trip.capacity {
        return Err(AppError::BadRequest(format!(
            "Not enough seats available. Available: {}",
            capacity::available_seats(trip.capacity, booked)
        )));
    }

    let total_cost = trip.price * Decimal::from(payload.passengers);
    let hold_expires_at = now + Duration::minutes(state.config.booking_hold_minutes);

    let new_booking = booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        trip_id: Set(trip.id),
        customer_id: Set(claims.sub),
        name: Set(payload.name.trim().to_string()),
        contact: Set(payload.contact.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        passengers: Set(payload.passengers),
        status: Set(BookingStatus::Provisional),
        hold_expires_at: Set(Some(hold_expires_at.into())),
        total_cost: Set(total_cost),
        ..Default::default()
    };

    let saved = new_booking.insert(&txn).await?;
    txn.commit().await?;

    tracing::info!(booking = %saved.id, total = %saved.total_cost, "booking held");

    Ok((StatusCode::CREATED, Json(saved)))
}

/// Confirm a provisional booking before its hold lapses
pub async fn confirm_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(booking_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let booking = booking::Entity::find_by_id(booking_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.customer_id != claims.sub {
        return Err(AppError::Forbidden(
            "You can only confirm your own bookings".to_string(),
        ));
    }

    let now = Utc::now();
    if capacity::hold_expired(booking.hold_expires_at, now) {
        expire_booking(&state, booking).await?;
        return Err(AppError::InvalidState("Booking has expired".to_string()));
    }

    if booking.status != BookingStatus::Provisional {
        return Err(AppError::InvalidState(
            "Booking is not in PROVISIONAL state".to_string(),
        ));
    }

    let mut active: booking::ActiveModel = booking.into();
    active.status = Set(BookingStatus::Confirmed);
    active.update(&state.db).await?;

    tracing::info!(booking = %booking_id, "booking confirmed");

    Ok(StatusCode::OK)
}

/// Lazy expiry: an abandoned hold is flipped to EXPIRED the moment a
/// request touches it, so it stops counting toward anything.
async fn expire_booking(state: &AppState, booking: booking::Model) -> AppResult<()> {
    let id = booking.id;
    let mut active: booking::ActiveModel = booking.into();
    active.status = Set(BookingStatus::Expired);
    active.update(&state.db).await?;
    tracing::info!(booking = %id, "hold lapsed, booking expired");
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct PayBookingRequest {
    pub method: String,
    pub card_holder_name: Option<String>,
}

/// Pay for a provisional booking; a successful payment confirms it
pub async fn pay_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<PayBookingRequest>,
) -> AppResult<(StatusCode, Json<payment::Model>)> {
    if is_blank(&payload.method) {
        return Err(AppError::BadRequest(
            "Payment method is required".to_string(),
        ));
    }

    let booking = booking::Entity::find_by_id(booking_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.customer_id != claims.sub {
        return Err(AppError::Forbidden(
            "You can only pay for your own bookings".to_string(),
        ));
    }

    let now = Utc::now();
    if capacity::hold_expired(booking.hold_expires_at, now) {
        expire_booking(&state, booking).await?;
        return Err(AppError::InvalidState("Booking has expired".to_string()));
    }

    if booking.status != BookingStatus::Provisional {
        return Err(AppError::InvalidState(
            "Booking is not in PROVISIONAL state".to_string(),
        ));
    }

    // Record the payment and confirm the booking together.
    let txn = state.db.begin().await?;

    let new_payment = payment::ActiveModel {
        id: Set(Uuid::new_v4()),
        booking_id: Set(booking.id),
        method: Set(payload.method.trim().to_string()),
        amount: Set(booking.total_cost),
        card_holder_name: Set(payload.card_holder_name.clone()),
        ..Default::default()
    };
    let saved = new_payment.insert(&txn).await?;

    let mut active: booking::ActiveModel = booking.into();
    active.status = Set(BookingStatus::Confirmed);
    active.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(booking = %booking_id, payment = %saved.id, "booking paid and confirmed");

    Ok((StatusCode::CREATED, Json(saved)))
}

/// List the caller's bookings
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<BookingSummary>>> {
    let bookings = booking::Entity::find()
        .filter(booking::Column::CustomerId.eq(claims.sub))
        .all(&state.db)
        .await?;

    let trips = trip::Entity::find().all(&state.db).await?;

    let responses: Vec<BookingSummary> = bookings
        .into_iter()
        .filter_map(|b| {
            let trip = trips.iter().find(|t| t.id == b.trip_id)?;
            Some(BookingSummary {
                id: b.id,
                trip_id: trip.id,
                trip_name: trip.name.clone(),
                date: trip.date,
                start_time: trip.start_time,
                passengers: b.passengers,
                status: b.status,
                hold_expires_at: b.hold_expires_at.map(|t| t.with_timezone(&Utc)),
                total_cost: b.total_cost,
                created_at: b.created_at.with_timezone(&Utc),
            })
        })
        .collect();

    Ok(Json(responses))
}

#[derive(Debug, Serialize)]
pub struct BookingSummary {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub trip_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub passengers: i32,
    pub status: BookingStatus,
    pub hold_expires_at: Option<DateTime<Utc>>,
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Get one of the caller's bookings
pub async fn get_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(booking_id): Path<Uuid>,
) -> AppResult<Json<booking::Model>> {
    let booking = booking::Entity::find_by_id(booking_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.customer_id != claims.sub {
        return Err(AppError::Forbidden(
            "You can only view your own bookings".to_string(),
        ));
    }

    Ok(Json(booking))
}

// ============ Feedback ============

#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    pub booking_id: Uuid,
    pub rating: i32,
    pub comments: Option<String>,
}

/// Leave feedback on an own booking
pub async fn create_feedback(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateFeedbackRequest>,
) -> AppResult<(StatusCode, Json<feedback::Model>)> {
    if payload.rating < 1 || payload.rating > 5 {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    let booking = booking::Entity::find_by_id(payload.booking_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.customer_id != claims.sub {
        return Err(AppError::Forbidden(
            "You can only leave feedback on your own bookings".to_string(),
        ));
    }

    let new_feedback = feedback::ActiveModel {
        id: Set(Uuid::new_v4()),
        booking_id: Set(booking.id),
        customer_id: Set(claims.sub),
        rating: Set(payload.rating),
        comments: Set(payload.comments.clone()),
        ..Default::default()
    };

    let saved = new_feedback.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(saved)))
}

/// List the caller's feedback
pub async fn my_feedback(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> AppResult<Json<Vec<feedback::Model>>> {
    let feedback = feedback::Entity::find()
        .filter(feedback::Column::CustomerId.eq(claims.sub))
        .all(&state.db)
        .await?;

    Ok(Json(feedback))
}
