use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::booking::{self, BookingStatus};
use crate::entities::user::{self, UserRole};
use crate::entities::{boat, feedback, payment, trip};
use crate::error::{AppError, AppResult};
use crate::utils::capacity;
use crate::AppState;

// ============ Boat Management ============

#[derive(Debug, Deserialize)]
pub struct CreateBoatRequest {
    pub name: String,
    pub model: Option<String>,
    pub features: Option<String>,
    pub registration_number: Option<String>,
    pub status: Option<String>,
    pub capacity: i32,
    pub description: Option<String>,
    pub boat_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBoatRequest {
    pub name: Option<String>,
    pub model: Option<String>,
    pub features: Option<String>,
    pub registration_number: Option<String>,
    pub status: Option<String>,
    pub capacity: Option<i32>,
    pub description: Option<String>,
    pub boat_type: Option<String>,
}

/// List the fleet (admin)
pub async fn list_boats(State(state): State<AppState>) -> AppResult<Json<Vec<boat::Model>>> {
    let boats = boat::Entity::find().all(&state.db).await?;
    Ok(Json(boats))
}

/// Register a new boat (admin)
pub async fn create_boat(
    State(state): State<AppState>,
    Json(payload): Json<CreateBoatRequest>,
) -> AppResult<(StatusCode, Json<boat::Model>)> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Boat name is required".to_string()));
    }
    if payload.capacity < 1 {
        return Err(AppError::BadRequest(
            "Boat capacity must be positive".to_string(),
        ));
    }

    let new_boat = boat::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        model: Set(payload.model),
        features: Set(payload.features),
        registration_number: Set(payload.registration_number),
        status: Set(payload.status),
        capacity: Set(payload.capacity),
        description: Set(payload.description),
        boat_type: Set(payload.boat_type),
        ..Default::default()
    };

    let result = new_boat.insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Update a boat (admin)
pub async fn update_boat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBoatRequest>,
) -> AppResult<Json<boat::Model>> {
    let boat = boat::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Boat not found".to_string()))?;

    let mut active: boat::ActiveModel = boat.into();

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Boat name is required".to_string()));
        }
        active.name = Set(name.trim().to_string());
    }
    if let Some(capacity) = payload.capacity {
        if capacity < 1 {
            return Err(AppError::BadRequest(
                "Boat capacity must be positive".to_string(),
            ));
        }
        active.capacity = Set(capacity);
    }
    if payload.model.is_some() {
        active.model = Set(payload.model);
    }
    if payload.features.is_some() {
        active.features = Set(payload.features);
    }
    if payload.registration_number.is_some() {
        active.registration_number = Set(payload.registration_number);
    }
    if payload.status.is_some() {
        active.status = Set(payload.status);
    }
    if payload.description.is_some() {
        active.description = Set(payload.description);
    }
    if payload.boat_type.is_some() {
        active.boat_type = Set(payload.boat_type);
    }

    let result = active.update(&state.db).await?;
    Ok(Json(result))
}

/// Delete a boat (admin)
pub async fn delete_boat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = boat::Entity::delete_by_id(id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Boat not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Boat deleted" })))
}

// ============ Trip Management ============

#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
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
    pub boat_id: Option<Uuid>,
    pub guide_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTripRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub duration: Option<i32>,
    pub capacity: Option<i32>,
    pub price: Option<Decimal>,
    pub location: Option<String>,
    pub route: Option<String>,
    pub image_url: Option<String>,
    pub boat_id: Option<Uuid>,
    pub guide_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct TripAdminResponse {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub capacity: i32,
    pub price: Decimal,
    pub booked_seats: i32,
    pub boat: Option<String>,
    pub guide: Option<GuideInfo>,
}

#[derive(Debug, Serialize)]
pub struct GuideInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

async fn ensure_boat_exists(state: &AppState, boat_id: Uuid) -> AppResult<()> {
    boat::Entity::find_by_id(boat_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid boat".to_string()))?;
    Ok(())
}

async fn ensure_is_guide(state: &AppState, guide_id: Uuid) -> AppResult<()> {
    let guide = user::Entity::find_by_id(guide_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Guide not found".to_string()))?;

    if guide.role != UserRole::Guide {
        return Err(AppError::BadRequest("User is not a guide".to_string()));
    }
    Ok(())
}

/// List all trips with occupancy (admin)
pub async fn list_trips(State(state): State<AppState>) -> AppResult<Json<Vec<TripAdminResponse>>> {
    let now = Utc::now();
    let trips = trip::Entity::find().all(&state.db).await?;
    let boats = boat::Entity::find().all(&state.db).await?;
    let guides = user::Entity::find()
        .filter(user::Column::Role.eq(UserRole::Guide))
        .all(&state.db)
        .await?;

    let mut responses = Vec::new();
    for t in trips {
        let bookings = booking::Entity::find()
            .filter(booking::Column::TripId.eq(t.id))
            .all(&state.db)
            .await?;
        let booked = capacity::booked_seats(&bookings, now);

        let boat = t
            .boat_id
            .and_then(|bid| boats.iter().find(|b| b.id == bid).map(|b| b.name.clone()));

        let guide = t.guide_id.and_then(|gid| {
            guides.iter().find(|g| g.id == gid).map(|g| GuideInfo {
                id: g.id,
                name: format!("{} {}", g.first_name, g.second_name),
                email: g.email.clone(),
            })
        });

        responses.push(TripAdminResponse {
            id: t.id,
            name: t.name,
            date: t.date,
            start_time: t.start_time,
            capacity: t.capacity,
            price: t.price,
            booked_seats: booked,
            boat,
            guide,
        });
    }

    Ok(Json(responses))
}

/// Create a new trip (admin)
pub async fn create_trip(
    State(state): State<AppState>,
    Json(payload): Json<CreateTripRequest>,
) -> AppResult<(StatusCode, Json<trip::Model>)> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Trip name is required".to_string()));
    }
    if payload.capacity < 1 {
        return Err(AppError::BadRequest(
            "Trip capacity must be positive".to_string(),
        ));
    }
    if payload.price.is_sign_negative() {
        return Err(AppError::BadRequest(
            "Trip price cannot be negative".to_string(),
        ));
    }

    if let Some(boat_id) = payload.boat_id {
        ensure_boat_exists(&state, boat_id).await?;
    }
    if let Some(guide_id) = payload.guide_id {
        ensure_is_guide(&state, guide_id).await?;
    }

    let new_trip = trip::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        date: Set(payload.date),
        start_time: Set(payload.start_time),
        end_time: Set(payload.end_time),
        duration: Set(payload.duration),
        capacity: Set(payload.capacity),
        price: Set(payload.price),
        location: Set(payload.location),
        route: Set(payload.route),
        image_url: Set(payload.image_url),
        boat_id: Set(payload.boat_id),
        guide_id: Set(payload.guide_id),
        ..Default::default()
    };

    let result = new_trip.insert(&state.db).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Update a trip (admin)
pub async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTripRequest>,
) -> AppResult<Json<trip::Model>> {
    let trip = trip::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

    let mut active: trip::ActiveModel = trip.into();

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Trip name is required".to_string()));
        }
        active.name = Set(name.trim().to_string());
    }
    if let Some(capacity) = payload.capacity {
        if capacity < 1 {
            return Err(AppError::BadRequest(
                "Trip capacity must be positive".to_string(),
            ));
        }
        active.capacity = Set(capacity);
    }
    if let Some(price) = payload.price {
        if price.is_sign_negative() {
            return Err(AppError::BadRequest(
                "Trip price cannot be negative".to_string(),
            ));
        }
        active.price = Set(price);
    }
    if let Some(boat_id) = payload.boat_id {
        ensure_boat_exists(&state, boat_id).await?;
        active.boat_id = Set(Some(boat_id));
    }
    if let Some(guide_id) = payload.guide_id {
        ensure_is_guide(&state, guide_id).await?;
        active.guide_id = Set(Some(guide_id));
    }
    if payload.description.is_some() {
        active.description = Set(payload.description);
    }
    if let Some(date) = payload.date {
        active.date = Set(date);
    }
    if let Some(start_time) = payload.start_time {
        active.start_time = Set(start_time);
    }
    if let Some(end_time) = payload.end_time {
        active.end_time = Set(end_time);
    }
    if let Some(duration) = payload.duration {
        active.duration = Set(duration);
    }
    if payload.location.is_some() {
        active.location = Set(payload.location);
    }
    if payload.route.is_some() {
        active.route = Set(payload.route);
    }
    if payload.image_url.is_some() {
        active.image_url = Set(payload.image_url);
    }

    let result = active.update(&state.db).await?;
    Ok(Json(result))
}

/// Delete a trip (admin)
pub async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = trip::Entity::delete_by_id(id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Trip not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Trip deleted" })))
}

#[derive(Debug, Deserialize)]
pub struct AssignGuideRequest {
    pub guide_id: Uuid,
}

/// Assign a guide to a trip (admin)
pub async fn assign_guide(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<AssignGuideRequest>,
) -> AppResult<Json<trip::Model>> {
    ensure_is_guide(&state, payload.guide_id).await?;

    let trip = trip::Entity::find_by_id(trip_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

    let mut active: trip::ActiveModel = trip.into();
    active.guide_id = Set(Some(payload.guide_id));

    let result = active.update(&state.db).await?;
    Ok(Json(result))
}

// ============ Trip Bookings (admin view) ============

#[derive(Debug, Serialize)]
pub struct TripBookingInfo {
    pub booking_id: Uuid,
    pub customer_name: String,
    pub booked_for: String,
    pub passengers: i32,
    pub status: BookingStatus,
    pub total_cost: Decimal,
}

#[derive(Debug, Serialize)]
pub struct TripBookingsResponse {
    pub trip_id: Uuid,
    pub trip_name: String,
    pub date: NaiveDate,
    pub bookings: Vec<TripBookingInfo>,
}

/// List a trip's bookings with customer info (admin)
pub async fn trip_bookings(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> AppResult<Json<TripBookingsResponse>> {
    let trip = trip::Entity::find_by_id(trip_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

    let bookings = booking::Entity::find()
        .filter(booking::Column::TripId.eq(trip_id))
        .all(&state.db)
        .await?;

    let users = user::Entity::find().all(&state.db).await?;

    let bookings: Vec<TripBookingInfo> = bookings
        .into_iter()
        .map(|b| {
            let customer = users.iter().find(|u| u.id == b.customer_id);
            TripBookingInfo {
                booking_id: b.id,
                customer_name: customer
                    .map(|u| format!("{} {}", u.first_name, u.second_name))
                    .unwrap_or_default(),
                booked_for: b.name,
                passengers: b.passengers,
                status: b.status,
                total_cost: b.total_cost,
            }
        })
        .collect();

    Ok(Json(TripBookingsResponse {
        trip_id: trip.id,
        trip_name: trip.name,
        date: trip.date,
        bookings,
    }))
}

// ============ User Management ============

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub second_name: String,
    pub contact_no: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        UserResponse {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            second_name: u.second_name,
            contact_no: u.contact_no,
            role: u.role,
            created_at: u.created_at.with_timezone(&Utc),
        }
    }
}

/// List all users (admin)
pub async fn list_all_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = user::Entity::find().all(&state.db).await?;

    let responses: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(responses))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// Reassign a user's role (admin). The record keeps its identity and
/// shared profile fields; role-specific fields are reset.
pub async fn update_user_role(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    let new_role = UserRole::parse(&payload.role)
        .ok_or_else(|| AppError::UnsupportedRole(payload.role.clone()))?;

    let user = user::Entity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let old_role = user.role.clone();

    // A guide losing the guide role cannot stay assigned to trips
    if old_role == UserRole::Guide && new_role != UserRole::Guide {
        let trips = trip::Entity::find()
            .filter(trip::Column::GuideId.eq(user_id))
            .all(&state.db)
            .await?;
        for t in trips {
            let mut active: trip::ActiveModel = t.into();
            active.guide_id = Set(None);
            active.update(&state.db).await?;
        }
    }

    let updated = user.reassigned(new_role.clone()).update(&state.db).await?;

    tracing::info!(user = %user_id, from = ?old_role, to = ?new_role, "role reassigned");

    Ok(Json(UserResponse::from(updated)))
}

/// Delete any user account (admin)
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let user = user::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    // Handle cleanup based on role
    if user.role == UserRole::Guide {
        let trips = trip::Entity::find()
            .filter(trip::Column::GuideId.eq(id))
            .all(&state.db)
            .await?;
        for t in trips {
            let mut active: trip::ActiveModel = t.into();
            active.guide_id = Set(None);
            active.update(&state.db).await?;
        }
    }

    // Customers leave feedback and bookings behind
    feedback::Entity::delete_many()
        .filter(feedback::Column::CustomerId.eq(id))
        .exec(&state.db)
        .await?;

    booking::Entity::delete_many()
        .filter(booking::Column::CustomerId.eq(id))
        .exec(&state.db)
        .await?;

    user::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(Json(serde_json::json!({ "message": "User deleted" })))
}

// ============ Booking Management (admin) ============

#[derive(Debug, Serialize)]
pub struct BookingInfo {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub passengers: i32,
    pub status: BookingStatus,
    pub hold_expires_at: Option<DateTime<Utc>>,
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
}

/// List all bookings (admin)
pub async fn list_all_bookings(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BookingInfo>>> {
    let bookings = booking::Entity::find().all(&state.db).await?;
    let users = user::Entity::find().all(&state.db).await?;

    let responses: Vec<BookingInfo> = bookings
        .into_iter()
        .map(|b| {
            let customer = users.iter().find(|u| u.id == b.customer_id);
            BookingInfo {
                id: b.id,
                trip_id: b.trip_id,
                customer_name: customer
                    .map(|u| format!("{} {}", u.first_name, u.second_name))
                    .unwrap_or_default(),
                customer_email: customer.map(|u| u.email.clone()).unwrap_or_default(),
                passengers: b.passengers,
                status: b.status,
                hold_expires_at: b.hold_expires_at.map(|t| t.with_timezone(&Utc)),
                total_cost: b.total_cost,
                created_at: b.created_at.with_timezone(&Utc),
            }
        })
        .collect();

    Ok(Json(responses))
}

/// Delete any booking (admin)
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = booking::Entity::delete_by_id(booking_id)
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Booking not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Booking deleted" })))
}

// ============ Payments (admin) ============

/// List all payments, newest first (admin)
pub async fn list_payments(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<payment::Model>>> {
    let payments = payment::Entity::find()
        .order_by_desc(payment::Column::PaidAt)
        .all(&state.db)
        .await?;

    Ok(Json(payments))
}
