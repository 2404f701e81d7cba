use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::booking::{self, BookingStatus};
use crate::entities::support_ticket::{self, TicketStatus};
use crate::entities::{trip, user};
use crate::error::{AppError, AppResult};
use crate::utils::validation::is_blank;
use crate::AppState;

// ============ Contact Form ============

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub preferred_contact: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: String,
    pub ticket_id: Uuid,
}

/// Open a support ticket (public contact form)
pub async fn contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> AppResult<(StatusCode, Json<ContactResponse>)> {
    if is_blank(&payload.name)
        || is_blank(&payload.email)
        || is_blank(&payload.subject)
        || is_blank(&payload.message)
    {
        return Err(AppError::BadRequest(
            "Please fill all required fields.".to_string(),
        ));
    }

    let ticket = support_ticket::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        email: Set(payload.email.trim().to_string()),
        phone: Set(payload.phone.clone()),
        subject: Set(payload.subject.trim().to_string()),
        message: Set(payload.message.trim().to_string()),
        status: Set(TicketStatus::New),
        preferred_contact: Set(payload.preferred_contact.clone()),
        ..Default::default()
    };

    let saved = ticket.insert(&state.db).await?;

    tracing::info!(ticket = %saved.id, "support ticket opened");

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: "Ticket created successfully. Our team will contact you soon.".to_string(),
            ticket_id: saved.id,
        }),
    ))
}

// ============ IT Staff Directory ============

#[derive(Debug, Serialize)]
pub struct StaffResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub contact_no: Option<String>,
    pub role: user::UserRole,
}

/// Public directory of the IT support staff
pub async fn staff_directory(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StaffResponse>>> {
    let users = user::Entity::find().all(&state.db).await?;

    let staff: Vec<StaffResponse> = users
        .into_iter()
        .filter(|u| u.role.is_it_staff())
        .map(|u| StaffResponse {
            id: u.id,
            name: format!("{} {}", u.first_name, u.second_name),
            email: u.email,
            contact_no: u.contact_no,
            role: u.role,
        })
        .collect();

    Ok(Json(staff))
}

// ============ Ticket Management ============

/// List all support tickets, newest first
pub async fn list_tickets(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<support_ticket::Model>>> {
    let tickets = support_ticket::Entity::find()
        .order_by_desc(support_ticket::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(tickets))
}

#[derive(Debug, Deserialize)]
pub struct UpdateTicketStatusRequest {
    pub status: String,
}

/// Move a ticket through its lifecycle (new -> open -> resolved)
pub async fn update_ticket_status(
    State(state): State<AppState>,
    Path(ticket_id): Path<Uuid>,
    Json(payload): Json<UpdateTicketStatusRequest>,
) -> AppResult<Json<support_ticket::Model>> {
    let status = TicketStatus::parse(&payload.status)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid ticket status: {}", payload.status)))?;

    let ticket = support_ticket::Entity::find_by_id(ticket_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;

    let mut active: support_ticket::ActiveModel = ticket.into();
    active.status = Set(status);
    let updated = active.update(&state.db).await?;

    Ok(Json(updated))
}

// ============ Booking History ============

#[derive(Debug, Deserialize)]
pub struct BookingHistoryParams {
    pub status: Option<String>,
    pub email: Option<String>,
    pub trip_id: Option<Uuid>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct BookingHistoryEntry {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub trip_name: String,
    pub trip_date: NaiveDate,
    pub customer_email: String,
    pub name: String,
    pub passengers: i32,
    pub status: BookingStatus,
    pub total_cost: rust_decimal::Decimal,
    pub created_at: DateTime<Utc>,
}

/// Search booking history with optional filters
pub async fn booking_history(
    State(state): State<AppState>,
    Query(params): Query<BookingHistoryParams>,
) -> AppResult<Json<Vec<BookingHistoryEntry>>> {
    let status = match &params.status {
        Some(raw) => Some(
            BookingStatus::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid booking status: {raw}")))?,
        ),
        None => None,
    };
    let email = params.email.as_deref().map(str::to_lowercase);

    let bookings = booking::Entity::find().all(&state.db).await?;
    let trips = trip::Entity::find().all(&state.db).await?;
    let users = user::Entity::find().all(&state.db).await?;

    let mut entries: Vec<BookingHistoryEntry> = bookings
        .into_iter()
        .filter_map(|b| {
            let trip = trips.iter().find(|t| t.id == b.trip_id)?;
            let customer_email = users
                .iter()
                .find(|u| u.id == b.customer_id)
                .map(|u| u.email.clone())
                .unwrap_or_default();

            if let Some(wanted) = &status {
                if b.status != *wanted {
                    return None;
                }
            }
            if let Some(needle) = &email {
                if !customer_email.to_lowercase().contains(needle) {
                    return None;
                }
            }
            if let Some(trip_id) = params.trip_id {
                if b.trip_id != trip_id {
                    return None;
                }
            }
            if let Some(from) = params.from_date {
                if trip.date < from {
                    return None;
                }
            }
            if let Some(to) = params.to_date {
                if trip.date > to {
                    return None;
                }
            }

            Some(BookingHistoryEntry {
                id: b.id,
                trip_id: trip.id,
                trip_name: trip.name.clone(),
                trip_date: trip.date,
                customer_email,
                name: b.name,
                passengers: b.passengers,
                status: b.status,
                total_cost: b.total_cost,
                created_at: b.created_at.with_timezone(&Utc),
            })
        })
        .collect();

    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(entries))
}
