use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::DateTimeWithTimeZone;

use crate::entities::booking::{BookingStatus, Model as Booking};

/// True once a provisional hold's deadline has passed.
pub fn hold_expired(hold_expires_at: Option<DateTimeWithTimeZone>, now: DateTime<Utc>) -> bool {
    hold_expires_at.is_some_and(|expiry| expiry.with_timezone(&Utc) < now)
}

/// A booking occupies seats while CONFIRMED, or while PROVISIONAL with a
/// live hold. Lapsed holds and terminal bookings release their seats.
pub fn counts_toward_capacity(booking: &Booking, now: DateTime<Utc>) -> bool {
    match booking.status {
        BookingStatus::Confirmed => true,
        BookingStatus::Provisional => !hold_expired(booking.hold_expires_at, now),
        BookingStatus::Expired | BookingStatus::Cancelled => false,
    }
}

/// Seats currently held against a trip's capacity.
pub fn booked_seats(bookings: &[Booking], now: DateTime<Utc>) -> i32 {
    bookings
        .iter()
        .filter(|b| counts_toward_capacity(b, now))
        .map(|b| b.passengers)
        .sum()
}

pub fn available_seats(capacity: i32, booked: i32) -> i32 {
    (capacity - booked).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sea_orm::entity::prelude::Decimal;
    use uuid::Uuid;

    fn booking(
        passengers: i32,
        status: BookingStatus,
        hold_expires_at: Option<DateTimeWithTimeZone>,
    ) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            trip_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            name: "Amal Fernando".to_string(),
            contact: "0771234567".to_string(),
            email: "amal@example.com".to_string(),
            passengers,
            status,
            hold_expires_at,
            total_cost: Decimal::new(4500, 2),
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn confirmed_and_live_provisional_count() {
        let now = Utc::now();
        let live_hold = Some((now + Duration::minutes(10)).into());

        let bookings = vec![
            booking(3, BookingStatus::Confirmed, None),
            booking(2, BookingStatus::Provisional, live_hold),
        ];

        assert_eq!(booked_seats(&bookings, now), 5);
    }

    #[test]
    fn lapsed_holds_release_their_seats() {
        let now = Utc::now();
        let lapsed = Some((now - Duration::minutes(1)).into());

        let bookings = vec![
            booking(4, BookingStatus::Provisional, lapsed),
            booking(3, BookingStatus::Confirmed, None),
        ];

        assert_eq!(booked_seats(&bookings, now), 3);
    }

    #[test]
    fn terminal_bookings_never_count() {
        let now = Utc::now();

        let bookings = vec![
            booking(5, BookingStatus::Expired, None),
            booking(2, BookingStatus::Cancelled, None),
        ];

        assert_eq!(booked_seats(&bookings, now), 0);
    }

    #[test]
    fn hold_without_deadline_never_expires() {
        let now = Utc::now();
        assert!(!hold_expired(None, now));
        assert!(hold_expired(Some((now - Duration::seconds(1)).into()), now));
        assert!(!hold_expired(Some((now + Duration::seconds(30)).into()), now));
    }

    #[test]
    fn available_seats_clamp_at_zero() {
        assert_eq!(available_seats(10, 8), 2);
        assert_eq!(available_seats(10, 12), 0);
        assert_eq!(available_seats(0, 0), 0);
    }
}
