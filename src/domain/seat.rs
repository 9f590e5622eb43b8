//! Seat domain entity and soft reservation rules.
//!
//! A seat is *reserved* while fewer than [`SEAT_RESERVATION_TTL_MINUTES`]
//! have passed since `reserved_at`, and *available* when it is neither
//! occupied nor reserved. Both are computed from a caller-supplied `now`
//! on every read; nothing expires a hold in the background.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{
    RESERVATION_TAG_SEPARATOR, SEAT_RESERVATION_TTL_MINUTES, SEAT_TYPE_PREMIUM, SEAT_TYPE_REGULAR,
};

/// Seat categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SeatType {
    Regular,
    Premium,
}

impl From<&str> for SeatType {
    fn from(s: &str) -> Self {
        match s {
            SEAT_TYPE_PREMIUM => SeatType::Premium,
            _ => SeatType::Regular,
        }
    }
}

impl std::fmt::Display for SeatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeatType::Premium => write!(f, "{}", SEAT_TYPE_PREMIUM),
            SeatType::Regular => write!(f, "{}", SEAT_TYPE_REGULAR),
        }
    }
}

/// A physical seat for one showtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Seat {
    pub id: Uuid,
    pub showtime_id: Uuid,
    pub seat_row: String,
    pub seat_number: i32,
    pub seat_type: SeatType,
    pub is_occupied: bool,
    pub reserved_at: Option<DateTime<Utc>>,
    /// `"{customer_email}:{reservation_id}"` while held
    pub reserved_by: Option<String>,
}

impl Seat {
    /// Human label such as `C7`.
    pub fn label(&self) -> String {
        format!("{}{}", self.seat_row, self.seat_number)
    }

    /// Whether a reservation is still inside its hold window.
    pub fn is_reserved_at(&self, now: DateTime<Utc>) -> bool {
        match self.reserved_at {
            Some(reserved_at) => now - reserved_at < reservation_ttl(),
            None => false,
        }
    }

    /// Free for anyone: not occupied and not held.
    pub fn is_available_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_occupied && !self.is_reserved_at(now)
    }

    /// Whether the live hold on this seat belongs to `customer_email`.
    ///
    /// Owners compare case-insensitively. Booking lookups by e-mail are exact.
    pub fn is_held_by(&self, customer_email: &str, now: DateTime<Utc>) -> bool {
        self.is_reserved_at(now)
            && self
                .reserved_by
                .as_deref()
                .and_then(reservation_owner)
                .is_some_and(|owner| owner.eq_ignore_ascii_case(customer_email))
    }

    /// A customer may book a seat that is free or that they hold themselves.
    pub fn is_bookable_by(&self, customer_email: &str, now: DateTime<Utc>) -> bool {
        !self.is_occupied
            && (!self.is_reserved_at(now) || self.is_held_by(customer_email, now))
    }
}

/// Hold window length.
pub fn reservation_ttl() -> Duration {
    Duration::minutes(SEAT_RESERVATION_TTL_MINUTES)
}

/// Reservations made before this instant have lapsed.
///
/// A hold placed exactly at the cutoff is already available to others
/// (`is_reserved_at` uses a strict `<` on its age) but is left in place by
/// the expiry sweep, which clears only `reserved_at < cutoff`. Both agree
/// that it can be booked; the sweep catches it on its next run.
pub fn reservation_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - reservation_ttl()
}

/// Build the `reserved_by` tag for a hold.
pub fn reservation_tag(customer_email: &str, reservation_id: Uuid) -> String {
    format!("{}{}{}", customer_email, RESERVATION_TAG_SEPARATOR, reservation_id)
}

/// Customer email part of a `reserved_by` tag.
pub fn reservation_owner(tag: &str) -> Option<&str> {
    tag.rsplit_once(RESERVATION_TAG_SEPARATOR)
        .map(|(owner, _)| owner)
        .filter(|owner| !owner.is_empty())
}

/// Drop repeated ids, keeping first-seen order.
pub fn unique_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Seat hold request body.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReserveSeats {
    #[validate(length(min = 1, message = "At least one seat is required"))]
    pub seat_ids: Vec<Uuid>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub customer_email: String,
}

/// Result of a successful seat hold.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeatReservation {
    pub reservation_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Seat as seen by clients at a given instant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeatResponse {
    pub id: Uuid,
    pub showtime_id: Uuid,
    #[schema(example = "C")]
    pub seat_row: String,
    #[schema(example = 7)]
    pub seat_number: i32,
    pub seat_type: SeatType,
    pub is_occupied: bool,
    pub is_reserved: bool,
    pub is_available: bool,
    pub reserved_at: Option<DateTime<Utc>>,
}

impl SeatResponse {
    pub fn at(seat: &Seat, now: DateTime<Utc>) -> Self {
        Self {
            id: seat.id,
            showtime_id: seat.showtime_id,
            seat_row: seat.seat_row.clone(),
            seat_number: seat.seat_number,
            seat_type: seat.seat_type,
            is_occupied: seat.is_occupied,
            is_reserved: seat.is_reserved_at(now),
            is_available: seat.is_available_at(now),
            reserved_at: seat.reserved_at,
        }
    }
}

/// Seats of a showtime, flat and grouped by row.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeatLayout {
    pub seats: Vec<SeatResponse>,
    pub seat_map: BTreeMap<String, Vec<SeatResponse>>,
}

impl SeatLayout {
    /// Group seats by row. Input order is kept within each row.
    pub fn at(seats: &[Seat], now: DateTime<Utc>) -> Self {
        let seats: Vec<SeatResponse> = seats.iter().map(|s| SeatResponse::at(s, now)).collect();

        let mut seat_map: BTreeMap<String, Vec<SeatResponse>> = BTreeMap::new();
        for seat in &seats {
            seat_map
                .entry(seat.seat_row.clone())
                .or_default()
                .push(seat.clone());
        }

        Self { seats, seat_map }
    }
}
