//! Booking domain entity and pricing rules.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{Seat, SeatResponse, Showtime, Snack};
use crate::config::{
    BOOKING_STATUS_CANCELLED, BOOKING_STATUS_CONFIRMED, BOOKING_STATUS_PENDING, MAX_SNACK_QUANTITY,
};

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl From<&str> for BookingStatus {
    fn from(s: &str) -> Self {
        match s {
            BOOKING_STATUS_CONFIRMED => BookingStatus::Confirmed,
            BOOKING_STATUS_CANCELLED => BookingStatus::Cancelled,
            _ => BookingStatus::Pending,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "{}", BOOKING_STATUS_PENDING),
            BookingStatus::Confirmed => write!(f, "{}", BOOKING_STATUS_CONFIRMED),
            BookingStatus::Cancelled => write!(f, "{}", BOOKING_STATUS_CANCELLED),
        }
    }
}

/// One snack line of a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingSnackLine {
    pub snack: Snack,
    pub quantity: i32,
}

/// Booking with its showtime, seats and snacks loaded.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub booking_date: DateTime<Utc>,
    pub showtime: Showtime,
    pub seats: Vec<Seat>,
    pub snacks: Vec<BookingSnackLine>,
}

/// Snack quantity requested with a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnackOrder {
    pub snack_id: Uuid,
    #[validate(range(min = 1, max = 20, message = "Snack quantity must be between 1 and 20"))]
    #[schema(example = 2, minimum = 1, maximum = 20)]
    pub quantity: i32,
}

/// Booking request body.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub showtime_id: Uuid,
    #[validate(length(min = 1, message = "Customer name is required"))]
    #[schema(example = "Jane Doe")]
    pub customer_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane@example.com")]
    pub customer_email: String,
    #[schema(example = "+1 555 0100")]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub seat_ids: Vec<Uuid>,
    #[serde(default)]
    #[validate(nested)]
    pub snack_items: Vec<SnackOrder>,
}

impl CreateBooking {
    /// Whether the request orders nothing at all.
    pub fn is_empty(&self) -> bool {
        self.seat_ids.is_empty() && self.snack_items.is_empty()
    }
}

/// Fully priced booking ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub id: Uuid,
    pub showtime_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub booking_date: DateTime<Utc>,
    pub seat_ids: Vec<Uuid>,
    pub snack_items: Vec<SnackOrder>,
}

/// Merge repeated snack ids by summing quantities. First-seen order is kept.
pub fn merge_snack_orders(items: &[SnackOrder]) -> Vec<SnackOrder> {
    let mut merged: Vec<SnackOrder> = Vec::with_capacity(items.len());
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for item in items {
        match index.get(&item.snack_id) {
            Some(&i) => merged[i].quantity += item.quantity,
            None => {
                index.insert(item.snack_id, merged.len());
                merged.push(*item);
            }
        }
    }

    merged
}

/// Whether a single snack line stays inside the per-line quantity limit.
pub fn is_valid_quantity(quantity: i32) -> bool {
    (1..=MAX_SNACK_QUANTITY).contains(&quantity)
}

/// `ticket_price × seats + Σ snack price × quantity`
pub fn booking_total(ticket_price: Decimal, seat_count: usize, snacks: &[(Decimal, i32)]) -> Decimal {
    let tickets = ticket_price * Decimal::from(seat_count as u64);
    snacks
        .iter()
        .fold(tickets, |total, (price, quantity)| total + *price * Decimal::from(*quantity))
}

/// Snack line as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingSnackResponse {
    pub snack: Snack,
    pub quantity: i32,
}

/// Booking as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub showtime_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    #[schema(value_type = f64, example = 33.5)]
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub booking_date: DateTime<Utc>,
    pub showtime: Showtime,
    pub seats: Vec<SeatResponse>,
    pub snacks: Vec<BookingSnackResponse>,
}

impl BookingResponse {
    pub fn at(booking: Booking, now: DateTime<Utc>) -> Self {
        Self {
            id: booking.id,
            showtime_id: booking.showtime.id,
            customer_name: booking.customer_name,
            customer_email: booking.customer_email,
            customer_phone: booking.customer_phone,
            total_amount: booking.total_amount,
            status: booking.status,
            booking_date: booking.booking_date,
            seats: booking
                .seats
                .iter()
                .map(|seat| SeatResponse::at(seat, now))
                .collect(),
            snacks: booking
                .snacks
                .into_iter()
                .map(|line| BookingSnackResponse {
                    snack: line.snack,
                    quantity: line.quantity,
                })
                .collect(),
            showtime: booking.showtime,
        }
    }
}
