//! Booking use-cases.
//!
//! A booking is priced from the showtime's ticket price and the current
//! snack prices, then written together with its seat and snack links in one
//! transaction that also marks the seats occupied.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::container::parallel;
use crate::config::MAX_SNACK_QUANTITY;
use crate::domain::{
    booking_total, is_valid_quantity, merge_snack_orders, unique_ids, Booking, BookingStatus,
    CreateBooking, NewBooking, Seat,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::jobs::{ReceiptJob, ReceiptQueue};

#[async_trait]
pub trait BookingService: Send + Sync {
    /// Create a confirmed booking.
    ///
    /// # Errors
    /// - `Validation` for an empty order or an out-of-range snack quantity
    /// - `NotFound` when the showtime does not exist
    /// - `BadRequest` for seats outside the showtime or unavailable snacks
    /// - `SeatsUnavailable` when a seat is occupied or held by someone else
    /// - `Conflict` when a concurrent booking took a seat first
    async fn create(&self, request: CreateBooking) -> AppResult<Booking>;

    async fn get_booking(&self, id: Uuid) -> AppResult<Booking>;

    /// Bookings made with an e-mail address, newest first
    async fn list_for_customer(&self, email: &str) -> AppResult<Vec<Booking>>;

    /// Queue the confirmation e-mail for a booking
    async fn send_receipt(&self, id: Uuid) -> AppResult<()>;
}

pub struct BookingManager<U: UnitOfWork> {
    uow: Arc<U>,
    receipts: Arc<dyn ReceiptQueue>,
}

impl<U: UnitOfWork> BookingManager<U> {
    pub fn new(uow: Arc<U>, receipts: Arc<dyn ReceiptQueue>) -> Self {
        Self { uow, receipts }
    }

    /// Check the request against current seat and snack state and price it.
    async fn prepare(&self, request: CreateBooking, now: DateTime<Utc>) -> AppResult<NewBooking> {
        if request.is_empty() {
            return Err(AppError::validation(
                "A booking needs at least one seat or snack",
            ));
        }

        let showtime = self
            .uow
            .showtimes()
            .find_by_id(request.showtime_id)
            .await?
            .ok_or_not_found("Showtime")?;

        let seat_ids = unique_ids(&request.seat_ids);
        let snack_items = merge_snack_orders(&request.snack_items);
        if snack_items.iter().any(|item| !is_valid_quantity(item.quantity)) {
            return Err(AppError::validation(format!(
                "Snack quantity must be between 1 and {}",
                MAX_SNACK_QUANTITY
            )));
        }
        let snack_ids: Vec<Uuid> = snack_items.iter().map(|item| item.snack_id).collect();

        let (seat_repo, snack_repo) = (self.uow.seats(), self.uow.snacks());
        let (seats, snacks) = parallel::join2(
            seat_repo.find_by_ids(&seat_ids),
            snack_repo.find_by_ids(&snack_ids),
        )
        .await?;

        if seats.len() != seat_ids.len() || seats.iter().any(|s| s.showtime_id != showtime.id) {
            return Err(AppError::BadRequest(
                "Some seats do not belong to this showtime".to_string(),
            ));
        }

        let taken: Vec<String> = seats
            .iter()
            .filter(|seat| !seat.is_bookable_by(&request.customer_email, now))
            .map(Seat::label)
            .collect();
        if !taken.is_empty() {
            return Err(AppError::SeatsUnavailable(taken));
        }

        let prices: HashMap<Uuid, Decimal> = snacks
            .iter()
            .filter(|snack| snack.available)
            .map(|snack| (snack.id, snack.price))
            .collect();
        let priced: Vec<(Decimal, i32)> = snack_items
            .iter()
            .map(|item| prices.get(&item.snack_id).map(|price| (*price, item.quantity)))
            .collect::<Option<_>>()
            .ok_or_else(|| AppError::BadRequest("Some snacks are not available".to_string()))?;

        Ok(NewBooking {
            id: Uuid::new_v4(),
            showtime_id: showtime.id,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            customer_phone: request.customer_phone,
            total_amount: booking_total(showtime.movie.price, seat_ids.len(), &priced),
            status: BookingStatus::Confirmed,
            booking_date: now,
            seat_ids,
            snack_items,
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> BookingService for BookingManager<U> {
    async fn create(&self, request: CreateBooking) -> AppResult<Booking> {
        let draft = self.prepare(request, Utc::now()).await?;
        let booking_id = draft.id;
        let (showtime_id, seats, total) =
            (draft.showtime_id, draft.seat_ids.len(), draft.total_amount);

        crate::with_transaction!(self.uow, |ctx| {
            ctx.bookings().insert(&draft).await?;
            ctx.seats().occupy(&draft.seat_ids).await
        })?;

        tracing::info!(
            booking_id = %booking_id,
            showtime_id = %showtime_id,
            seats,
            total = %total,
            "Booking confirmed"
        );

        self.get_booking(booking_id).await
    }

    async fn get_booking(&self, id: Uuid) -> AppResult<Booking> {
        self.uow.bookings().find_by_id(id).await?.ok_or_not_found("Booking")
    }

    async fn list_for_customer(&self, email: &str) -> AppResult<Vec<Booking>> {
        self.uow.bookings().list_by_customer(email).await
    }

    async fn send_receipt(&self, id: Uuid) -> AppResult<()> {
        let booking = self.get_booking(id).await?;
        self.receipts.enqueue(ReceiptJob::for_booking(&booking)).await
    }
}
