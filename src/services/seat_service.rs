//! Seat maps and soft seat holds.
//!
//! A hold is stored on the seat itself as `reserved_at` plus a
//! `{email}:{reservationId}` tag. Holds lapse after the reservation TTL and
//! are swept lazily whenever a seat map is read.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    reservation_cutoff, reservation_tag, reservation_ttl, unique_ids, Seat, SeatLayout,
    SeatReservation,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait SeatService: Send + Sync {
    /// Seats of a showtime with live availability. Unknown showtimes have no seats.
    async fn seat_layout(&self, showtime_id: Uuid) -> AppResult<SeatLayout>;

    /// Hold seats for a customer.
    ///
    /// # Errors
    /// - `Validation` when no seat id is given
    /// - `NotFound` when any seat id is unknown
    /// - `SeatsUnavailable` when a seat is occupied or held by someone else
    async fn reserve(&self, seat_ids: Vec<Uuid>, customer_email: String)
        -> AppResult<SeatReservation>;
}

pub struct SeatKeeper<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SeatKeeper<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> SeatService for SeatKeeper<U> {
    async fn seat_layout(&self, showtime_id: Uuid) -> AppResult<SeatLayout> {
        let now = Utc::now();
        let seats = self.uow.seats();

        let released = seats.release_expired(reservation_cutoff(now)).await?;
        if released > 0 {
            tracing::debug!(released, "Released expired seat holds");
        }

        let rows = seats.list_by_showtime(showtime_id).await?;
        Ok(SeatLayout::at(&rows, now))
    }

    async fn reserve(
        &self,
        seat_ids: Vec<Uuid>,
        customer_email: String,
    ) -> AppResult<SeatReservation> {
        let ids = unique_ids(&seat_ids);
        if ids.is_empty() {
            return Err(AppError::validation("At least one seat is required"));
        }

        let seats = self.uow.seats();
        let found = seats.find_by_ids(&ids).await?;
        if found.len() != ids.len() {
            return Err(AppError::not_found(format!(
                "{} of {} seats",
                ids.len() - found.len(),
                ids.len()
            )));
        }

        let now = Utc::now();
        let taken: Vec<String> = found
            .iter()
            .filter(|seat| !seat.is_bookable_by(&customer_email, now))
            .map(Seat::label)
            .collect();
        if !taken.is_empty() {
            return Err(AppError::SeatsUnavailable(taken));
        }

        let reservation_id = Uuid::new_v4();
        let held = seats
            .reserve(&ids, reservation_tag(&customer_email, reservation_id), now)
            .await?;

        tracing::info!(
            reservation_id = %reservation_id,
            seats = held,
            "Seats reserved"
        );

        Ok(SeatReservation {
            reservation_id,
            expires_at: now + reservation_ttl(),
        })
    }
}
