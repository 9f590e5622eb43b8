//! Booking repository.
//!
//! Bookings are always returned fully loaded: showtime with movie, seats
//! ordered by position, and snack lines.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::booking::{self, Entity as BookingEntity};
use super::entities::booking_seat::{self, Entity as BookingSeatEntity};
use super::entities::booking_snack::{self, Entity as BookingSnackEntity};
use super::entities::movie::Entity as MovieEntity;
use super::entities::seat::Entity as SeatEntity;
use super::entities::showtime::{self, Entity as ShowtimeEntity};
use super::entities::snack::Entity as SnackEntity;
use crate::domain::{Booking, BookingSnackLine, BookingStatus, Seat, Showtime, Snack};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>>;

    /// Bookings made with an e-mail address, newest first.
    ///
    /// The address must match as stored; unlike seat hold ownership this is
    /// not case-insensitive.
    async fn list_by_customer(&self, email: &str) -> AppResult<Vec<Booking>>;
}

pub struct BookingStore {
    db: DatabaseConnection,
}

impl BookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingRepository for BookingStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let Some(row) = BookingEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(load_bookings(&self.db, vec![row]).await?.pop())
    }

    async fn list_by_customer(&self, email: &str) -> AppResult<Vec<Booking>> {
        let rows = BookingEntity::find()
            .filter(booking::Column::CustomerEmail.eq(email))
            .order_by_desc(booking::Column::BookingDate)
            .all(&self.db)
            .await?;

        load_bookings(&self.db, rows).await
    }
}

/// Attach showtimes, seats and snack lines to booking rows, keeping row order.
async fn load_bookings<C: ConnectionTrait>(
    db: &C,
    rows: Vec<booking::Model>,
) -> AppResult<Vec<Booking>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let booking_ids: Vec<Uuid> = rows.iter().map(|b| b.id).collect();
    let showtime_ids: HashSet<Uuid> = rows.iter().map(|b| b.showtime_id).collect();

    let showtimes: HashMap<Uuid, Showtime> = ShowtimeEntity::find()
        .filter(showtime::Column::Id.is_in(showtime_ids))
        .find_also_related(MovieEntity)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|(s, movie)| movie.map(|m| (s.id, s.into_domain(m))))
        .collect();

    let mut seats: HashMap<Uuid, Vec<Seat>> = HashMap::new();
    for (link, seat) in BookingSeatEntity::find()
        .filter(booking_seat::Column::BookingId.is_in(booking_ids.clone()))
        .find_also_related(SeatEntity)
        .all(db)
        .await?
    {
        if let Some(seat) = seat {
            seats.entry(link.booking_id).or_default().push(seat.into());
        }
    }

    let mut snacks: HashMap<Uuid, Vec<BookingSnackLine>> = HashMap::new();
    for (link, snack) in BookingSnackEntity::find()
        .filter(booking_snack::Column::BookingId.is_in(booking_ids))
        .find_also_related(SnackEntity)
        .all(db)
        .await?
    {
        if let Some(snack) = snack {
            snacks.entry(link.booking_id).or_default().push(BookingSnackLine {
                snack: Snack::from(snack),
                quantity: link.quantity,
            });
        }
    }

    rows.into_iter()
        .map(|row| {
            let showtime = showtimes.get(&row.showtime_id).cloned().ok_or_else(|| {
                AppError::internal(format!("Booking {} references a missing showtime", row.id))
            })?;

            let mut booked_seats = seats.remove(&row.id).unwrap_or_default();
            booked_seats.sort_by(|a, b| {
                (a.seat_row.as_str(), a.seat_number).cmp(&(b.seat_row.as_str(), b.seat_number))
            });

            let mut lines = snacks.remove(&row.id).unwrap_or_default();
            lines.sort_by(|a, b| a.snack.name.cmp(&b.snack.name));

            Ok(Booking {
                id: row.id,
                customer_name: row.customer_name,
                customer_email: row.customer_email,
                customer_phone: row.customer_phone,
                total_amount: row.total_amount,
                status: BookingStatus::from(row.status.as_str()),
                booking_date: row.booking_date,
                showtime,
                seats: booked_seats,
                snacks: lines,
            })
        })
        .collect()
}
