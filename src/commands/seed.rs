//! Seed command - demo catalog.
//!
//! Wipes bookings and the catalog (users are kept) and inserts three movies
//! with two showtimes each, a 10×10 seat grid per showtime with roughly a
//! fifth of the seats already occupied, and six snacks.

use chrono::{DateTime, NaiveTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue::Set, EntityTrait, TransactionTrait};
use uuid::Uuid;

use crate::config::{Config, SEAT_TYPE_PREMIUM, SEAT_TYPE_REGULAR};
use crate::errors::AppResult;
use crate::infra::repositories::entities::{
    booking, booking_seat, booking_snack, movie, seat, showtime, snack,
};
use crate::infra::{Cache, Database};

const SEAT_ROWS: [&str; 10] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];
const SEATS_PER_ROW: i32 = 10;
const PREMIUM_ROWS: [&str; 2] = ["A", "B"];
const OCCUPIED_RATIO: f64 = 0.2;

/// (room, hour of day) for each movie's showtimes
const SCREENINGS: [(&str, u32); 2] = [("Theater 1", 10), ("Theater 2", 17)];

struct MovieSeed {
    title: &'static str,
    description: &'static str,
    duration: i32,
    genre: &'static str,
    rating: &'static str,
    price_cents: i64,
    poster: &'static str,
}

const MOVIES: [MovieSeed; 3] = [
    MovieSeed {
        title: "The Amazing Spider-Man",
        description: "A young Peter Parker discovers his spider powers and becomes the amazing Spider-Man.",
        duration: 136,
        genre: "Action",
        rating: "PG-13",
        price_cents: 1250,
        poster: "https://via.placeholder.com/300x450/FF6B6B/FFFFFF?text=Spider-Man",
    },
    MovieSeed {
        title: "Inception",
        description: "A thief who enters the dreams of others to steal their secrets from their subconscious.",
        duration: 148,
        genre: "Sci-Fi",
        rating: "PG-13",
        price_cents: 1400,
        poster: "https://via.placeholder.com/300x450/4ECDC4/FFFFFF?text=Inception",
    },
    MovieSeed {
        title: "The Lion King",
        description: "A young lion prince flees his kingdom only to learn the true meaning of responsibility.",
        duration: 118,
        genre: "Animation",
        rating: "G",
        price_cents: 1000,
        poster: "https://via.placeholder.com/300x450/FFE66D/FFFFFF?text=Lion+King",
    },
];

/// (name, description, price in cents, category, image)
const SNACKS: [(&str, &str, i64, &str, &str); 6] = [
    ("Large Popcorn", "Freshly popped buttery popcorn", 850, "Snacks", "https://via.placeholder.com/200x150/FF6B6B/FFFFFF?text=Popcorn"),
    ("Medium Soda", "Ice-cold soft drink", 550, "Beverages", "https://via.placeholder.com/200x150/4ECDC4/FFFFFF?text=Soda"),
    ("Nachos with Cheese", "Crispy tortilla chips with warm cheese sauce", 750, "Snacks", "https://via.placeholder.com/200x150/FFE66D/FFFFFF?text=Nachos"),
    ("Candy Mix", "Assorted movie theater candies", 450, "Candy", "https://via.placeholder.com/200x150/A8E6CF/FFFFFF?text=Candy"),
    ("Hot Dog", "Classic beef hot dog with condiments", 650, "Food", "https://via.placeholder.com/200x150/FF8B94/FFFFFF?text=Hot+Dog"),
    ("Ice Cream", "Vanilla ice cream cup", 400, "Desserts", "https://via.placeholder.com/200x150/B4A7D6/FFFFFF?text=Ice+Cream"),
];

pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let conn = db.get_connection();
    let txn = conn.begin().await?;

    booking_snack::Entity::delete_many().exec(&txn).await?;
    booking_seat::Entity::delete_many().exec(&txn).await?;
    booking::Entity::delete_many().exec(&txn).await?;
    seat::Entity::delete_many().exec(&txn).await?;
    showtime::Entity::delete_many().exec(&txn).await?;
    movie::Entity::delete_many().exec(&txn).await?;
    snack::Entity::delete_many().exec(&txn).await?;

    let now = Utc::now();
    let mut rng = rand::thread_rng();
    let mut seat_count = 0;

    for seed in &MOVIES {
        let movie_id = Uuid::new_v4();
        movie::Entity::insert(movie::ActiveModel {
            id: Set(movie_id),
            title: Set(seed.title.to_string()),
            description: Set(Some(seed.description.to_string())),
            duration: Set(seed.duration),
            genre: Set(seed.genre.to_string()),
            rating: Set(seed.rating.to_string()),
            poster_url: Set(Some(seed.poster.to_string())),
            price: Set(Decimal::new(seed.price_cents, 2)),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec_without_returning(&txn)
        .await?;

        for (room, hour) in SCREENINGS {
            let showtime_id = Uuid::new_v4();
            showtime::Entity::insert(showtime::ActiveModel {
                id: Set(showtime_id),
                movie_id: Set(movie_id),
                start_time: Set(today_at(now, hour)),
                theater_room: Set(room.to_string()),
                total_seats: Set(SEAT_ROWS.len() as i32 * SEATS_PER_ROW),
                created_at: Set(now),
            })
            .exec_without_returning(&txn)
            .await?;

            let seats = seat_grid(showtime_id, &mut rng);
            seat_count += seats.len();
            seat::Entity::insert_many(seats)
                .exec_without_returning(&txn)
                .await?;

            tracing::info!(movie = seed.title, room, hour, "Created showtime");
        }
    }

    snack::Entity::insert_many(SNACKS.iter().map(|(name, description, cents, category, image)| {
        snack::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(Some(description.to_string())),
            price: Set(Decimal::new(*cents, 2)),
            category: Set(category.to_string()),
            image_url: Set(Some(image.to_string())),
            available: Set(true),
            created_at: Set(now),
        }
    }))
    .exec_without_returning(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(
        movies = MOVIES.len(),
        showtimes = MOVIES.len() * SCREENINGS.len(),
        seats = seat_count,
        snacks = SNACKS.len(),
        "Database seeded"
    );

    if let Some(url) = config.redis_url.as_deref() {
        match Cache::connect(url).await {
            Ok(cache) => cache.invalidate_catalog().await?,
            Err(e) => tracing::warn!(error = %e, "Could not clear catalog cache"),
        }
    }

    Ok(())
}

/// `hour:00` UTC on the day of `now`.
fn today_at(now: DateTime<Utc>, hour: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default();
    now.date_naive().and_time(time).and_utc()
}

/// Seats A1..J10 for one showtime. Front rows are premium.
fn seat_grid<R: Rng>(showtime_id: Uuid, rng: &mut R) -> Vec<seat::ActiveModel> {
    SEAT_ROWS
        .iter()
        .flat_map(|row| (1..=SEATS_PER_ROW).map(move |number| (*row, number)))
        .map(|(row, number)| {
            let seat_type = if PREMIUM_ROWS.contains(&row) {
                SEAT_TYPE_PREMIUM
            } else {
                SEAT_TYPE_REGULAR
            };

            seat::ActiveModel {
                id: Set(Uuid::new_v4()),
                showtime_id: Set(showtime_id),
                seat_row: Set(row.to_string()),
                seat_number: Set(number),
                seat_type: Set(seat_type.to_string()),
                is_occupied: Set(rng.gen_bool(OCCUPIED_RATIO)),
                reserved_at: Set(None),
                reserved_by: Set(None),
            }
        })
        .collect()
}
