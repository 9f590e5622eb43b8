//! Booking receipt e-mail job.
//!
//! No SMTP transport is wired in; the handler logs the rendered message.

use std::env;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{BRAND_NAME, DEFAULT_RECEIPT_SENDER};
use crate::domain::Booking;
use crate::errors::AppError;

/// Receipt e-mail payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptJob {
    pub booking_id: Uuid,
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Sender override (defaults to SMTP_FROM)
    #[serde(default)]
    pub from: Option<String>,
}

impl ReceiptJob {
    /// Render the receipt for a loaded booking.
    pub fn for_booking(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id,
            to: booking.customer_email.clone(),
            subject: format!(
                "Your {} Booking Confirmation (ID: {})",
                BRAND_NAME, booking.id
            ),
            body: render_body(booking),
            from: None,
        }
    }
}

fn render_body(booking: &Booking) -> String {
    let showtime = &booking.showtime;
    let seats = if booking.seats.is_empty() {
        "none".to_string()
    } else {
        booking
            .seats
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut body = String::new();
    let _ = writeln!(body, "Hi {},", booking.customer_name);
    let _ = writeln!(body);
    let _ = writeln!(body, "Thank you for booking with {}!", BRAND_NAME);
    let _ = writeln!(body);
    let _ = writeln!(body, "Booking ID: {}", booking.id);
    let _ = writeln!(body, "Movie: {}", showtime.movie.title);
    let _ = writeln!(
        body,
        "Showtime: {}",
        showtime.start_time.format("%A, %B %-d %Y at %H:%M UTC")
    );
    let _ = writeln!(body, "Theater: {}", showtime.theater_room);
    let _ = writeln!(body, "Seats: {}", seats);

    if !booking.snacks.is_empty() {
        let _ = writeln!(body, "Snacks:");
        for line in &booking.snacks {
            let _ = writeln!(
                body,
                "  - {} x {} (${:.2})",
                line.quantity,
                line.snack.name,
                line.snack.price * rust_decimal::Decimal::from(line.quantity)
            );
        }
    }

    let _ = writeln!(body, "Total: ${:.2}", booking.total_amount);
    let _ = writeln!(body);
    let _ = write!(body, "Please arrive 15 minutes early. Enjoy the show!");
    body
}

/// Deliver a receipt. Logs the message.
pub async fn receipt_job_handler(job: ReceiptJob) -> Result<(), AppError> {
    let from = job
        .from
        .clone()
        .or_else(|| env::var("SMTP_FROM").ok())
        .unwrap_or_else(|| DEFAULT_RECEIPT_SENDER.to_string());

    tracing::info!(
        booking_id = %job.booking_id,
        to = %job.to,
        from = %from,
        subject = %job.subject,
        "Sending booking receipt"
    );
    tracing::info!(
        "=== EMAIL (logged) ===\n\
         From: {}\n\
         To: {}\n\
         Subject: {}\n\
         Body:\n{}\n\
         ======================",
        from,
        job.to,
        job.subject,
        job.body
    );

    Ok(())
}
