//! Migration: Create bookings and their seat and snack links.

use sea_orm_migration::prelude::*;

use super::m20240102_000001_create_catalog_tables::{Seats, Showtimes, Snacks};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bookings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bookings::ShowtimeId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::CustomerName).string().not_null())
                    .col(ColumnDef::new(Bookings::CustomerEmail).string().not_null())
                    .col(ColumnDef::new(Bookings::CustomerPhone).string().null())
                    .col(
                        ColumnDef::new(Bookings::TotalAmount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Bookings::BookingDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_showtime")
                            .from(Bookings::Table, Bookings::ShowtimeId)
                            .to(Showtimes::Table, Showtimes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_customer_email")
                    .table(Bookings::Table)
                    .col(Bookings::CustomerEmail)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookingSeats::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BookingSeats::BookingId).uuid().not_null())
                    .col(ColumnDef::new(BookingSeats::SeatId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(BookingSeats::BookingId)
                            .col(BookingSeats::SeatId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_seats_booking")
                            .from(BookingSeats::Table, BookingSeats::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_seats_seat")
                            .from(BookingSeats::Table, BookingSeats::SeatId)
                            .to(Seats::Table, Seats::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookingSnacks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BookingSnacks::BookingId).uuid().not_null())
                    .col(ColumnDef::new(BookingSnacks::SnackId).uuid().not_null())
                    .col(
                        ColumnDef::new(BookingSnacks::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .primary_key(
                        Index::create()
                            .col(BookingSnacks::BookingId)
                            .col(BookingSnacks::SnackId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_snacks_booking")
                            .from(BookingSnacks::Table, BookingSnacks::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_snacks_snack")
                            .from(BookingSnacks::Table, BookingSnacks::SnackId)
                            .to(Snacks::Table, Snacks::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingSnacks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BookingSeats::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Bookings {
    Table,
    Id,
    ShowtimeId,
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    TotalAmount,
    Status,
    BookingDate,
}

#[derive(Iden)]
enum BookingSeats {
    Table,
    BookingId,
    SeatId,
}

#[derive(Iden)]
enum BookingSnacks {
    Table,
    BookingId,
    SnackId,
    Quantity,
}
