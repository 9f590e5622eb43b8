//! Migration: Create movies, showtimes, seats and snacks.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Movies::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Movies::Title).string().not_null())
                    .col(ColumnDef::new(Movies::Description).text().null())
                    .col(ColumnDef::new(Movies::Duration).integer().not_null())
                    .col(ColumnDef::new(Movies::Genre).string().not_null())
                    .col(ColumnDef::new(Movies::Rating).string().not_null())
                    .col(ColumnDef::new(Movies::PosterUrl).string().null())
                    .col(ColumnDef::new(Movies::Price).decimal_len(10, 2).not_null())
                    .col(
                        ColumnDef::new(Movies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Movies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Showtimes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Showtimes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Showtimes::MovieId).uuid().not_null())
                    .col(
                        ColumnDef::new(Showtimes::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Showtimes::TheaterRoom).string().not_null())
                    .col(ColumnDef::new(Showtimes::TotalSeats).integer().not_null())
                    .col(
                        ColumnDef::new(Showtimes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_showtimes_movie")
                            .from(Showtimes::Table, Showtimes::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_showtimes_movie_start")
                    .table(Showtimes::Table)
                    .col(Showtimes::MovieId)
                    .col(Showtimes::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Seats::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Seats::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Seats::ShowtimeId).uuid().not_null())
                    .col(ColumnDef::new(Seats::SeatRow).string_len(4).not_null())
                    .col(ColumnDef::new(Seats::SeatNumber).integer().not_null())
                    .col(
                        ColumnDef::new(Seats::SeatType)
                            .string_len(16)
                            .not_null()
                            .default("regular"),
                    )
                    .col(
                        ColumnDef::new(Seats::IsOccupied)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Seats::ReservedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Seats::ReservedBy).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seats_showtime")
                            .from(Seats::Table, Seats::ShowtimeId)
                            .to(Showtimes::Table, Showtimes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seats_showtime_position")
                    .table(Seats::Table)
                    .col(Seats::ShowtimeId)
                    .col(Seats::SeatRow)
                    .col(Seats::SeatNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Snacks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Snacks::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Snacks::Name).string().not_null())
                    .col(ColumnDef::new(Snacks::Description).text().null())
                    .col(ColumnDef::new(Snacks::Price).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Snacks::Category).string().not_null())
                    .col(ColumnDef::new(Snacks::ImageUrl).string().null())
                    .col(
                        ColumnDef::new(Snacks::Available)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Snacks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Snacks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seats::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Showtimes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Movies::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Movies {
    Table,
    Id,
    Title,
    Description,
    Duration,
    Genre,
    Rating,
    PosterUrl,
    Price,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub(super) enum Showtimes {
    Table,
    Id,
    MovieId,
    StartTime,
    TheaterRoom,
    TotalSeats,
    CreatedAt,
}

#[derive(Iden)]
pub(super) enum Seats {
    Table,
    Id,
    ShowtimeId,
    SeatRow,
    SeatNumber,
    SeatType,
    IsOccupied,
    ReservedAt,
    ReservedBy,
}

#[derive(Iden)]
pub(super) enum Snacks {
    Table,
    Id,
    Name,
    Description,
    Price,
    Category,
    ImageUrl,
    Available,
    CreatedAt,
}
