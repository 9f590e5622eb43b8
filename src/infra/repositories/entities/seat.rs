//! Seat database entity.

use sea_orm::entity::prelude::*;

use crate::domain::{Seat, SeatType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "seats")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub showtime_id: Uuid,
    pub seat_row: String,
    pub seat_number: i32,
    pub seat_type: String,
    pub is_occupied: bool,
    pub reserved_at: Option<DateTimeUtc>,
    pub reserved_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::showtime::Entity",
        from = "Column::ShowtimeId",
        to = "super::showtime::Column::Id",
        on_delete = "Cascade"
    )]
    Showtime,
    #[sea_orm(has_many = "super::booking_seat::Entity")]
    BookingSeat,
}

impl Related<super::showtime::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Showtime.def()
    }
}

impl Related<super::booking_seat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingSeat.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Seat {
    fn from(model: Model) -> Self {
        Seat {
            id: model.id,
            showtime_id: model.showtime_id,
            seat_row: model.seat_row,
            seat_number: model.seat_number,
            seat_type: SeatType::from(model.seat_type.as_str()),
            is_occupied: model.is_occupied,
            reserved_at: model.reserved_at,
            reserved_by: model.reserved_by,
        }
    }
}
