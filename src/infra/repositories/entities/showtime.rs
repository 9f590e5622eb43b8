//! Showtime database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Showtime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "showtimes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub movie_id: Uuid,
    pub start_time: DateTimeUtc,
    pub theater_room: String,
    pub total_seats: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movie::Entity",
        from = "Column::MovieId",
        to = "super::movie::Column::Id",
        on_delete = "Cascade"
    )]
    Movie,
    #[sea_orm(has_many = "super::seat::Entity")]
    Seat,
    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl Related<super::seat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seat.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Attach the loaded movie row.
    pub fn into_domain(self, movie: super::movie::Model) -> Showtime {
        Showtime {
            id: self.id,
            movie_id: self.movie_id,
            start_time: self.start_time,
            theater_room: self.theater_room,
            total_seats: self.total_seats,
            created_at: self.created_at,
            movie: movie.into(),
        }
    }
}
