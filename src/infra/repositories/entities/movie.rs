//! Movie database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Movie;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub duration: i32,
    pub genre: String,
    pub rating: String,
    pub poster_url: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::showtime::Entity")]
    Showtime,
}

impl Related<super::showtime::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Showtime.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Movie {
    fn from(model: Model) -> Self {
        Movie {
            id: model.id,
            title: model.title,
            description: model.description,
            duration: model.duration,
            genre: model.genre,
            rating: model.rating,
            poster_url: model.poster_url,
            price: model.price,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
