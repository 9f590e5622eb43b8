//! Snack database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Snack;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "snacks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub category: String,
    pub image_url: Option<String>,
    pub available: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking_snack::Entity")]
    BookingSnack,
}

impl Related<super::booking_snack::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingSnack.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Snack {
    fn from(model: Model) -> Self {
        Snack {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            image_url: model.image_url,
            available: model.available,
            created_at: model.created_at,
        }
    }
}
