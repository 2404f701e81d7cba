use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trip")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub duration: i32,
    pub capacity: i32,
    pub price: Decimal,
    pub location: Option<String>,
    pub route: Option<String>,
    pub image_url: Option<String>,
    pub boat_id: Option<Uuid>,
    pub guide_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::boat::Entity",
        from = "Column::BoatId",
        to = "super::boat::Column::Id"
    )]
    Boat,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::GuideId",
        to = "super::user::Column::Id"
    )]
    Guide,
    #[sea_orm(has_many = "super::booking::Entity")]
    Bookings,
}

impl Related<super::boat::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Boat.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
