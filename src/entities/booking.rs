use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Booking header: who booked and when. Line items hang off the
/// `booking_book` associative table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub booking_time: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::booking_book::Entity")]
    BookingBooks,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::booking_detail::Entity> for Entity {
    fn to() -> RelationDef {
        super::booking_book::Relation::BookingDetail.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::booking_book::Relation::Booking.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
