use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One seat request against one bus-route instance. Created only as part
/// of a booking-creation transaction.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking_detail")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub bus_route_id: i32,
    pub seat_numbers: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bus_route::Entity",
        from = "Column::BusRouteId",
        to = "super::bus_route::Column::Id"
    )]
    BusRoute,
    #[sea_orm(has_many = "super::booking_book::Entity")]
    BookingBooks,
}

impl Related<super::bus_route::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BusRoute.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        super::booking_book::Relation::Booking.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::booking_book::Relation::BookingDetail.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
