use sea_orm_migration::{prelude::*, schema::*};

use super::m20240301_000001_create_users::User;
use super::m20240301_000002_create_buses::BusRoute;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(integer(Booking::UserId).not_null())
                    .col(
                        timestamp_with_time_zone(Booking::BookingTime)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_user")
                            .from(Booking::Table, Booking::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookingDetail::Table)
                    .if_not_exists()
                    .col(pk_auto(BookingDetail::Id))
                    .col(integer(BookingDetail::BusRouteId).not_null())
                    .col(integer(BookingDetail::SeatNumbers).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_detail_bus_route")
                            .from(BookingDetail::Table, BookingDetail::BusRouteId)
                            .to(BusRoute::Table, BusRoute::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Associative table between bookings and their line items. The
        // auto-increment id keeps insertion order for display.
        manager
            .create_table(
                Table::create()
                    .table(BookingBook::Table)
                    .if_not_exists()
                    .col(pk_auto(BookingBook::Id))
                    .col(integer(BookingBook::BookingId).not_null())
                    .col(integer(BookingBook::BookingDetailId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_book_booking")
                            .from(BookingBook::Table, BookingBook::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_book_detail")
                            .from(BookingBook::Table, BookingBook::BookingDetailId)
                            .to(BookingDetail::Table, BookingDetail::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingBook::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(BookingDetail::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    UserId,
    BookingTime,
}

#[derive(DeriveIden)]
pub enum BookingDetail {
    Table,
    Id,
    BusRouteId,
    SeatNumbers,
}

#[derive(DeriveIden)]
pub enum BookingBook {
    Table,
    Id,
    BookingId,
    BookingDetailId,
}
