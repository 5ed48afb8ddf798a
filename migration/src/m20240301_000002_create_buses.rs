use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bus::Table)
                    .if_not_exists()
                    .col(pk_auto(Bus::Id))
                    .col(string_len(Bus::BusNumber, 20).not_null().unique_key())
                    .col(string_len(Bus::BusType, 20).not_null().default("non_ac"))
                    .col(integer(Bus::Capacity).not_null())
                    .col(boolean(Bus::AvailabilityStatus).not_null().default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Route::Table)
                    .if_not_exists()
                    .col(pk_auto(Route::Id))
                    .col(string_len(Route::StartLocation, 100).not_null())
                    .col(string_len(Route::EndLocation, 100).not_null())
                    .col(text(Route::Stops).not_null())
                    .col(time(Route::ScheduledTime).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BusRoute::Table)
                    .if_not_exists()
                    .col(pk_auto(BusRoute::Id))
                    .col(integer(BusRoute::BusId).not_null())
                    .col(integer(BusRoute::RouteId).not_null())
                    .col(date(BusRoute::Date).not_null())
                    .col(integer(BusRoute::AvailableSeats).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bus_route_bus")
                            .from(BusRoute::Table, BusRoute::BusId)
                            .to(Bus::Table, Bus::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bus_route_route")
                            .from(BusRoute::Table, BusRoute::RouteId)
                            .to(Route::Table, Route::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BusRoute::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Route::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Bus::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Bus {
    Table,
    Id,
    BusNumber,
    BusType,
    Capacity,
    AvailabilityStatus,
}

#[derive(DeriveIden)]
pub enum Route {
    Table,
    Id,
    StartLocation,
    EndLocation,
    Stops,
    ScheduledTime,
}

#[derive(DeriveIden)]
pub enum BusRoute {
    Table,
    Id,
    BusId,
    RouteId,
    Date,
    AvailableSeats,
}
