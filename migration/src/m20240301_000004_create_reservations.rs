use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(pk_auto(Reservation::Id))
                    .col(string_len(Reservation::Name, 100).not_null())
                    .col(string_len(Reservation::MobileNo, 32).not_null())
                    .col(date(Reservation::DateOfTravel).not_null())
                    .col(string_len(Reservation::DurationType, 12).not_null())
                    .col(integer(Reservation::PassengerNumbers).not_null())
                    .col(string_len(Reservation::JourneyFrom, 100).not_null())
                    .col(string_len(Reservation::JourneyTo, 100).not_null())
                    .col(string_len(Reservation::VehicleType, 20).not_null())
                    .col(text_null(Reservation::Comment))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reservation {
    Table,
    Id,
    Name,
    MobileNo,
    DateOfTravel,
    DurationType,
    PassengerNumbers,
    JourneyFrom,
    JourneyTo,
    VehicleType,
    Comment,
}
