pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_users;
mod m20240301_000002_create_buses;
mod m20240301_000003_create_bookings;
mod m20240301_000004_create_reservations;
mod m20240301_000005_create_reviews;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_users::Migration),
            Box::new(m20240301_000002_create_buses::Migration),
            Box::new(m20240301_000003_create_bookings::Migration),
            Box::new(m20240301_000004_create_reservations::Migration),
            Box::new(m20240301_000005_create_reviews::Migration),
        ]
    }
}
