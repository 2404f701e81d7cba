pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_users;
mod m20250801_000002_create_boats;
mod m20250801_000003_create_trips;
mod m20250801_000004_create_bookings;
mod m20250801_000005_create_payments;
mod m20250801_000006_create_feedback;
mod m20250801_000007_create_support_tickets;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_users::Migration),
            Box::new(m20250801_000002_create_boats::Migration),
            Box::new(m20250801_000003_create_trips::Migration),
            Box::new(m20250801_000004_create_bookings::Migration),
            Box::new(m20250801_000005_create_payments::Migration),
            Box::new(m20250801_000006_create_feedback::Migration),
            Box::new(m20250801_000007_create_support_tickets::Migration),
        ]
    }
}
