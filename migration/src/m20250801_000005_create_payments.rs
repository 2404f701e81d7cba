use sea_orm_migration::{prelude::*, schema::*};

use super::m20250801_000004_create_bookings::Booking;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(uuid(Payment::Id).primary_key())
                    .col(uuid(Payment::BookingId).not_null())
                    .col(string_len(Payment::Method, 30).not_null())
                    .col(decimal_len(Payment::Amount, 10, 2).not_null())
                    .col(string_len_null(Payment::CardHolderName, 100))
                    .col(
                        timestamp_with_time_zone(Payment::PaidAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_booking")
                            .from(Payment::Table, Payment::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    BookingId,
    Method,
    Amount,
    CardHolderName,
    PaidAt,
}
