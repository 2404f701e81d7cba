use sea_orm_migration::{prelude::*, schema::*};

use super::m20250801_000001_create_users::User;
use super::m20250801_000004_create_bookings::Booking;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(uuid(Feedback::Id).primary_key())
                    .col(uuid(Feedback::BookingId).not_null())
                    .col(uuid(Feedback::CustomerId).not_null())
                    .col(integer(Feedback::Rating).not_null())
                    .col(string_len_null(Feedback::Comments, 1000))
                    .col(
                        timestamp_with_time_zone(Feedback::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_booking")
                            .from(Feedback::Table, Feedback::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_customer")
                            .from(Feedback::Table, Feedback::CustomerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Feedback {
    Table,
    Id,
    BookingId,
    CustomerId,
    Rating,
    Comments,
    CreatedAt,
}
