use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Boat::Table)
                    .if_not_exists()
                    .col(uuid(Boat::Id).primary_key())
                    .col(string_len(Boat::Name, 100).not_null())
                    .col(string_len_null(Boat::Model, 100))
                    .col(text_null(Boat::Features))
                    .col(string_len_null(Boat::RegistrationNumber, 50))
                    .col(string_len_null(Boat::Status, 50))
                    .col(integer(Boat::Capacity).not_null())
                    .col(string_len_null(Boat::Description, 500))
                    .col(string_len_null(Boat::BoatType, 50))
                    .col(
                        timestamp_with_time_zone(Boat::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Boat::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Boat {
    Table,
    Id,
    Name,
    Model,
    Features,
    RegistrationNumber,
    Status,
    Capacity,
    Description,
    BoatType,
    CreatedAt,
}
