use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create ticket status enum
        manager
            .create_type(
                Type::create()
                    .as_enum(TicketStatus::Enum)
                    .values([TicketStatus::New, TicketStatus::Open, TicketStatus::Resolved])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SupportTicket::Table)
                    .if_not_exists()
                    .col(uuid(SupportTicket::Id).primary_key())
                    .col(string_len(SupportTicket::Name, 100).not_null())
                    .col(string_len(SupportTicket::Email, 255).not_null())
                    .col(string_len_null(SupportTicket::Phone, 30))
                    .col(string_len(SupportTicket::Subject, 200).not_null())
                    .col(text(SupportTicket::Message).not_null())
                    .col(
                        ColumnDef::new(SupportTicket::Status)
                            .custom(TicketStatus::Enum)
                            .not_null(),
                    )
                    .col(string_len_null(SupportTicket::PreferredContact, 20))
                    .col(
                        timestamp_with_time_zone(SupportTicket::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SupportTicket::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(TicketStatus::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SupportTicket {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Subject,
    Message,
    Status,
    PreferredContact,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum TicketStatus {
    #[sea_orm(iden = "ticket_status")]
    Enum,
    #[sea_orm(iden = "new")]
    New,
    #[sea_orm(iden = "open")]
    Open,
    #[sea_orm(iden = "resolved")]
    Resolved,
}
