use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create user role enum
        manager
            .create_type(
                Type::create()
                    .as_enum(UserRole::Enum)
                    .values([
                        UserRole::Customer,
                        UserRole::Staff,
                        UserRole::Guide,
                        UserRole::ItSupport,
                        UserRole::ItAssistant,
                        UserRole::Admin,
                        UserRole::Captain,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(uuid(User::Id).primary_key())
                    .col(string_len(User::Email, 255).not_null().unique_key())
                    .col(string_len(User::PasswordHash, 255).not_null())
                    .col(string_len(User::FirstName, 100).not_null())
                    .col(string_len(User::SecondName, 100).not_null())
                    .col(string_len_null(User::ContactNo, 30))
                    .col(string_len_null(User::Address, 255))
                    .col(string_len_null(User::City, 100))
                    .col(string_len_null(User::Street, 100))
                    .col(string_len_null(User::PostalCode, 20))
                    .col(date_null(User::HireDate))
                    .col(string_len_null(User::Certification, 255))
                    .col(string_len_null(User::Department, 100))
                    .col(string_len_null(User::Specialization, 100))
                    .col(integer_null(User::YearsOfExperience))
                    .col(
                        ColumnDef::new(User::Role)
                            .custom(UserRole::Enum)
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(UserRole::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    SecondName,
    ContactNo,
    Address,
    City,
    Street,
    PostalCode,
    HireDate,
    Certification,
    Department,
    Specialization,
    YearsOfExperience,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum UserRole {
    #[sea_orm(iden = "user_role")]
    Enum,
    #[sea_orm(iden = "customer")]
    Customer,
    #[sea_orm(iden = "staff")]
    Staff,
    #[sea_orm(iden = "guide")]
    Guide,
    #[sea_orm(iden = "it_support")]
    ItSupport,
    #[sea_orm(iden = "it_assistant")]
    ItAssistant,
    #[sea_orm(iden = "admin")]
    Admin,
    #[sea_orm(iden = "captain")]
    Captain,
}
