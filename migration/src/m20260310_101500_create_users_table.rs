use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::FirstName).string_len(100))
                    .col(ColumnDef::new(Users::LastName).string_len(100))
                    .col(ColumnDef::new(Users::Bio).string_len(500))
                    .col(ColumnDef::new(Users::JobTitle).string_len(100))
                    .col(ColumnDef::new(Users::ProfileImagePath).string_len(255))
                    .col(ColumnDef::new(Users::LinkedinUrl).string_len(255))
                    .col(ColumnDef::new(Users::GithubUrl).string_len(255))
                    .col(ColumnDef::new(Users::TwitterUrl).string_len(255))
                    .col(ColumnDef::new(Users::WebsiteUrl).string_len(255))
                    .col(ColumnDef::new(Users::Location).string_len(100))
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    FirstName,
    LastName,
    Bio,
    JobTitle,
    ProfileImagePath,
    LinkedinUrl,
    GithubUrl,
    TwitterUrl,
    WebsiteUrl,
    Location,
    CreatedAt,
    UpdatedAt,
}
