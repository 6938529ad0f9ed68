use sea_orm_migration::prelude::*;

const CREATED_AT_INDEX: &str = "ideas_created_at_idx";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ideas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ideas::Id)
                            .string_len(50)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ideas::Title).text().not_null())
                    .col(ColumnDef::new(Ideas::Description).text().not_null())
                    .col(
                        ColumnDef::new(Ideas::Upvotes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Ideas::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Ideas::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Default listing is newest first.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name(CREATED_AT_INDEX)
                    .table(Ideas::Table)
                    .col((Ideas::CreatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .name(CREATED_AT_INDEX)
                    .table(Ideas::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Ideas::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Ideas {
    Table,
    Id,
    Title,
    Description,
    Upvotes,
    CreatedAt,
    UpdatedAt,
}
