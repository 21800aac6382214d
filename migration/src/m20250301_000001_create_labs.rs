use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Labs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Labs::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Labs::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Labs::Name).string().not_null())
                    // Percentage 0-100, NULL means no lab-specific override
                    .col(ColumnDef::new(Labs::DiscountRate).double().null())
                    .col(
                        ColumnDef::new(Labs::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Labs::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Labs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Labs {
    Table,
    Id,
    Code,
    Name,
    DiscountRate,
    CreatedAt,
    UpdatedAt,
}
