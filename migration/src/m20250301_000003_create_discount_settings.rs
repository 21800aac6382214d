use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Singleton table: the store only ever reads and writes id = 1.
        // No row is seeded; an absent row means the built-in default applies.
        manager
            .create_table(
                Table::create()
                    .table(DiscountSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DiscountSettings::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DiscountSettings::DefaultDiscountRate)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DiscountSettings::ApplyToExpired)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(DiscountSettings::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiscountSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DiscountSettings {
    Table,
    Id,
    DefaultDiscountRate,
    ApplyToExpired,
    UpdatedAt,
}
