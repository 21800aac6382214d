use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_labs::Labs;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Account tables share one column layout; the token's account type picks the table.
const ACCOUNT_TABLES: [&str; 3] = ["admins", "users", "lab_staff"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in ACCOUNT_TABLES {
            manager.create_table(account_table(table)).await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(format!("idx_{}_lab_id", table))
                        .table(Alias::new(table))
                        .col(Account::LabId)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in ACCOUNT_TABLES.iter().rev() {
            manager
                .drop_table(Table::drop().table(Alias::new(*table)).to_owned())
                .await?;
        }

        Ok(())
    }
}

fn account_table(table: &str) -> TableCreateStatement {
    Table::create()
        .table(Alias::new(table))
        .if_not_exists()
        .col(
            ColumnDef::new(Account::Id)
                .string()
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Account::Email)
                .string()
                .not_null()
                .unique_key(),
        )
        .col(ColumnDef::new(Account::PasswordHash).string().not_null())
        .col(ColumnDef::new(Account::Role).string().not_null())
        .col(ColumnDef::new(Account::LabId).string().null())
        .col(
            ColumnDef::new(Account::IsActive)
                .boolean()
                .not_null()
                .default(true),
        )
        .col(
            ColumnDef::new(Account::MustChangePassword)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(Account::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(Account::UpdatedAt)
                .big_integer()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk_{}_lab_id", table))
                .from(Alias::new(table), Account::LabId)
                .to(Labs::Table, Labs::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

#[derive(DeriveIden)]
enum Account {
    Id,
    Email,
    PasswordHash,
    Role,
    LabId,
    IsActive,
    MustChangePassword,
    CreatedAt,
    UpdatedAt,
}
