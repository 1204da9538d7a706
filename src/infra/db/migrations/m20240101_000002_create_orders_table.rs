//! Migration: Create the orders table.
//!
//! Orders reference their owning user through a cascading foreign key,
//! so removing a user removes that user's orders in the same statement.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Orders::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(Orders::Product).string().not_null())
                    .col(ColumnDef::new(Orders::Amount).integer().not_null())
                    .col(
                        ColumnDef::new(Orders::CreationTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_author_id")
                            .from(Orders::Table, Orders::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for owner lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_author_id")
                    .table(Orders::Table)
                    .col(Orders::AuthorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop the index first
        manager
            .drop_index(
                Index::drop()
                    .name("idx_orders_author_id")
                    .table(Orders::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    AuthorId,
    Product,
    Amount,
    CreationTime,
}
