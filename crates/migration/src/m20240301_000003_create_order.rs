//! Create `order` table.
//!
//! Links one product and one client by id. The foreign keys restrict
//! deletion of referenced rows, so an order can never dangle.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Order::Table)
                    .if_not_exists()
                    .col(uuid(Order::Id).primary_key())
                    .col(uuid(Order::ProductId).not_null())
                    .col(uuid(Order::ClientId).not_null())
                    .col(timestamp_with_time_zone(Order::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Order::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_product")
                            .from(Order::Table, Order::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_client")
                            .from(Order::Table, Order::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Order::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Order { Table, Id, ProductId, ClientId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Product { Table, Id }

#[derive(DeriveIden)]
enum Client { Table, Id }
