use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Order: index on product_id
        manager
            .create_index(
                Index::create()
                    .name("idx_order_product")
                    .table(Order::Table)
                    .col(Order::ProductId)
                    .to_owned(),
            )
            .await?;

        // Order: index on client_id
        manager
            .create_index(
                Index::create()
                    .name("idx_order_client")
                    .table(Order::Table)
                    .col(Order::ClientId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_order_product").table(Order::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_order_client").table(Order::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Order { Table, ProductId, ClientId }
