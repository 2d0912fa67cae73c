use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::orders::domain::OrderRecord;

/// Repository abstraction over the order table. Reads always attach the
/// referenced product and client; `delete` hands back the prior row only.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<OrderRecord>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<OrderRecord>, ServiceError>;
    async fn create(&self, product_id: Uuid, client_id: Uuid) -> Result<OrderRecord, ServiceError>;
    async fn update(&self, id: Uuid, product_id: Uuid, client_id: Uuid) -> Result<OrderRecord, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<models::order::Model, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmOrderRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn list(&self) -> Result<Vec<OrderRecord>, ServiceError> {
        crate::db::order_service::list_orders(&self.db).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<OrderRecord>, ServiceError> {
        crate::db::order_service::get_order(&self.db, id).await
    }

    async fn create(&self, product_id: Uuid, client_id: Uuid) -> Result<OrderRecord, ServiceError> {
        crate::db::order_service::create_order(&self.db, product_id, client_id).await
    }

    async fn update(&self, id: Uuid, product_id: Uuid, client_id: Uuid) -> Result<OrderRecord, ServiceError> {
        crate::db::order_service::update_order(&self.db, id, product_id, client_id).await
    }

    async fn delete(&self, id: Uuid) -> Result<models::order::Model, ServiceError> {
        crate::db::order_service::delete_order(&self.db, id).await
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use models::{client, order, product};

    /// Enforces the same referential rules as the relational schema and keeps
    /// orders in insertion order. Products and clients are seeded directly.
    #[derive(Default)]
    pub struct MockOrderRepository {
        products: Mutex<HashMap<Uuid, product::Model>>,
        clients: Mutex<HashMap<Uuid, client::Model>>,
        orders: Mutex<Vec<order::Model>>,
    }

    impl MockOrderRepository {
        pub fn add_product(&self, name: &str, price_cents: i64) -> product::Model {
            let now = Utc::now().into();
            let m = product::Model {
                id: Uuid::new_v4(),
                name: name.to_string(),
                price_cents,
                created_at: now,
                updated_at: now,
            };
            self.products.lock().unwrap().insert(m.id, m.clone());
            m
        }

        pub fn add_client(&self, name: &str, email: &str) -> client::Model {
            let now = Utc::now().into();
            let m = client::Model {
                id: Uuid::new_v4(),
                name: name.to_string(),
                email: email.to_string(),
                created_at: now,
                updated_at: now,
            };
            self.clients.lock().unwrap().insert(m.id, m.clone());
            m
        }

        fn record(&self, order: order::Model) -> OrderRecord {
            let product = self.products.lock().unwrap().get(&order.product_id).cloned();
            let client = self.clients.lock().unwrap().get(&order.client_id).cloned();
            OrderRecord { order, product, client }
        }

        fn has_relations(&self, product_id: Uuid, client_id: Uuid) -> bool {
            self.products.lock().unwrap().contains_key(&product_id)
                && self.clients.lock().unwrap().contains_key(&client_id)
        }
    }

    #[async_trait]
    impl OrderRepository for MockOrderRepository {
        async fn list(&self) -> Result<Vec<OrderRecord>, ServiceError> {
            let orders = self.orders.lock().unwrap().clone();
            Ok(orders.into_iter().map(|o| self.record(o)).collect())
        }

        async fn get(&self, id: Uuid) -> Result<Option<OrderRecord>, ServiceError> {
            let found = self.orders.lock().unwrap().iter().find(|o| o.id == id).cloned();
            Ok(found.map(|o| self.record(o)))
        }

        async fn create(&self, product_id: Uuid, client_id: Uuid) -> Result<OrderRecord, ServiceError> {
            if !self.has_relations(product_id, client_id) {
                return Err(ServiceError::RelationMissing);
            }
            let now = Utc::now().into();
            let m = order::Model {
                id: Uuid::new_v4(),
                product_id,
                client_id,
                created_at: now,
                updated_at: now,
            };
            self.orders.lock().unwrap().push(m.clone());
            Ok(self.record(m))
        }

        async fn update(&self, id: Uuid, product_id: Uuid, client_id: Uuid) -> Result<OrderRecord, ServiceError> {
            let updated = {
                let mut orders = self.orders.lock().unwrap();
                let existing = orders
                    .iter_mut()
                    .find(|o| o.id == id)
                    .ok_or_else(|| ServiceError::not_found("order"))?;
                // Dangling references surface as the raw store rejection
                // here, matching the relational implementation.
                if !self.has_relations(product_id, client_id) {
                    return Err(ServiceError::Db("foreign key constraint violated".into()));
                }
                existing.product_id = product_id;
                existing.client_id = client_id;
                existing.updated_at = Utc::now().into();
                existing.clone()
            };
            Ok(self.record(updated))
        }

        async fn delete(&self, id: Uuid) -> Result<models::order::Model, ServiceError> {
            let mut orders = self.orders.lock().unwrap();
            let pos = orders
                .iter()
                .position(|o| o.id == id)
                .ok_or_else(|| ServiceError::not_found("order"))?;
            Ok(orders.remove(pos))
        }
    }
}
