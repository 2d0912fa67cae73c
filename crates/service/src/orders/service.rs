use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::orders::domain::OrderRecord;
use crate::orders::repository::OrderRepository;

/// Application service mediating all access to the order collection.
/// Holds no state beyond the injected repository handle; concurrency control
/// is the store's business.
pub struct OrderService<R: OrderRepository> {
    repo: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<OrderRecord>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<OrderRecord>, ServiceError> {
        self.repo.get(id).await
    }

    /// Create an order linking an existing product and client.
    ///
    /// # Examples
    /// ```
    /// use service::orders::{repository::mock::MockOrderRepository, service::OrderService};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockOrderRepository::default());
    /// let product = repo.add_product("Keyboard", 4500);
    /// let client = repo.add_client("Ada", "ada@example.com");
    /// let svc = OrderService::new(repo);
    /// let created = tokio_test::block_on(svc.create(product.id, client.id)).unwrap();
    /// assert_eq!(created.order.product_id, product.id);
    /// assert_eq!(created.order.client_id, client.id);
    /// ```
    #[instrument(skip(self), fields(product_id = %product_id, client_id = %client_id))]
    pub async fn create(&self, product_id: Uuid, client_id: Uuid) -> Result<OrderRecord, ServiceError> {
        let created = self.repo.create(product_id, client_id).await?;
        info!(order_id = %created.order.id, "order_created");
        Ok(created)
    }

    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn update_by_id(&self, id: Uuid, product_id: Uuid, client_id: Uuid) -> Result<OrderRecord, ServiceError> {
        let updated = self.repo.update(id, product_id, client_id).await?;
        info!(order_id = %updated.order.id, "order_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete_by_id(&self, id: Uuid) -> Result<models::order::Model, ServiceError> {
        let deleted = self.repo.delete(id).await?;
        info!(order_id = %deleted.id, "order_deleted");
        Ok(deleted)
    }
}
