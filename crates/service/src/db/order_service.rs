use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryOrder, Set};
use uuid::Uuid;

use models::errors::is_foreign_key_violation;
use models::{client, order, product};

use crate::errors::ServiceError;
use crate::orders::domain::OrderRecord;

/// List all orders in insertion order with product and client attached.
/// Relation rows are loaded in two batched queries, not per order.
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<OrderRecord>, ServiceError> {
    let orders = order::Entity::find()
        .order_by_asc(order::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let products = orders
        .load_one(product::Entity, db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let clients = orders
        .load_one(client::Entity, db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(orders
        .into_iter()
        .zip(products)
        .zip(clients)
        .map(|((order, product), client)| OrderRecord { order, product, client })
        .collect())
}

/// Get one order by id, or None when no such row exists. Absence is not an
/// error here; interpreting it is the caller's business.
pub async fn get_order(db: &DatabaseConnection, id: Uuid) -> Result<Option<OrderRecord>, ServiceError> {
    let found = order::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    match found {
        Some(m) => with_relations(db, m).await.map(Some),
        None => Ok(None),
    }
}

/// Insert a new order linking `product_id` and `client_id`. A referential
/// rejection from the store is re-signaled as `RelationMissing`; every other
/// failure stays an opaque `Db` error.
pub async fn create_order(
    db: &DatabaseConnection,
    product_id: Uuid,
    client_id: Uuid,
) -> Result<OrderRecord, ServiceError> {
    let now = Utc::now().into();
    let am = order::ActiveModel {
        id: Set(Uuid::new_v4()),
        product_id: Set(product_id),
        client_id: Set(client_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let inserted = am.insert(db).await.map_err(|e| {
        if is_foreign_key_violation(&e) {
            ServiceError::RelationMissing
        } else {
            ServiceError::Db(e.to_string())
        }
    })?;
    with_relations(db, inserted).await
}

/// Replace the product/client association of an existing order and refresh
/// `updated_at`. Unlike `create_order`, a dangling reference here surfaces as
/// the store's raw rejection.
pub async fn update_order(
    db: &DatabaseConnection,
    id: Uuid,
    product_id: Uuid,
    client_id: Uuid,
) -> Result<OrderRecord, ServiceError> {
    let mut am: order::ActiveModel = order::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("order"))?
        .into();
    am.product_id = Set(product_id);
    am.client_id = Set(client_id);
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    with_relations(db, updated).await
}

/// Hard-delete an order and return its prior state (relations not loaded).
/// Deleting an id that is already gone is an error, not a no-op.
pub async fn delete_order(db: &DatabaseConnection, id: Uuid) -> Result<order::Model, ServiceError> {
    let found = order::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("order"))?;
    order::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

async fn with_relations(db: &DatabaseConnection, order: order::Model) -> Result<OrderRecord, ServiceError> {
    let product = product::Entity::find_by_id(order.product_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let client = client::Entity::find_by_id(order.client_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(OrderRecord { order, product, client })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::{client, product};
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn order_crud_service() -> Result<(), anyhow::Error> {
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: {}", e);
                return Ok(());
            }
        };

        let p1 = product::create(&db, &format!("svc_product_{}", Uuid::new_v4()), 2500).await?;
        let p2 = product::create(&db, &format!("svc_product_{}", Uuid::new_v4()), 9900).await?;
        let c1 = client::create(&db, "Svc Client", &format!("svc_{}@example.com", Uuid::new_v4())).await?;
        let c2 = client::create(&db, "Svc Client 2", &format!("svc_{}@example.com", Uuid::new_v4())).await?;

        // create attaches both relations
        let created = create_order(&db, p1.id, c1.id).await?;
        assert_eq!(created.order.product_id, p1.id);
        assert_eq!(created.order.client_id, c1.id);
        assert_eq!(created.product.as_ref().map(|p| p.id), Some(p1.id));
        assert_eq!(created.client.as_ref().map(|c| c.id), Some(c1.id));

        // get agrees with list
        let got = get_order(&db, created.order.id).await?.expect("created order readable");
        assert_eq!(got, created);
        let listed = list_orders(&db).await?;
        assert!(listed.iter().any(|r| r.order.id == created.order.id));

        // update replaces the association and refreshes updated_at only
        let updated = update_order(&db, created.order.id, p2.id, c2.id).await?;
        assert_eq!(updated.order.product_id, p2.id);
        assert_eq!(updated.order.client_id, c2.id);
        assert_eq!(updated.order.created_at, created.order.created_at);
        assert!(updated.order.updated_at > created.order.updated_at);

        // delete returns the prior row, second delete is an error
        let deleted = delete_order(&db, created.order.id).await?;
        assert_eq!(deleted.id, created.order.id);
        assert!(get_order(&db, created.order.id).await?.is_none());
        let again = delete_order(&db, created.order.id).await;
        assert!(matches!(again, Err(ServiceError::NotFound(_))));

        product::Entity::delete_by_id(p1.id).exec(&db).await?;
        product::Entity::delete_by_id(p2.id).exec(&db).await?;
        client::Entity::delete_by_id(c1.id).exec(&db).await?;
        client::Entity::delete_by_id(c2.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_unknown_relations() -> Result<(), anyhow::Error> {
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: {}", e);
                return Ok(());
            }
        };

        let p = product::create(&db, &format!("svc_fk_product_{}", Uuid::new_v4()), 700).await?;
        let c = client::create(&db, "FK Client", &format!("svc_fk_{}@example.com", Uuid::new_v4())).await?;
        let before = list_orders(&db).await?.len();

        let bad_product = create_order(&db, Uuid::new_v4(), c.id).await;
        match bad_product {
            Err(ref e) => assert_eq!(e.to_string(), "Product or Client doesn't exist"),
            Ok(_) => panic!("create with unknown product succeeded"),
        }
        let bad_client = create_order(&db, p.id, Uuid::new_v4()).await;
        assert!(matches!(bad_client, Err(ServiceError::RelationMissing)));

        // nothing was persisted
        assert_eq!(list_orders(&db).await?.len(), before);

        // update does not translate the same rejection
        let created = create_order(&db, p.id, c.id).await?;
        let dangling = update_order(&db, created.order.id, Uuid::new_v4(), c.id).await;
        assert!(matches!(dangling, Err(ServiceError::Db(_))));

        delete_order(&db, created.order.id).await?;
        product::Entity::delete_by_id(p.id).exec(&db).await?;
        client::Entity::delete_by_id(c.id).exec(&db).await?;
        Ok(())
    }
}
