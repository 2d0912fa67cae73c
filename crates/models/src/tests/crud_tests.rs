use crate::db::connect;
use crate::errors::is_foreign_key_violation;
use crate::{client, order, product};
use anyhow::Result;
use chrono::Utc;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

/// Setup test database with migrations, or None when no database is reachable.
async fn setup_test_db() -> Result<Option<DatabaseConnection>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(None);
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return Ok(None);
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return Ok(None);
    }
    Ok(Some(db))
}

#[tokio::test]
async fn test_product_crud() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let name = format!("test_product_{}", Uuid::new_v4());
    let created = product::create(&db, &name, 4500).await?;
    assert_eq!(created.name, name);
    assert_eq!(created.price_cents, 4500);

    let found = product::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().name, name);

    product::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_product_validation() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    assert!(product::create(&db, "  ", 100).await.is_err());
    assert!(product::create(&db, "negative", -1).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_client_crud() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let email = format!("test_{}@example.com", Uuid::new_v4());
    let created = client::create(&db, "Test Client", &email).await?;
    assert_eq!(created.email, email);

    let found = client::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().email, email);

    // invalid email rejected before touching the table
    assert!(client::create(&db, "No Email", "not-an-email").await.is_err());

    client::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_order_foreign_keys() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let p = product::create(&db, &format!("order_product_{}", Uuid::new_v4()), 1200).await?;
    let c = client::create(&db, "Order Client", &format!("order_{}@example.com", Uuid::new_v4())).await?;

    let now = Utc::now().into();
    let created = order::ActiveModel {
        id: Set(Uuid::new_v4()),
        product_id: Set(p.id),
        client_id: Set(c.id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await?;
    assert_eq!(created.product_id, p.id);
    assert_eq!(created.client_id, c.id);

    // A dangling reference must be rejected and classify as an FK violation.
    let dangling = order::ActiveModel {
        id: Set(Uuid::new_v4()),
        product_id: Set(Uuid::new_v4()),
        client_id: Set(c.id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&db)
    .await;
    match dangling {
        Err(e) => assert!(is_foreign_key_violation(&e)),
        Ok(m) => panic!("insert with unknown product succeeded: {:?}", m),
    }

    order::Entity::delete_by_id(created.id).exec(&db).await?;
    product::Entity::delete_by_id(p.id).exec(&db).await?;
    client::Entity::delete_by_id(c.id).exec(&db).await?;
    Ok(())
}
