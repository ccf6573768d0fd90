use crate::db::connect;
use crate::{bid, project, user};
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, Uuid::new_v4())
}

async fn create_client(db: &DatabaseConnection) -> Result<user::Model> {
    Ok(user::create(db, &unique_email("client"), "Test Client", user::Role::Client, "hash", "argon2").await?)
}

async fn create_developer(db: &DatabaseConnection) -> Result<user::Model> {
    Ok(user::create(db, &unique_email("dev"), "Test Dev", user::Role::Developer, "hash", "argon2").await?)
}

#[tokio::test]
async fn test_user_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let email = unique_email("crud");
    let created = user::create(&db, &email, "Alice", user::Role::Client, "hash", "argon2").await?;
    assert_eq!(created.email, email);
    assert_eq!(created.role(), Some(user::Role::Client));

    let found = user::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().name, "Alice");

    let by_email = user::find_by_email(&db, &email).await?;
    assert_eq!(by_email.map(|u| u.id), Some(created.id));

    // Duplicate email refused by unique column
    let dup = user::create(&db, &email, "Alice Again", user::Role::Developer, "hash", "argon2").await;
    assert!(dup.is_err());

    user::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_project_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let client = create_client(&db).await?;

    let created = project::create(
        &db,
        "Marketplace backend",
        "A CRUD backend matching clients to developers",
        &["rust".to_string(), "postgres".to_string()],
        2500.0,
        client.id,
        None,
    )
    .await?;

    assert_eq!(created.status(), Some(project::ProjectStatus::Open));
    assert_eq!(created.assigned_to, None);
    assert_eq!(created.created_by, client.id);
    assert_eq!(created.tech_stack_items(), vec!["rust".to_string(), "postgres".to_string()]);

    let found = project::Entity::find_by_id(created.id).one(&db).await?;
    assert!(found.is_some());

    let by_owner = project::Entity::find()
        .filter(project::Column::CreatedBy.eq(client.id))
        .all(&db)
        .await?;
    assert_eq!(by_owner.len(), 1);

    // Validation refused before any insert
    let invalid = project::create(&db, "ab", "long enough description", &["rust".into()], 10.0, client.id, None).await;
    assert!(invalid.is_err());

    project::Entity::delete_by_id(created.id).exec(&db).await?;
    user::Entity::delete_by_id(client.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_bid_crud_and_unique_pair() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let client = create_client(&db).await?;
    let dev = create_developer(&db).await?;

    let proj = project::create(
        &db,
        "Bid target",
        "Project that receives bids in tests",
        &["rust".to_string()],
        800.0,
        client.id,
        None,
    )
    .await?;

    let created = bid::create(&db, proj.id, dev.id, 750.0, "I can deliver this in ten days", None).await?;
    assert_eq!(created.status(), Some(bid::BidStatus::Pending));
    assert!(created.is_pending());

    // Second bid from the same developer on the same project hits the
    // composite unique index
    let dup = bid::create(&db, proj.id, dev.id, 700.0, "Second attempt, same pair", None).await;
    assert!(dup.is_err());

    let bids = bid::Entity::find()
        .filter(bid::Column::ProjectId.eq(proj.id))
        .all(&db)
        .await?;
    assert_eq!(bids.len(), 1);

    bid::Entity::delete_by_id(created.id).exec(&db).await?;
    project::Entity::delete_by_id(proj.id).exec(&db).await?;
    user::Entity::delete_by_id(dev.id).exec(&db).await?;
    user::Entity::delete_by_id(client.id).exec(&db).await?;
    Ok(())
}
