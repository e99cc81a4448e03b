//! Database integration tests for the Postgres repositories
//!
//! Each test gets a fresh database with migrations applied by
//! `#[sqlx::test]`.

use sqlx::PgPool;

use crm_server::audit::{AuditAction, AuditStatus, NewAuditEntry};
use crm_server::db::{
    AuditRepository, AuditSortField, CustomerRepository, CustomerSortField, PgAuditRepository,
    PgCustomerRepository,
};
use crm_server::features::shared::{PageRequest, Sort};
use crm_server::models::Gender;

mod helpers;

use helpers::CustomerFixture;

// ============================================================================
// Customer Tests
// ============================================================================

#[sqlx::test(migrations = "../../migrations")]
async fn test_insert_and_find(pool: PgPool) -> sqlx::Result<()> {
    let repository = PgCustomerRepository::new(pool);

    let created = repository
        .insert(
            &CustomerFixture::new("John")
                .address("123 Street")
                .gender(Gender::Male)
                .build(),
        )
        .await?;

    assert!(created.id > 0);
    assert_eq!(created.address.as_deref(), Some("123 Street"));

    let found = repository.find_by_id(created.id).await?;
    assert_eq!(found, Some(created));
    assert_eq!(repository.find_by_id(i64::MAX).await?, None);

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_overwrites_every_field(pool: PgPool) -> sqlx::Result<()> {
    let repository = PgCustomerRepository::new(pool);
    let created = repository
        .insert(
            &CustomerFixture::new("Grace")
                .address("1 Road")
                .gender(Gender::Female)
                .build(),
        )
        .await?;

    let updated = repository
        .update(created.id, CustomerFixture::new("Grace Hopper").age(85).build())
        .await?
        .expect("customer exists");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Grace Hopper");
    assert_eq!(updated.age, 85);
    assert_eq!(updated.address, None);
    assert_eq!(updated.gender, None);
    assert_eq!(repository.find_by_id(created.id).await?, Some(updated));

    let missing = repository
        .update(created.id + 1000, CustomerFixture::new("Nobody").build())
        .await?;
    assert_eq!(missing, None);

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_by_id(pool: PgPool) -> sqlx::Result<()> {
    let repository = PgCustomerRepository::new(pool);
    let created = repository.insert(&CustomerFixture::new("Linus").build()).await?;

    assert!(repository.delete_by_id(created.id).await?);
    assert!(!repository.delete_by_id(created.id).await?);
    assert_eq!(repository.find_by_id(created.id).await?, None);

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_page_sorts_and_counts(pool: PgPool) -> sqlx::Result<()> {
    let repository = PgCustomerRepository::new(pool);
    for (name, age, year) in [("Carol", 50, 1974), ("Alice", 20, 2004), ("Bob", 35, 1989)] {
        repository
            .insert(&CustomerFixture::new(name).age(age).born(year, 5, 1).build())
            .await?;
    }

    let sort = Sort::<CustomerSortField>::parse("dateOfBirth", "desc").unwrap();
    let (rows, total) = repository
        .find_page(&PageRequest::new(0, 2).unwrap(), &sort)
        .await?;

    assert_eq!(total, 3);
    let names: Vec<_> = rows.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob"]);

    let sort = Sort::<CustomerSortField>::parse("name", "asc").unwrap();
    let (rows, _) = repository
        .find_page(&PageRequest::new(1, 2).unwrap(), &sort)
        .await?;
    let names: Vec<_> = rows.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Carol"]);

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_equal_sort_keys_page_by_id(pool: PgPool) -> sqlx::Result<()> {
    let repository = PgCustomerRepository::new(pool);
    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(repository.insert(&CustomerFixture::new("Same").build()).await?.id);
    }

    let sort = Sort::<CustomerSortField>::parse("name", "asc").unwrap();
    let mut seen = Vec::new();
    for page in 0..3 {
        let (rows, _) = repository
            .find_page(&PageRequest::new(page, 2).unwrap(), &sort)
            .await?;
        seen.extend(rows.into_iter().map(|c| c.id));
    }

    assert_eq!(seen, ids);

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_schema_rejects_bad_rows(pool: PgPool) -> sqlx::Result<()> {
    let result = sqlx::query(
        "INSERT INTO customers (name, age, date_of_birth, gender) VALUES ('X', 1, '2000-01-01', 'Q')",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err(), "Expected gender check to fail");

    let result = sqlx::query(
        "INSERT INTO customers (name, age, date_of_birth) VALUES ('X', 0, '2000-01-01')",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err(), "Expected age check to fail");

    Ok(())
}

// ============================================================================
// Audit Entry Tests
// ============================================================================

#[sqlx::test(migrations = "../../migrations")]
async fn test_insert_audit_entry(pool: PgPool) -> sqlx::Result<()> {
    let repository = PgAuditRepository::new(pool);

    let entry = repository
        .insert(
            &NewAuditEntry::new(AuditAction::Update, AuditStatus::Failed)
                .customer_id(Some(77))
                .request(Some(r#"{"name":"X"}"#.to_string())),
        )
        .await?;

    assert!(entry.id > 0);
    assert_eq!(entry.action, "UPDATE");
    assert_eq!(entry.status, "FAILED");
    assert_eq!(entry.customer_id, Some(77));
    assert_eq!(entry.request.as_deref(), Some(r#"{"name":"X"}"#));

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_audit_entries_survive_customer_delete(pool: PgPool) -> sqlx::Result<()> {
    let customers = PgCustomerRepository::new(pool.clone());
    let audit = PgAuditRepository::new(pool);
    let created = customers.insert(&CustomerFixture::new("Temp").build()).await?;

    audit
        .insert(
            &NewAuditEntry::new(AuditAction::Delete, AuditStatus::Success)
                .customer_id(Some(created.id)),
        )
        .await?;
    customers.delete_by_id(created.id).await?;

    let sort = Sort::<AuditSortField>::parse("id", "asc").unwrap();
    let (rows, total) = audit.find_page(&PageRequest::new(0, 10).unwrap(), &sort).await?;
    assert_eq!(total, 1);
    assert_eq!(rows[0].customer_id, Some(created.id));

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_audit_find_page_orders_by_creation_time(pool: PgPool) -> sqlx::Result<()> {
    let repository = PgAuditRepository::new(pool);
    for action in [AuditAction::Create, AuditAction::Update, AuditAction::Delete] {
        let mut entry = NewAuditEntry::new(action, AuditStatus::Success);
        entry.creation_datetime = match action {
            AuditAction::Create => entry.creation_datetime - chrono::Duration::minutes(10),
            AuditAction::Update => entry.creation_datetime - chrono::Duration::minutes(5),
            AuditAction::Delete => entry.creation_datetime,
        };
        repository.insert(&entry).await?;
    }

    let sort = Sort::<AuditSortField>::parse("creationDatetime", "desc").unwrap();
    let (rows, total) = repository
        .find_page(&PageRequest::new(0, 100).unwrap(), &sort)
        .await?;

    assert_eq!(total, 3);
    let actions: Vec<_> = rows.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["DELETE", "UPDATE", "CREATE"]);

    Ok(())
}
