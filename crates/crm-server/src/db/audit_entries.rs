//! Audit entry persistence. Append and read only.

use async_trait::async_trait;
use sqlx::PgPool;

use super::DbResult;
use crate::audit::{AuditEntry, NewAuditEntry};
use crate::features::shared::{
    pagination::PageRequest,
    sorting::{Sort, SortField},
};

const AUDIT_COLUMNS: &str = "id, action, customer_id, request, status, creation_datetime";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditSortField {
    Id,
    Action,
    CustomerId,
    Status,
    CreationDatetime,
}

impl SortField for AuditSortField {
    const ALL: &'static [Self] = &[
        AuditSortField::Id,
        AuditSortField::Action,
        AuditSortField::CustomerId,
        AuditSortField::Status,
        AuditSortField::CreationDatetime,
    ];

    fn name(self) -> &'static str {
        match self {
            AuditSortField::Id => "id",
            AuditSortField::Action => "action",
            AuditSortField::CustomerId => "customerId",
            AuditSortField::Status => "status",
            AuditSortField::CreationDatetime => "creationDatetime",
        }
    }

    fn column(self) -> &'static str {
        match self {
            AuditSortField::Id => "id",
            AuditSortField::Action => "action",
            AuditSortField::CustomerId => "customer_id",
            AuditSortField::Status => "status",
            AuditSortField::CreationDatetime => "creation_datetime",
        }
    }
}

#[async_trait]
pub trait AuditRepository: Send + Sync {
    async fn insert(&self, entry: &NewAuditEntry) -> DbResult<AuditEntry>;

    async fn find_page(
        &self,
        page: &PageRequest,
        sort: &Sort<AuditSortField>,
    ) -> DbResult<(Vec<AuditEntry>, i64)>;
}

#[derive(Clone)]
pub struct PgAuditRepository {
    pool: PgPool,
}

impl PgAuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PgAuditRepository {
    async fn insert(&self, entry: &NewAuditEntry) -> DbResult<AuditEntry> {
        sqlx::query_as::<_, AuditEntry>(&format!(
            r#"
            INSERT INTO audit_entries (action, customer_id, request, status, creation_datetime)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {AUDIT_COLUMNS}
            "#
        ))
        .bind(entry.action.as_str())
        .bind(entry.customer_id)
        .bind(&entry.request)
        .bind(entry.status.as_str())
        .bind(entry.creation_datetime)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_page(
        &self,
        page: &PageRequest,
        sort: &Sort<AuditSortField>,
    ) -> DbResult<(Vec<AuditEntry>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_entries")
            .fetch_one(&self.pool)
            .await?;

        let entries = sqlx::query_as::<_, AuditEntry>(&format!(
            "SELECT {AUDIT_COLUMNS} FROM audit_entries ORDER BY {} LIMIT $1 OFFSET $2",
            sort.order_by()
        ))
        .bind(page.size())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((entries, total))
    }
}
