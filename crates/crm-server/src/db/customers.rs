//! Customer persistence

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use super::DbResult;
use crate::features::shared::{
    pagination::PageRequest,
    sorting::{Sort, SortField},
};
use crate::models::{Customer, CustomerInput, Gender};

const CUSTOMER_COLUMNS: &str = "id, name, age, date_of_birth, address, gender";

/// Fields a customer listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerSortField {
    Id,
    Name,
    Age,
    DateOfBirth,
    Address,
    Gender,
}

impl SortField for CustomerSortField {
    const ALL: &'static [Self] = &[
        CustomerSortField::Id,
        CustomerSortField::Name,
        CustomerSortField::Age,
        CustomerSortField::DateOfBirth,
        CustomerSortField::Address,
        CustomerSortField::Gender,
    ];

    fn name(self) -> &'static str {
        match self {
            CustomerSortField::Id => "id",
            CustomerSortField::Name => "name",
            CustomerSortField::Age => "age",
            CustomerSortField::DateOfBirth => "dateOfBirth",
            CustomerSortField::Address => "address",
            CustomerSortField::Gender => "gender",
        }
    }

    fn column(self) -> &'static str {
        match self {
            CustomerSortField::DateOfBirth => "date_of_birth",
            other => other.name(),
        }
    }
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn insert(&self, input: &CustomerInput) -> DbResult<Customer>;

    async fn find_by_id(&self, id: i64) -> DbResult<Option<Customer>>;

    /// One page in the requested order, plus the total row count.
    async fn find_page(
        &self,
        page: &PageRequest,
        sort: &Sort<CustomerSortField>,
    ) -> DbResult<(Vec<Customer>, i64)>;

    /// Overwrite an existing customer with [`Customer::apply`].
    /// `None` when no row has this id.
    async fn update(&self, id: i64, input: CustomerInput) -> DbResult<Option<Customer>>;

    /// `false` when no row has this id.
    async fn delete_by_id(&self, id: i64) -> DbResult<bool>;
}

#[derive(Debug, FromRow)]
struct CustomerRecord {
    id: i64,
    name: String,
    age: i32,
    date_of_birth: NaiveDate,
    address: Option<String>,
    gender: Option<String>,
}

impl TryFrom<CustomerRecord> for Customer {
    type Error = sqlx::Error;

    fn try_from(record: CustomerRecord) -> Result<Self, Self::Error> {
        let gender = record
            .gender
            .as_deref()
            .map(str::parse::<Gender>)
            .transpose()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Customer {
            id: record.id,
            name: record.name,
            age: record.age,
            date_of_birth: record.date_of_birth,
            address: record.address,
            gender,
        })
    }
}

#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn insert(&self, input: &CustomerInput) -> DbResult<Customer> {
        let record = sqlx::query_as::<_, CustomerRecord>(&format!(
            r#"
            INSERT INTO customers (name, age, date_of_birth, address, gender)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(input.age)
        .bind(input.date_of_birth)
        .bind(&input.address)
        .bind(input.gender.map(Gender::as_str))
        .fetch_one(&self.pool)
        .await?;

        Customer::try_from(record)
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        sqlx::query_as::<_, CustomerRecord>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Customer::try_from)
        .transpose()
    }

    async fn find_page(
        &self,
        page: &PageRequest,
        sort: &Sort<CustomerSortField>,
    ) -> DbResult<(Vec<Customer>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        let records = sqlx::query_as::<_, CustomerRecord>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY {} LIMIT $1 OFFSET $2",
            sort.order_by()
        ))
        .bind(page.size())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let customers = records
            .into_iter()
            .map(Customer::try_from)
            .collect::<DbResult<Vec<_>>>()?;

        Ok((customers, total))
    }

    async fn update(&self, id: i64, input: CustomerInput) -> DbResult<Option<Customer>> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, CustomerRecord>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(record) = existing else {
            tx.rollback().await?;
            return Ok(None);
        };

        let mut customer = Customer::try_from(record)?;
        customer.apply(input);

        let record = sqlx::query_as::<_, CustomerRecord>(&format!(
            r#"
            UPDATE customers
            SET name = $2, age = $3, date_of_birth = $4, address = $5, gender = $6
            WHERE id = $1
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(customer.id)
        .bind(&customer.name)
        .bind(customer.age)
        .bind(customer.date_of_birth)
        .bind(&customer.address)
        .bind(customer.gender.map(Gender::as_str))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Customer::try_from(record).map(Some)
    }

    async fn delete_by_id(&self, id: i64) -> DbResult<bool> {
        let deleted: Option<i64> =
            sqlx::query_scalar("DELETE FROM customers WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(deleted.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_columns() {
        assert_eq!(CustomerSortField::DateOfBirth.column(), "date_of_birth");
        assert_eq!(CustomerSortField::Gender.column(), "gender");
        assert_eq!(
            CustomerSortField::allowed(),
            "[id, name, age, dateOfBirth, address, gender]"
        );
    }

    #[test]
    fn test_record_with_unknown_gender_fails_to_decode() {
        let record = CustomerRecord {
            id: 1,
            name: "X".into(),
            age: 1,
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            address: None,
            gender: Some("Q".into()),
        };

        assert!(matches!(Customer::try_from(record), Err(sqlx::Error::Decode(_))));
    }
}
