//! In-memory repository doubles for handler and middleware tests
//!
//! Every repository call is counted so tests can assert that a request was
//! refused before storage was touched.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crm_server::features::shared::test_helpers::*;
//!
//! let customers = InMemoryCustomerRepository::default();
//! let state = test_state(customers.clone(), InMemoryAuditRepository::default());
//! // ... drive the router ...
//! assert_eq!(customers.calls(), 0);
//! ```

use async_trait::async_trait;
use chrono::Utc;
use std::{
    cmp::Ordering,
    collections::BTreeMap,
    sync::{
        atomic::{AtomicUsize, Ordering as AtomicOrdering},
        Arc, Mutex,
    },
};

use super::pagination::PageRequest;
use super::sorting::{Sort, SortDirection};
use crate::audit::{AuditEntry, NewAuditEntry};
use crate::db::{AuditRepository, AuditSortField, CustomerRepository, CustomerSortField, DbResult};
use crate::features::FeatureState;
use crate::models::{Customer, CustomerInput};

pub fn test_state(
    customers: impl CustomerRepository + 'static,
    audit_entries: impl AuditRepository + 'static,
) -> FeatureState {
    FeatureState {
        customers: Arc::new(customers),
        audit_entries: Arc::new(audit_entries),
    }
}

fn page_of<T: Clone>(rows: &[T], page: &PageRequest) -> Vec<T> {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let size = usize::try_from(page.size()).unwrap_or(usize::MAX);
    rows.iter().skip(offset).take(size).cloned().collect()
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[derive(Default)]
struct CustomerTable {
    last_id: i64,
    rows: BTreeMap<i64, Customer>,
}

/// Customer store backed by a `BTreeMap`. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryCustomerRepository {
    table: Arc<Mutex<CustomerTable>>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryCustomerRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.table.lock().unwrap().rows.len()
    }

    fn touch(&self) {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn insert(&self, input: &CustomerInput) -> DbResult<Customer> {
        self.touch();
        let mut table = self.table.lock().unwrap();
        table.last_id += 1;
        let customer = Customer::from_input(table.last_id, input.clone());
        table.rows.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        self.touch();
        Ok(self.table.lock().unwrap().rows.get(&id).cloned())
    }

    async fn find_page(
        &self,
        page: &PageRequest,
        sort: &Sort<CustomerSortField>,
    ) -> DbResult<(Vec<Customer>, i64)> {
        self.touch();
        let mut rows: Vec<Customer> = self.table.lock().unwrap().rows.values().cloned().collect();
        rows.sort_by(|a, b| {
            let ordering = match sort.field {
                CustomerSortField::Id => a.id.cmp(&b.id),
                CustomerSortField::Name => a.name.cmp(&b.name),
                CustomerSortField::Age => a.age.cmp(&b.age),
                CustomerSortField::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
                CustomerSortField::Address => a.address.cmp(&b.address),
                CustomerSortField::Gender => {
                    a.gender.map(|g| g.as_str()).cmp(&b.gender.map(|g| g.as_str()))
                },
            };
            directed(ordering, sort.direction).then(a.id.cmp(&b.id))
        });
        Ok((page_of(&rows, page), rows.len() as i64))
    }

    async fn update(&self, id: i64, input: CustomerInput) -> DbResult<Option<Customer>> {
        self.touch();
        let mut table = self.table.lock().unwrap();
        Ok(table.rows.get_mut(&id).map(|customer| {
            customer.apply(input);
            customer.clone()
        }))
    }

    async fn delete_by_id(&self, id: i64) -> DbResult<bool> {
        self.touch();
        Ok(self.table.lock().unwrap().rows.remove(&id).is_some())
    }
}

/// Audit store backed by a `Vec`. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryAuditRepository {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryAuditRepository {
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    /// Store an entry with an explicit timestamp offset, for ordering tests.
    pub fn seed(&self, entry: NewAuditEntry, seconds_ago: i64) -> AuditEntry {
        let mut entries = self.entries.lock().unwrap();
        let stored = AuditEntry {
            id: entries.len() as i64 + 1,
            action: entry.action.as_str().to_string(),
            customer_id: entry.customer_id,
            request: entry.request,
            status: entry.status.as_str().to_string(),
            creation_datetime: Utc::now() - chrono::Duration::seconds(seconds_ago),
        };
        entries.push(stored.clone());
        stored
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn insert(&self, entry: &NewAuditEntry) -> DbResult<AuditEntry> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        let mut entries = self.entries.lock().unwrap();
        let stored = AuditEntry {
            id: entries.len() as i64 + 1,
            action: entry.action.as_str().to_string(),
            customer_id: entry.customer_id,
            request: entry.request.clone(),
            status: entry.status.as_str().to_string(),
            creation_datetime: entry.creation_datetime,
        };
        entries.push(stored.clone());
        Ok(stored)
    }

    async fn find_page(
        &self,
        page: &PageRequest,
        sort: &Sort<AuditSortField>,
    ) -> DbResult<(Vec<AuditEntry>, i64)> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        let mut rows = self.entries();
        rows.sort_by(|a, b| {
            let ordering = match sort.field {
                AuditSortField::Id => a.id.cmp(&b.id),
                AuditSortField::Action => a.action.cmp(&b.action),
                AuditSortField::CustomerId => a.customer_id.cmp(&b.customer_id),
                AuditSortField::Status => a.status.cmp(&b.status),
                AuditSortField::CreationDatetime => a.creation_datetime.cmp(&b.creation_datetime),
            };
            directed(ordering, sort.direction).then(a.id.cmp(&b.id))
        });
        Ok((page_of(&rows, page), rows.len() as i64))
    }
}

/// Customer store whose every call fails like an exhausted pool.
pub struct FailingCustomerRepository;

#[async_trait]
impl CustomerRepository for FailingCustomerRepository {
    async fn insert(&self, _input: &CustomerInput) -> DbResult<Customer> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn find_by_id(&self, _id: i64) -> DbResult<Option<Customer>> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn find_page(
        &self,
        _page: &PageRequest,
        _sort: &Sort<CustomerSortField>,
    ) -> DbResult<(Vec<Customer>, i64)> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn update(&self, _id: i64, _input: CustomerInput) -> DbResult<Option<Customer>> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn delete_by_id(&self, _id: i64) -> DbResult<bool> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

/// Audit store that cannot write.
pub struct FailingAuditRepository;

#[async_trait]
impl AuditRepository for FailingAuditRepository {
    async fn insert(&self, _entry: &NewAuditEntry) -> DbResult<AuditEntry> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn find_page(
        &self,
        _page: &PageRequest,
        _sort: &Sort<AuditSortField>,
    ) -> DbResult<(Vec<AuditEntry>, i64)> {
        Err(sqlx::Error::PoolTimedOut)
    }
}
