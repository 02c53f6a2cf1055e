//! Mock ports shared by the billing handler tests.

use async_trait::async_trait;
use secrecy::SecretString;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::adapters::clock::FixedClock;
use crate::domain::billing::{Payment, PaymentStatus, Product, Tenant};
use crate::domain::foundation::{
    Amount, DomainError, ErrorCode, PaymentId, ProductId, TenantId, Timestamp, UserId,
};
use crate::ports::{PaymentRepository, ProductReader, TenantReader};

pub const SECRET: &str = "s3cret";

pub fn tenant_id() -> TenantId {
    TenantId::new("T1").unwrap()
}

pub fn product_id() -> ProductId {
    ProductId::new("P1").unwrap()
}

pub fn user_id() -> UserId {
    UserId::new("U1").unwrap()
}

pub fn tenant() -> Tenant {
    Tenant::new(tenant_id(), SecretString::new(SECRET.to_string()), "410011234567")
}

pub fn product(id: &str, created_secs: i64) -> Product {
    Product {
        id: ProductId::new(id).unwrap(),
        tenant_id: tenant_id(),
        name: format!("Product {}", id),
        description: "Annual plan".to_string(),
        price: Amount::from_decimal(130.43).unwrap(),
        enabled: true,
        created_at: Timestamp::from_unix_secs(created_secs),
    }
}

pub fn payment(id: &str, status: PaymentStatus) -> Payment {
    let mut payment = Payment::create(
        PaymentId::new(id).unwrap(),
        &product("P1", 0),
        user_id(),
        Timestamp::from_unix_secs(1_000),
    );
    payment.status = status;
    payment
}

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(Timestamp::from_unix_secs(2_000)))
}

fn simulated(what: &str) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Simulated {} failure", what))
}

// ════════════════════════════════════════════════════════════════════════════
// Tenants and products
// ════════════════════════════════════════════════════════════════════════════

pub struct MockTenantReader {
    tenants: Vec<Tenant>,
    fail: bool,
}

impl MockTenantReader {
    pub fn with(tenants: Vec<Tenant>) -> Self {
        Self { tenants, fail: false }
    }

    pub fn failing() -> Self {
        Self {
            tenants: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl TenantReader for MockTenantReader {
    async fn find_by_id(&self, id: &TenantId) -> Result<Option<Tenant>, DomainError> {
        if self.fail {
            return Err(simulated("tenant lookup"));
        }
        Ok(self.tenants.iter().find(|t| &t.id == id).cloned())
    }
}

pub struct MockProductReader {
    products: Vec<Product>,
    last_limit: Mutex<Option<usize>>,
}

impl MockProductReader {
    pub fn with(products: Vec<Product>) -> Self {
        Self {
            products,
            last_limit: Mutex::new(None),
        }
    }

    pub fn last_limit(&self) -> Option<usize> {
        *self.last_limit.lock().unwrap()
    }
}

#[async_trait]
impl ProductReader for MockProductReader {
    async fn find_for_tenant(
        &self,
        tenant_id: &TenantId,
        product_id: &ProductId,
    ) -> Result<Option<Product>, DomainError> {
        Ok(self
            .products
            .iter()
            .find(|p| &p.id == product_id && p.is_sold_by(tenant_id))
            .cloned())
    }

    async fn list_enabled(
        &self,
        tenant_id: &TenantId,
        limit: usize,
    ) -> Result<Vec<Product>, DomainError> {
        *self.last_limit.lock().unwrap() = Some(limit);
        let mut products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.enabled && p.is_sold_by(tenant_id))
            .cloned()
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        products.truncate(limit);
        Ok(products)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Payments
// ════════════════════════════════════════════════════════════════════════════

/// In-memory payments with switchable failures.
///
/// `races_to_lose` makes the next N status writes report a lost race, and
/// `interloper` is the status another writer "stored" in between.
pub struct MockPaymentRepository {
    payments: Mutex<HashMap<PaymentId, Payment>>,
    fail_create: bool,
    fail_update: bool,
    races_to_lose: Mutex<u32>,
    interloper: Option<PaymentStatus>,
    update_calls: Mutex<u32>,
}

impl MockPaymentRepository {
    pub fn new() -> Self {
        Self {
            payments: Mutex::new(HashMap::new()),
            fail_create: false,
            fail_update: false,
            races_to_lose: Mutex::new(0),
            interloper: None,
            update_calls: Mutex::new(0),
        }
    }

    pub fn with(payment: Payment) -> Self {
        let repo = Self::new();
        repo.payments
            .lock()
            .unwrap()
            .insert(payment.id.clone(), payment);
        repo
    }

    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::new()
        }
    }

    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    pub fn losing_races(self, count: u32, interloper: Option<PaymentStatus>) -> Self {
        *self.races_to_lose.lock().unwrap() = count;
        Self { interloper, ..self }
    }

    pub fn stored(&self, id: &PaymentId) -> Option<Payment> {
        self.payments.lock().unwrap().get(id).cloned()
    }

    pub fn all(&self) -> Vec<Payment> {
        self.payments.lock().unwrap().values().cloned().collect()
    }

    pub fn update_calls(&self) -> u32 {
        *self.update_calls.lock().unwrap()
    }
}

#[async_trait]
impl PaymentRepository for MockPaymentRepository {
    async fn create(&self, payment: &Payment) -> Result<(), DomainError> {
        if self.fail_create {
            return Err(simulated("create"));
        }
        self.payments
            .lock()
            .unwrap()
            .insert(payment.id.clone(), payment.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        Ok(self.payments.lock().unwrap().get(id).cloned())
    }

    async fn update_status(
        &self,
        id: &PaymentId,
        expected: PaymentStatus,
        new: PaymentStatus,
        updated_at: Timestamp,
    ) -> Result<bool, DomainError> {
        *self.update_calls.lock().unwrap() += 1;
        if self.fail_update {
            return Err(simulated("update"));
        }

        let mut payments = self.payments.lock().unwrap();
        let Some(stored) = payments.get_mut(id) else {
            return Ok(false);
        };

        let mut races = self.races_to_lose.lock().unwrap();
        if *races > 0 {
            *races -= 1;
            if let Some(status) = self.interloper {
                stored.status = status;
            }
            return Ok(false);
        }

        if stored.status != expected {
            return Ok(false);
        }
        stored.status = new;
        stored.updated_at = updated_at;
        Ok(true)
    }
}
