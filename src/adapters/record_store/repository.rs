//! Typed repositories over the generic record store.
//!
//! Maps the billing and account entities to and from the dynamic records in
//! the `applications`, `products`, `payments` and `users` collections. Any
//! record that does not carry the fields an entity needs surfaces as a
//! `DatabaseError` rather than a half-filled entity.

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::Value;

use crate::domain::account::{EmailAddress, User};
use crate::domain::billing::{Payment, PaymentStatus, Product, Tenant};
use crate::domain::foundation::{
    Amount, DomainError, ErrorCode, PaymentId, ProductId, TenantId, Timestamp, UserId,
};
use crate::ports::{
    Filter, PaymentRepository, ProductReader, Record, RecordStore, Sort, TenantReader,
    UserRepository,
};

pub const APPLICATIONS: &str = "applications";
pub const PRODUCTS: &str = "products";
pub const PAYMENTS: &str = "payments";
pub const USERS: &str = "users";

/// Implements every typed storage port on top of one `RecordStore`.
pub struct RecordStoreRepository<S> {
    store: S,
}

impl<S: RecordStore> RecordStoreRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

fn mapping_error(record: &Record, what: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, what)
        .with_detail("collection", record.collection())
        .with_detail("id", record.id())
}

fn required_str<'a>(record: &'a Record, field: &str) -> Result<&'a str, DomainError> {
    record
        .get_string(field)
        .ok_or_else(|| mapping_error(record, format!("Missing or non-text field '{}'", field)))
}

fn required_amount(record: &Record, field: &str) -> Result<Amount, DomainError> {
    let value = record
        .get_float(field)
        .ok_or_else(|| mapping_error(record, format!("Missing or non-numeric field '{}'", field)))?;
    Amount::from_decimal(value).map_err(|e| mapping_error(record, e.to_string()))
}

fn timestamp(record: &Record, field: &str) -> Result<Timestamp, DomainError> {
    let text = required_str(record, field)?;
    Timestamp::parse_rfc3339(text)
        .ok_or_else(|| mapping_error(record, format!("Field '{}' is not a timestamp", field)))
}

fn typed_id<T, E: std::fmt::Display>(
    record: &Record,
    value: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, DomainError> {
    parse(value).map_err(|e| mapping_error(record, e.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════
// Entity <-> record mapping
// ════════════════════════════════════════════════════════════════════════════

fn tenant_from_record(record: &Record) -> Result<Tenant, DomainError> {
    Ok(Tenant {
        id: typed_id(record, record.id(), |s| TenantId::new(s))?,
        secret: SecretString::new(required_str(record, "secret")?.to_string()),
        wallet: required_str(record, "wallet")?.to_string(),
    })
}

fn product_from_record(record: &Record) -> Result<Product, DomainError> {
    Ok(Product {
        id: typed_id(record, record.id(), |s| ProductId::new(s))?,
        tenant_id: typed_id(record, required_str(record, "application")?, |s| TenantId::new(s))?,
        name: required_str(record, "name")?.to_string(),
        description: record.get_string("description").unwrap_or_default().to_string(),
        price: required_amount(record, "price")?,
        enabled: record.get_bool("enabled").unwrap_or(false),
        created_at: timestamp(record, "created")?,
    })
}

fn payment_from_record(record: &Record) -> Result<Payment, DomainError> {
    let status = required_str(record, "status")?;
    Ok(Payment {
        id: typed_id(record, record.id(), |s| PaymentId::new(s))?,
        tenant_id: typed_id(record, required_str(record, "app")?, |s| TenantId::new(s))?,
        product_id: typed_id(record, required_str(record, "product")?, |s| ProductId::new(s))?,
        user_id: typed_id(record, required_str(record, "user")?, |s| UserId::new(s))?,
        name: required_str(record, "name")?.to_string(),
        description: record.get_string("description").unwrap_or_default().to_string(),
        amount: required_amount(record, "amount")?,
        status: typed_id(record, status, str::parse::<PaymentStatus>)?,
        created_at: timestamp(record, "created")?,
        updated_at: timestamp(record, "updated")?,
    })
}

fn payment_to_record(payment: &Payment) -> Record {
    let mut record = Record::new(PAYMENTS, payment.id.as_str());
    record.set("app", payment.tenant_id.as_str());
    record.set("product", payment.product_id.as_str());
    record.set("user", payment.user_id.as_str());
    record.set("name", payment.name.as_str());
    record.set("description", payment.description.as_str());
    record.set("amount", payment.amount.as_decimal());
    record.set("status", payment.status.as_str());
    record.set("created", payment.created_at.to_rfc3339());
    record.set("updated", payment.updated_at.to_rfc3339());
    record
}

fn user_from_record(record: &Record) -> Result<User, DomainError> {
    Ok(User {
        id: typed_id(record, record.id(), |s| UserId::new(s))?,
        email: typed_id(record, required_str(record, "email")?, EmailAddress::parse)?,
        username: required_str(record, "username")?.to_string(),
        password_hash: record
            .get_string("password_hash")
            .filter(|hash| !hash.is_empty())
            .map(str::to_string),
        verified: record.get_bool("verified").unwrap_or(false),
        created_at: timestamp(record, "created")?,
        updated_at: timestamp(record, "updated")?,
    })
}

fn user_to_record(user: &User) -> Record {
    let mut record = Record::new(USERS, user.id.as_str());
    record.set("email", user.email.as_str());
    record.set("username", user.username.as_str());
    record.set(
        "password_hash",
        user.password_hash.clone().map_or(Value::Null, Value::from),
    );
    record.set("verified", user.verified);
    record.set("created", user.created_at.to_rfc3339());
    record.set("updated", user.updated_at.to_rfc3339());
    record
}

// ════════════════════════════════════════════════════════════════════════════
// Port implementations
// ════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl<S: RecordStore> TenantReader for RecordStoreRepository<S> {
    async fn find_by_id(&self, id: &TenantId) -> Result<Option<Tenant>, DomainError> {
        self.store
            .find_by_id(APPLICATIONS, id.as_str())
            .await?
            .as_ref()
            .map(tenant_from_record)
            .transpose()
    }
}

#[async_trait]
impl<S: RecordStore> ProductReader for RecordStoreRepository<S> {
    async fn find_for_tenant(
        &self,
        tenant_id: &TenantId,
        product_id: &ProductId,
    ) -> Result<Option<Product>, DomainError> {
        let product = self
            .store
            .find_by_id(PRODUCTS, product_id.as_str())
            .await?
            .as_ref()
            .map(product_from_record)
            .transpose()?;

        Ok(product.filter(|p| p.is_sold_by(tenant_id)))
    }

    async fn list_enabled(
        &self,
        tenant_id: &TenantId,
        limit: usize,
    ) -> Result<Vec<Product>, DomainError> {
        let filter = Filter::new()
            .eq("application", tenant_id.as_str())
            .eq("enabled", true);

        self.store
            .find_by_filter(PRODUCTS, &filter, Some(&Sort::descending("created")), limit)
            .await?
            .iter()
            .map(product_from_record)
            .collect()
    }
}

#[async_trait]
impl<S: RecordStore> PaymentRepository for RecordStoreRepository<S> {
    async fn create(&self, payment: &Payment) -> Result<(), DomainError> {
        self.store.create(&payment_to_record(payment)).await
    }

    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        self.store
            .find_by_id(PAYMENTS, id.as_str())
            .await?
            .as_ref()
            .map(payment_from_record)
            .transpose()
    }

    async fn update_status(
        &self,
        id: &PaymentId,
        expected: PaymentStatus,
        new: PaymentStatus,
        updated_at: Timestamp,
    ) -> Result<bool, DomainError> {
        let Some(mut record) = self.store.find_by_id(PAYMENTS, id.as_str()).await? else {
            return Ok(false);
        };
        record.set("status", new.as_str());
        record.set("updated", updated_at.to_rfc3339());

        self.store
            .save_if(&record, "status", &Value::from(expected.as_str()))
            .await
    }
}

#[async_trait]
impl<S: RecordStore> UserRepository for RecordStoreRepository<S> {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, DomainError> {
        self.store
            .find_first_by_filter(USERS, &Filter::new().eq("email", email.as_str()))
            .await?
            .as_ref()
            .map(user_from_record)
            .transpose()
    }

    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.store.save(&user_to_record(user)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::record_store::InMemoryRecordStore;
    use secrecy::ExposeSecret;

    fn tenant_record(id: &str) -> Record {
        let mut record = Record::new(APPLICATIONS, id);
        record.set("secret", "s3cret");
        record.set("wallet", "410011234567");
        record
    }

    fn product_record(id: &str, tenant: &str, created: &str, enabled: bool) -> Record {
        let mut record = Record::new(PRODUCTS, id);
        record.set("application", tenant);
        record.set("name", format!("Product {}", id));
        record.set("description", "Annual plan");
        record.set("price", 130.43);
        record.set("enabled", enabled);
        record.set("created", created);
        record
    }

    fn repo(records: Vec<Record>) -> RecordStoreRepository<InMemoryRecordStore> {
        RecordStoreRepository::new(InMemoryRecordStore::with_records(records))
    }

    fn payment() -> Payment {
        let product = product_from_record(&product_record(
            "P1",
            "T1",
            "2024-01-01T00:00:00Z",
            true,
        ))
        .unwrap();
        Payment::create(
            PaymentId::new("pay1").unwrap(),
            &product,
            UserId::new("U1").unwrap(),
            Timestamp::from_unix_secs(1_700_000_000),
        )
    }

    #[tokio::test]
    async fn tenant_maps_secret_and_wallet() {
        let repo = repo(vec![tenant_record("T1")]);

        let tenant = TenantReader::find_by_id(&repo, &TenantId::new("T1").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(tenant.secret.expose_secret(), "s3cret");
        assert_eq!(tenant.wallet, "410011234567");
    }

    #[tokio::test]
    async fn tenant_without_secret_is_mapping_error() {
        let mut broken = Record::new(APPLICATIONS, "T1");
        broken.set("wallet", "w");
        let repo = repo(vec![broken]);

        let err = TenantReader::find_by_id(&repo, &TenantId::new("T1").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.contains("secret"));
    }

    #[tokio::test]
    async fn find_for_tenant_hides_other_tenants_products() {
        let repo = repo(vec![product_record("P1", "T2", "2024-01-01T00:00:00Z", true)]);

        let found = repo
            .find_for_tenant(&TenantId::new("T1").unwrap(), &ProductId::new("P1").unwrap())
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn list_enabled_returns_newest_first() {
        let repo = repo(vec![
            product_record("old", "T1", "2024-01-01T00:00:00.000000Z", true),
            product_record("new", "T1", "2024-05-01T00:00:00.000000Z", true),
            product_record("off", "T1", "2024-06-01T00:00:00.000000Z", false),
            product_record("alien", "T2", "2024-07-01T00:00:00.000000Z", true),
        ]);

        let products = repo
            .list_enabled(&TenantId::new("T1").unwrap(), 100)
            .await
            .unwrap();

        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(products[0].price.to_string(), "130.43");
    }

    #[tokio::test]
    async fn payment_roundtrips_through_record() {
        let repo = repo(vec![]);
        let payment = payment();

        PaymentRepository::create(&repo, &payment).await.unwrap();
        let loaded = PaymentRepository::find_by_id(&repo, &payment.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(loaded, payment);
        let stored = repo.store().find_by_id(PAYMENTS, "pay1").await.unwrap().unwrap();
        assert_eq!(stored.get_string("status"), Some("created"));
        assert_eq!(stored.get_float("amount"), Some(130.43));
    }

    #[tokio::test]
    async fn update_status_is_compare_and_set() {
        let repo = repo(vec![]);
        let payment = payment();
        PaymentRepository::create(&repo, &payment).await.unwrap();
        let at = Timestamp::from_unix_secs(1_700_000_100);

        let stale = repo
            .update_status(&payment.id, PaymentStatus::Paid, PaymentStatus::Confirm, at)
            .await
            .unwrap();
        let fresh = repo
            .update_status(&payment.id, PaymentStatus::Created, PaymentStatus::Paid, at)
            .await
            .unwrap();

        assert!(!stale);
        assert!(fresh);
        let loaded = PaymentRepository::find_by_id(&repo, &payment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.status, PaymentStatus::Paid);
        assert_eq!(loaded.updated_at, at);
        assert_eq!(loaded.amount, payment.amount);
    }

    #[tokio::test]
    async fn update_status_of_missing_payment_is_false() {
        let repo = repo(vec![]);
        let updated = repo
            .update_status(
                &PaymentId::new("ghost").unwrap(),
                PaymentStatus::Created,
                PaymentStatus::Paid,
                Timestamp::from_unix_secs(1),
            )
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn unknown_status_is_mapping_error() {
        let mut record = payment_to_record(&payment());
        record.set("status", "refunded");
        let repo = repo(vec![record]);

        let err = PaymentRepository::find_by_id(&repo, &PaymentId::new("pay1").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[tokio::test]
    async fn user_save_then_find_by_email() {
        let repo = repo(vec![]);
        let email = EmailAddress::parse("buyer@example.com").unwrap();
        let mut user = User::register(
            UserId::new("U1").unwrap(),
            email.clone(),
            Timestamp::from_unix_secs(1_700_000_000),
        );

        UserRepository::save(&repo, &user).await.unwrap();
        user.set_code_hash("$argon2id$v=19$stub".into(), Timestamp::from_unix_secs(1_700_000_001));
        UserRepository::save(&repo, &user).await.unwrap();

        let loaded = repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(loaded, user);
        assert_eq!(repo.store().count(USERS).await, 1);
    }

    #[tokio::test]
    async fn unknown_email_is_none() {
        let repo = repo(vec![]);
        let email = EmailAddress::parse("nobody@example.com").unwrap();
        assert!(repo.find_by_email(&email).await.unwrap().is_none());
    }
}
