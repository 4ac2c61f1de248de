//! Recording doubles for the driven ports.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use dashboard::domain::ports::{
    CategoryRepository, CategoryRepositoryError, DailySummarySource, DailySummarySourceError,
    IdentityProvider, IdentityProviderError, ObjectStorage, ObjectStorageError,
    ProfileRepository, ProfileRepositoryError, SessionChanges, TransactionRepository,
    TransactionRepositoryError,
};
use dashboard::domain::{
    Bucket, Category, DailySummaryRow, DateRange, EmailAddress, LoginCredentials, NewTransaction,
    OrganizationId, Principal, StoragePath, Transaction, TransactionId, UploadFile, UserId,
    UserProfile,
};
use mockable::Clock;
use tokio::sync::{Notify, watch};
use url::Url;

use super::recording_double_macro::recording_double;

/// Identity service holding accounts in memory and publishing every change.
pub struct FakeIdentity {
    accounts: Mutex<HashMap<String, Principal>>,
    session: watch::Sender<Option<Principal>>,
    resets: Mutex<Vec<(String, Option<Url>)>>,
    sign_outs: AtomicU64,
}

impl FakeIdentity {
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            accounts: Mutex::new(HashMap::new()),
            session,
            resets: Mutex::new(Vec::new()),
            sign_outs: AtomicU64::new(0),
        }
    }

    /// Create an account and return its principal.
    pub fn register(&self, email: &str) -> Principal {
        let principal = Principal::new(UserId::random(), Some(email.to_owned()));
        self.accounts
            .lock()
            .expect("accounts lock")
            .insert(email.to_owned(), principal.clone());
        principal
    }

    /// Switch the session without going through sign-in.
    pub fn switch_to(&self, principal: Option<Principal>) {
        self.session.send_replace(principal);
    }

    pub fn resets(&self) -> Vec<(String, Option<Url>)> {
        self.resets.lock().expect("resets lock").clone()
    }

    pub fn sign_outs(&self) -> u64 {
        self.sign_outs.load(Ordering::SeqCst)
    }
}

impl Default for FakeIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    fn current_principal(&self) -> Option<Principal> {
        self.session.borrow().clone()
    }

    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Principal, IdentityProviderError> {
        let found = self
            .accounts
            .lock()
            .expect("accounts lock")
            .get(credentials.email().as_str())
            .cloned();
        let principal =
            found.ok_or_else(|| IdentityProviderError::rejected("Invalid login credentials"))?;
        self.session.send_replace(Some(principal.clone()));
        Ok(principal)
    }

    async fn send_password_reset(
        &self,
        email: &EmailAddress,
        redirect_to: Option<Url>,
    ) -> Result<(), IdentityProviderError> {
        self.resets
            .lock()
            .expect("resets lock")
            .push((email.as_str().to_owned(), redirect_to));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), IdentityProviderError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        self.session.send_replace(None);
        Ok(())
    }

    fn subscribe(&self) -> SessionChanges {
        SessionChanges::new(self.session.subscribe())
    }
}

/// Rendezvous letting a test act while a lookup is suspended.
#[derive(Clone, Default)]
pub struct LookupGate {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl LookupGate {
    /// Wait until the held lookup has started.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the held lookup finish.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

/// Profile table in memory, able to hold one lookup mid-flight.
#[derive(Default)]
pub struct StoredProfiles {
    rows: Mutex<Vec<UserProfile>>,
    calls: Mutex<Vec<UserId>>,
    gate: Mutex<Option<LookupGate>>,
}

impl StoredProfiles {
    pub fn insert(&self, profile: UserProfile) {
        self.rows.lock().expect("rows lock").push(profile);
    }

    /// Suspend the next lookup until the returned gate is released.
    pub fn hold_next(&self) -> LookupGate {
        let gate = LookupGate::default();
        *self.gate.lock().expect("gate lock") = Some(gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<UserId> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl ProfileRepository for StoredProfiles {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<UserProfile>, ProfileRepositoryError> {
        self.calls.lock().expect("calls lock").push(*user_id);
        let gate = self.gate.lock().expect("gate lock").take();
        if let Some(held) = gate {
            held.entered.notify_one();
            held.release.notified().await;
        }
        Ok(self
            .rows
            .lock()
            .expect("rows lock")
            .iter()
            .filter(|row| row.user_id == *user_id)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Transaction table in memory.
#[derive(Default)]
pub struct StoredTransactions {
    inserted: Mutex<Vec<NewTransaction>>,
    next_id: AtomicU64,
    failure: Mutex<Option<TransactionRepositoryError>>,
}

impl StoredTransactions {
    pub fn inserted(&self) -> Vec<NewTransaction> {
        self.inserted.lock().expect("inserted lock").clone()
    }

    pub fn fail_with(&self, error: TransactionRepositoryError) {
        *self.failure.lock().expect("failure lock") = Some(error);
    }

    fn stored(&self, row: &NewTransaction) -> Transaction {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Transaction {
            id: TransactionId::new(id.to_string()),
            occurred_at: row.occurred_at,
            kind: row.kind,
            amount: row.amount.value(),
            category_id: row.category_id,
            description: row.description.clone(),
            payment_method: row.payment_method.map(|method| method.label().to_owned()),
            organization_id: row.organization_id,
            user_id: row.user_id,
            created_by: Some(row.created_by),
        }
    }
}

#[async_trait]
impl TransactionRepository for StoredTransactions {
    async fn insert(
        &self,
        transaction: &NewTransaction,
    ) -> Result<Transaction, TransactionRepositoryError> {
        if let Some(error) = self.failure.lock().expect("failure lock").clone() {
            return Err(error);
        }
        self.inserted
            .lock()
            .expect("inserted lock")
            .push(transaction.clone());
        Ok(self.stored(transaction))
    }

    async fn list_recent(
        &self,
        organization_id: &OrganizationId,
        limit: usize,
    ) -> Result<Vec<Transaction>, TransactionRepositoryError> {
        let inserted = self.inserted();
        let mut rows: Vec<Transaction> = inserted
            .iter()
            .filter(|row| row.organization_id == *organization_id)
            .map(|row| self.stored(row))
            .collect();
        rows.sort_by(|left, right| right.occurred_at.cmp(&left.occurred_at));
        rows.truncate(limit);
        Ok(rows)
    }
}

recording_double! {
    /// Configured outcome for [`RecordingSummarySource`].
    pub enum SummaryResponse {
        Ok(Vec<DailySummaryRow>),
        Err(DailySummarySourceError),
    }

    /// Daily summary view returning fixed rows.
    pub struct RecordingSummarySource {
        calls: (OrganizationId, DateRange),
        trait: DailySummarySource,
        method: fetch_range(&self, organization_id: &OrganizationId, range: &DateRange)
            -> Result<Vec<DailySummaryRow>, DailySummarySourceError>,
        record: (*organization_id, *range),
    }
}

recording_double! {
    /// Configured outcome for [`RecordingCategories`].
    pub enum CategoriesResponse {
        Ok(Vec<Category>),
        Err(CategoryRepositoryError),
    }

    /// Category table returning a fixed catalog.
    pub struct RecordingCategories {
        calls: OrganizationId,
        trait: CategoryRepository,
        method: list(&self, organization_id: &OrganizationId)
            -> Result<Vec<Category>, CategoryRepositoryError>,
        record: *organization_id,
    }
}

recording_double! {
    /// Configured outcome for [`RecordingStorage`].
    pub enum StorageResponse {
        Ok(()),
        Err(ObjectStorageError),
    }

    /// Object storage recording every written key.
    pub struct RecordingStorage {
        calls: (Bucket, StoragePath, String),
        trait: ObjectStorage,
        method: upload(&self, bucket: Bucket, path: &StoragePath, file: &UploadFile)
            -> Result<(), ObjectStorageError>,
        record: (bucket, path.clone(), file.name().to_owned()),
    }
}

/// Clock pinned to 2025-03-14 21:30 local time on a fixed UTC instant.
pub struct PinnedClock;

impl PinnedClock {
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
    }
}

impl Clock for PinnedClock {
    fn local(&self) -> DateTime<Local> {
        let evening = Self::today().and_hms_opt(21, 30, 0).expect("valid time");
        Local
            .from_local_datetime(&evening)
            .earliest()
            .expect("time exists locally")
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 0, 30, 0)
            .single()
            .expect("valid instant")
    }
}
