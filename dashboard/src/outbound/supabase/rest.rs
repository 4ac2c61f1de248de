//! Table adapters for the platform's PostgREST data API.
//!
//! Every query is scoped by equality filters; row-level security on the
//! server remains the real authorization boundary.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderValue};
use tracing::debug;

use super::dto::{
    CategoryRowDto, DailySummaryRowDto, NewTransactionDto, ProfileRowDto, TransactionRowDto,
};
use super::http::{PlatformFailure, SupabaseClient, endpoint_from, send_json};
use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, DailySummarySource, DailySummarySourceError,
    ProfileRepository, ProfileRepositoryError, TransactionRepository, TransactionRepositoryError,
};
use crate::domain::{
    Category, DailySummaryRow, DateRange, NewTransaction, OrganizationId, Transaction, UserId,
    UserProfile,
};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// PostgREST-backed implementation of the table ports.
pub struct PostgrestStore {
    client: Arc<SupabaseClient>,
}

impl PostgrestStore {
    /// Create an adapter sharing `client`'s session.
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

/// Builder for one table URL and its filter query.
struct TableQuery {
    url: Url,
}

impl TableQuery {
    fn new(base_url: &Url, table: &str) -> Result<Self, PlatformFailure> {
        Ok(Self {
            url: endpoint_from(base_url, &["rest", "v1", table])?,
        })
    }

    fn param(mut self, key: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(key, value);
        self
    }

    fn select(self, columns: &str) -> Self {
        self.param("select", columns)
    }

    fn eq(self, column: &str, value: impl std::fmt::Display) -> Self {
        self.param(column, &format!("eq.{value}"))
    }

    fn gte(self, column: &str, value: impl std::fmt::Display) -> Self {
        self.param(column, &format!("gte.{value}"))
    }

    fn lte(self, column: &str, value: impl std::fmt::Display) -> Self {
        self.param(column, &format!("lte.{value}"))
    }

    fn order(self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.param("order", &format!("{column}.{direction}"))
    }

    fn limit(self, limit: usize) -> Self {
        self.param("limit", &limit.to_string())
    }

    fn build(self) -> Url {
        self.url
    }
}

fn profile_query(base_url: &Url, user_id: &UserId, limit: usize) -> Result<Url, PlatformFailure> {
    Ok(TableQuery::new(base_url, "user_profiles")?
        .select("user_id,organization_id,role,owner_id")
        .eq("user_id", user_id)
        .limit(limit)
        .build())
}

fn recent_transactions_query(
    base_url: &Url,
    organization_id: &OrganizationId,
    limit: usize,
) -> Result<Url, PlatformFailure> {
    Ok(TableQuery::new(base_url, "transactions")?
        .select("*")
        .eq("organization_id", organization_id)
        .order("occurred_at", false)
        .limit(limit)
        .build())
}

fn insert_transaction_query(base_url: &Url) -> Result<Url, PlatformFailure> {
    Ok(TableQuery::new(base_url, "transactions")?.select("*").build())
}

fn categories_query(
    base_url: &Url,
    organization_id: &OrganizationId,
) -> Result<Url, PlatformFailure> {
    Ok(TableQuery::new(base_url, "categories")?
        .select("id,name,kind")
        .eq("organization_id", organization_id)
        .order("name", true)
        .build())
}

fn daily_summary_query(
    base_url: &Url,
    organization_id: &OrganizationId,
    range: &DateRange,
) -> Result<Url, PlatformFailure> {
    Ok(TableQuery::new(base_url, "daily_summary")?
        .select("day,total_incomes,total_expenses,net_result")
        .eq("organization_id", organization_id)
        .gte("day", range.start())
        .lte("day", range.end())
        .order("day", true)
        .build())
}

macro_rules! map_failure_into {
    ($name:ident, $error:ident) => {
        fn $name(failure: PlatformFailure) -> $error {
            match failure {
                PlatformFailure::Transport(message) => $error::transport(message),
                PlatformFailure::Status { message, .. } => $error::rejected(message),
                PlatformFailure::Decode(message) => $error::decode(message),
            }
        }
    };
}

map_failure_into!(map_profile_failure, ProfileRepositoryError);
map_failure_into!(map_transaction_failure, TransactionRepositoryError);
map_failure_into!(map_category_failure, CategoryRepositoryError);
map_failure_into!(map_summary_failure, DailySummarySourceError);

impl PostgrestStore {
    async fn fetch_rows<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<Vec<T>, PlatformFailure> {
        debug!(path = url.path(), "querying table");
        let request = self.client.authorized(self.client.get(url)).await?;
        send_json(request).await
    }
}

#[async_trait]
impl ProfileRepository for PostgrestStore {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<UserProfile>, ProfileRepositoryError> {
        let url = profile_query(self.client.base_url(), user_id, limit)
            .map_err(map_profile_failure)?;
        let rows: Vec<ProfileRowDto> = self.fetch_rows(url).await.map_err(map_profile_failure)?;
        rows.into_iter()
            .map(ProfileRowDto::into_domain)
            .collect::<Result<_, _>>()
            .map_err(ProfileRepositoryError::decode)
    }
}

#[async_trait]
impl TransactionRepository for PostgrestStore {
    async fn insert(
        &self,
        transaction: &NewTransaction,
    ) -> Result<Transaction, TransactionRepositoryError> {
        let url = insert_transaction_query(self.client.base_url())
            .map_err(map_transaction_failure)?;
        let request = self
            .client
            .authorized(self.client.post(url))
            .await
            .map_err(map_transaction_failure)?
            .header("Prefer", "return=representation")
            .header(ACCEPT, HeaderValue::from_static(SINGLE_OBJECT))
            .json(&NewTransactionDto::from(transaction));
        let row: TransactionRowDto = send_json(request)
            .await
            .map_err(map_transaction_failure)?;
        row.into_domain().map_err(TransactionRepositoryError::decode)
    }

    async fn list_recent(
        &self,
        organization_id: &OrganizationId,
        limit: usize,
    ) -> Result<Vec<Transaction>, TransactionRepositoryError> {
        let url = recent_transactions_query(self.client.base_url(), organization_id, limit)
            .map_err(map_transaction_failure)?;
        let rows: Vec<TransactionRowDto> =
            self.fetch_rows(url).await.map_err(map_transaction_failure)?;
        rows.into_iter()
            .map(TransactionRowDto::into_domain)
            .collect::<Result<_, _>>()
            .map_err(TransactionRepositoryError::decode)
    }
}

#[async_trait]
impl CategoryRepository for PostgrestStore {
    async fn list(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Category>, CategoryRepositoryError> {
        let url = categories_query(self.client.base_url(), organization_id)
            .map_err(map_category_failure)?;
        let rows: Vec<CategoryRowDto> = self.fetch_rows(url).await.map_err(map_category_failure)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }
}

#[async_trait]
impl DailySummarySource for PostgrestStore {
    async fn fetch_range(
        &self,
        organization_id: &OrganizationId,
        range: &DateRange,
    ) -> Result<Vec<DailySummaryRow>, DailySummarySourceError> {
        let url = daily_summary_query(self.client.base_url(), organization_id, range)
            .map_err(map_summary_failure)?;
        let rows: Vec<DailySummaryRowDto> =
            self.fetch_rows(url).await.map_err(map_summary_failure)?;
        rows.into_iter()
            .map(DailySummaryRowDto::into_domain)
            .collect::<Result<_, _>>()
            .map_err(DailySummarySourceError::decode)
    }
}
