//! Wire DTOs for the auth, data and storage APIs.
//!
//! Responses decode into these shapes first and are then mapped into domain
//! records in one pass, so decode failures carry a precise message.

use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    Category, CategoryId, DailySummaryRow, NewTransaction, OrganizationId, Principal, Role,
    Transaction, TransactionId, TransactionKind, UserId, UserProfile,
};

use super::session::StoredSession;

/// Session issued by the password and refresh-token grants.
#[derive(Debug, Deserialize)]
pub(super) struct TokenResponseDto {
    pub(super) access_token: String,
    pub(super) refresh_token: String,
    #[serde(default)]
    pub(super) expires_in: Option<i64>,
    pub(super) user: AuthUserDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthUserDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) email: Option<String>,
}

impl TokenResponseDto {
    pub(super) fn into_session(self, now: DateTime<Utc>) -> Result<StoredSession, String> {
        let user_id = UserId::new(&self.user.id)
            .map_err(|err| format!("session user id {:?} is invalid: {err}", self.user.id))?;
        let expires_at = self
            .expires_in
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime));
        Ok(StoredSession::new(
            Principal::new(user_id, self.user.email),
            self.access_token,
            self.refresh_token,
            expires_at,
        ))
    }
}

#[derive(Debug, Serialize)]
pub(super) struct PasswordGrantDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct RefreshGrantDto<'a> {
    pub(super) refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct RecoverDto<'a> {
    pub(super) email: &'a str,
}

/// Error envelope shared by the platform services.
///
/// Each service names its human-readable field differently.
#[derive(Debug, Default, Deserialize)]
pub(super) struct PlatformErrorDto {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, rename = "statusCode")]
    status_code: Option<Value>,
}

impl PlatformErrorDto {
    pub(super) fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// Most specific human-readable message the envelope carries.
    pub(super) fn message(&self) -> Option<&str> {
        [
            &self.message,
            &self.error_description,
            &self.msg,
            &self.error,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .find(|text| !text.trim().is_empty())
    }

    /// Whether the storage service reported a duplicate object.
    pub(super) fn is_duplicate(&self) -> bool {
        let code_is_conflict = match &self.status_code {
            Some(Value::String(code)) => code == "409",
            Some(Value::Number(code)) => code.as_u64() == Some(409),
            _ => false,
        };
        code_is_conflict || self.error.as_deref() == Some("Duplicate")
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ProfileRowDto {
    user_id: String,
    organization_id: String,
    role: Role,
    owner_id: String,
}

impl ProfileRowDto {
    pub(super) fn into_domain(self) -> Result<UserProfile, String> {
        Ok(UserProfile {
            user_id: parse_user_id("user_id", &self.user_id)?,
            organization_id: parse_organization_id(&self.organization_id)?,
            role: self.role,
            owner_id: parse_user_id("owner_id", &self.owner_id)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TransactionRowDto {
    id: Value,
    occurred_at: String,
    kind: TransactionKind,
    amount: Value,
    #[serde(default)]
    category_id: Option<i64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    payment_method: Option<String>,
    organization_id: String,
    user_id: String,
    #[serde(default)]
    created_by: Option<String>,
}

impl TransactionRowDto {
    pub(super) fn into_domain(self) -> Result<Transaction, String> {
        let id = match self.id {
            Value::String(raw) => raw,
            Value::Number(raw) => raw.to_string(),
            other => return Err(format!("transaction id {other} is neither text nor number")),
        };
        let amount = decimal_from_json(&self.amount)
            .ok_or_else(|| format!("transaction {id} has a non-numeric amount"))?;
        let created_by = self
            .created_by
            .as_deref()
            .map(|raw| parse_user_id("created_by", raw))
            .transpose()?;
        Ok(Transaction {
            occurred_at: parse_day(&self.occurred_at)?,
            kind: self.kind,
            amount,
            category_id: self.category_id.map(CategoryId),
            description: self.description,
            payment_method: self.payment_method,
            organization_id: parse_organization_id(&self.organization_id)?,
            user_id: parse_user_id("user_id", &self.user_id)?,
            created_by,
            id: TransactionId::new(id),
        })
    }
}

/// Insert payload for a new transaction row.
#[derive(Debug, Serialize)]
pub(super) struct NewTransactionDto {
    occurred_at: String,
    kind: TransactionKind,
    amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_method: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_ref: Option<String>,
    organization_id: String,
    user_id: String,
    created_by: String,
}

impl From<&NewTransaction> for NewTransactionDto {
    fn from(entry: &NewTransaction) -> Self {
        Self {
            occurred_at: entry.occurred_at.format("%Y-%m-%d").to_string(),
            kind: entry.kind,
            amount: entry.amount.value(),
            category_id: entry.category_id.map(|id| id.0),
            description: entry.description.clone(),
            payment_method: entry.payment_method.map(|method| method.label()),
            source: entry.source.clone(),
            source_ref: entry.source_ref.clone(),
            organization_id: entry.organization_id.to_string(),
            user_id: entry.user_id.to_string(),
            created_by: entry.created_by.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoryRowDto {
    id: i64,
    name: String,
    kind: TransactionKind,
}

impl From<CategoryRowDto> for Category {
    fn from(row: CategoryRowDto) -> Self {
        Self {
            id: CategoryId(row.id),
            name: row.name,
            kind: row.kind,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct DailySummaryRowDto {
    day: String,
    #[serde(default)]
    total_incomes: Value,
    #[serde(default)]
    total_expenses: Value,
    #[serde(default)]
    net_result: Value,
}

impl DailySummaryRowDto {
    pub(super) fn into_domain(self) -> Result<DailySummaryRow, String> {
        Ok(DailySummaryRow {
            day: parse_day(&self.day)?,
            total_incomes: decimal_from_json(&self.total_incomes),
            total_expenses: decimal_from_json(&self.total_expenses),
            net_result: decimal_from_json(&self.net_result),
        })
    }
}

/// Read a numeric column that may arrive as a JSON number or a string.
///
/// Returns `None` for null, missing or non-numeric values.
pub(super) fn decimal_from_json(value: &Value) -> Option<Decimal> {
    let raw = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_owned(),
        _ => return None,
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

/// Accept both `YYYY-MM-DD` and full timestamps for date columns.
fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|err| format!("date {raw:?} is invalid: {err}"))
}

fn parse_user_id(field: &str, raw: &str) -> Result<UserId, String> {
    UserId::new(raw).map_err(|err| format!("{field} {raw:?} is invalid: {err}"))
}

fn parse_organization_id(raw: &str) -> Result<OrganizationId, String> {
    OrganizationId::new(raw).map_err(|err| format!("organization_id {raw:?} is invalid: {err}"))
}
