//! Cash-flow entries, their categories and the editable draft behind the
//! manual entry form.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Amount, OrganizationId, UserId};

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl TransactionKind {
    /// Wire representation stored in the transaction table.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Label shown in tables and selectors.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment methods offered by the entry form.
///
/// The labels are stored verbatim, so they stay in the shop's language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash.
    #[serde(rename = "Dinheiro")]
    Cash,
    /// Credit card.
    #[serde(rename = "Cartão de Crédito")]
    CreditCard,
    /// Debit card.
    #[serde(rename = "Cartão de Débito")]
    DebitCard,
    /// Brazilian instant payment.
    #[serde(rename = "Pix")]
    Pix,
    /// Bank transfer.
    #[serde(rename = "Transferência")]
    BankTransfer,
    /// Anything else.
    #[serde(rename = "Outros")]
    Other,
}

impl PaymentMethod {
    /// Every option in display order.
    pub const ALL: [Self; 6] = [
        Self::Cash,
        Self::CreditCard,
        Self::DebitCard,
        Self::Pix,
        Self::BankTransfer,
        Self::Other,
    ];

    /// Stored label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "Dinheiro",
            Self::CreditCard => "Cartão de Crédito",
            Self::DebitCard => "Cartão de Débito",
            Self::Pix => "Pix",
            Self::BankTransfer => "Transferência",
            Self::Other => "Outros",
        }
    }

    /// Look up an option by its stored label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.label() == label)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tenant-scoped category identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Category an entry can be filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Identifier referenced by transactions.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Kind of entry the category applies to.
    pub kind: TransactionKind,
}

/// Keep only the categories applicable to `kind`, preserving order.
pub fn categories_for_kind(categories: &[Category], kind: TransactionKind) -> Vec<&Category> {
    categories
        .iter()
        .filter(|category| category.kind == kind)
        .collect()
}

/// Opaque identifier assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap a store-assigned identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored cash-flow entry. Entries are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Store-assigned identifier.
    pub id: TransactionId,
    /// Calendar day the movement happened.
    pub occurred_at: NaiveDate,
    /// Direction of the movement.
    pub kind: TransactionKind,
    /// Amount as stored.
    pub amount: Decimal,
    /// Optional category.
    pub category_id: Option<CategoryId>,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Payment method label as stored.
    pub payment_method: Option<String>,
    /// Tenant the entry belongs to.
    pub organization_id: OrganizationId,
    /// Owner the entry is attributed to.
    pub user_id: UserId,
    /// Principal who submitted the entry, when recorded.
    pub created_by: Option<UserId>,
}

/// Fully attributed entry ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    /// Calendar day the movement happened.
    pub occurred_at: NaiveDate,
    /// Direction of the movement.
    pub kind: TransactionKind,
    /// Validated positive amount.
    pub amount: Amount,
    /// Optional category.
    pub category_id: Option<CategoryId>,
    /// Trimmed, non-blank description.
    pub description: Option<String>,
    /// Optional payment method.
    pub payment_method: Option<PaymentMethod>,
    /// Origin of the entry, such as an upload pipeline.
    pub source: Option<String>,
    /// Reference inside `source`.
    pub source_ref: Option<String>,
    /// Tenant scope.
    pub organization_id: OrganizationId,
    /// Tenant owner the entry rolls up under.
    pub user_id: UserId,
    /// Submitting principal.
    pub created_by: UserId,
}

/// Editable state behind the manual entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    /// Day the movement happened.
    pub occurred_at: NaiveDate,
    /// Selected direction.
    pub kind: TransactionKind,
    /// Raw amount text as typed.
    pub amount: String,
    /// Raw description text.
    pub description: String,
    /// Selected payment method.
    pub payment_method: Option<PaymentMethod>,
    /// Selected category.
    pub category_id: Option<CategoryId>,
    /// Origin of the entry.
    pub source: Option<String>,
    /// Reference inside `source`.
    pub source_ref: Option<String>,
}

impl TransactionDraft {
    /// Empty draft for the given day and kind.
    pub fn new(occurred_at: NaiveDate, kind: TransactionKind) -> Self {
        Self {
            occurred_at,
            kind,
            amount: String::new(),
            description: String::new(),
            payment_method: None,
            category_id: None,
            source: None,
            source_ref: None,
        }
    }

    /// Description trimmed, or `None` when blank.
    pub fn trimmed_description(&self) -> Option<String> {
        let trimmed = self.description.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }

    /// Reset the per-entry fields after a successful submission.
    ///
    /// Date and kind survive so repeated same-day entries stay quick.
    pub fn clear_transient(&mut self) {
        self.amount.clear();
        self.description.clear();
        self.payment_method = None;
        self.category_id = None;
    }
}
