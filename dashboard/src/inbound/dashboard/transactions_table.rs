//! Recent transaction list for the owner dashboard.

use std::sync::Arc;

use super::scope::{LoadState, ViewScope};
use super::state::DashboardPorts;
use crate::domain::ports::TransactionsQuery;
use crate::domain::{Access, Transaction, TransactionKind, format_brl};

const EMPTY_CELL: &str = "-";

/// One table row, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    /// `dd/mm/yyyy`.
    pub date: String,
    /// Entry direction, used for colouring.
    pub kind: TransactionKind,
    /// "Income" or "Expense".
    pub kind_label: &'static str,
    /// Description, or `-`.
    pub description: String,
    /// Payment method label, or `-`.
    pub payment_method: String,
    /// Amount formatted as reais.
    pub amount: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(transaction: &Transaction) -> Self {
        Self {
            date: transaction.occurred_at.format("%d/%m/%Y").to_string(),
            kind: transaction.kind,
            kind_label: transaction.kind.label(),
            description: cell(transaction.description.as_deref()),
            payment_method: cell(transaction.payment_method.as_deref()),
            amount: format_brl(transaction.amount),
        }
    }
}

fn cell(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(EMPTY_CELL)
        .to_owned()
}

/// Newest-first transaction table.
pub struct TransactionsTable {
    transactions: Arc<dyn TransactionsQuery>,
    limit: usize,
    scope: ViewScope,
    state: LoadState<Vec<TransactionRow>>,
}

impl TransactionsTable {
    /// Build a table from the shared port bundle.
    pub fn new(ports: &DashboardPorts) -> Self {
        Self {
            transactions: Arc::clone(&ports.transactions),
            limit: ports.recent_transactions_limit,
            scope: ViewScope::new(),
            state: LoadState::Loading,
        }
    }

    /// Scope the renderer closes on unmount.
    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    /// Current rows or failure.
    pub fn state(&self) -> &LoadState<Vec<TransactionRow>> {
        &self.state
    }

    /// Fetch the most recent transactions visible to `access`.
    pub async fn load(&mut self, access: &Access) {
        self.state = LoadState::Loading;
        let outcome = self.transactions.recent(access, self.limit).await;
        if !self.scope.is_active() {
            return;
        }
        self.state = match outcome {
            Ok(transactions) => {
                LoadState::Ready(transactions.iter().map(TransactionRow::from).collect())
            }
            Err(err) => LoadState::Failed(err.message().to_owned()),
        };
    }
}
