//! Manual entry form for attendants.
//!
//! The form owns a [`TransactionDraft`] and the category catalog. A
//! successful submission clears the per-entry fields but keeps the date and
//! kind; a failed one leaves the draft untouched so nothing typed is lost.
//!
//! The default date is the local calendar day, the same day the owner
//! summary treats as "today". Upload paths use the UTC day instead.

use std::sync::Arc;

use chrono::NaiveDate;

use super::scope::{LoadState, ViewScope};
use super::state::DashboardPorts;
use crate::domain::ports::{CategoriesQuery, EntryCommand};
use crate::domain::{
    Access, Category, CategoryId, PaymentMethod, TransactionDraft, TransactionKind,
    categories_for_kind,
};

/// Shown after a successful submission.
pub const ENTRY_RECORDED: &str = "Entry recorded.";

/// Entry form view model.
pub struct EntryForm {
    entries: Arc<dyn EntryCommand>,
    catalog: Arc<dyn CategoriesQuery>,
    scope: ViewScope,
    draft: TransactionDraft,
    categories: LoadState<Vec<Category>>,
    submitting: bool,
    message: Option<String>,
    error: Option<String>,
}

impl EntryForm {
    /// Empty form dated today (local time), defaulting to an income entry.
    pub fn new(ports: &DashboardPorts) -> Self {
        let today = ports.clock.local().date_naive();
        Self {
            entries: Arc::clone(&ports.entries),
            catalog: Arc::clone(&ports.categories),
            scope: ViewScope::new(),
            draft: TransactionDraft::new(today, TransactionKind::Income),
            categories: LoadState::Loading,
            submitting: false,
            message: None,
            error: None,
        }
    }

    /// Scope the renderer closes on unmount.
    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    /// Current draft.
    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    /// Category catalog load state.
    pub fn categories(&self) -> &LoadState<Vec<Category>> {
        &self.categories
    }

    /// Categories matching the selected kind.
    pub fn visible_categories(&self) -> Vec<&Category> {
        self.categories
            .ready()
            .map(|all| categories_for_kind(all, self.draft.kind))
            .unwrap_or_default()
    }

    /// Payment method options in display order.
    pub const fn payment_methods() -> &'static [PaymentMethod] {
        &PaymentMethod::ALL
    }

    /// Whether a submission is in flight.
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Success message from the last submission.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Error message from the last submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Change the entry date.
    pub fn set_date(&mut self, day: NaiveDate) {
        self.draft.occurred_at = day;
    }

    /// Switch the kind, dropping a selected category of the other kind.
    pub fn set_kind(&mut self, kind: TransactionKind) {
        self.draft.kind = kind;
        let mismatched = self.draft.category_id.is_some_and(|id| {
            self.categories
                .ready()
                .and_then(|all| all.iter().find(|category| category.id == id))
                .is_none_or(|category| category.kind != kind)
        });
        if mismatched {
            self.draft.category_id = None;
        }
    }

    /// Replace the raw amount text.
    pub fn set_amount(&mut self, raw: impl Into<String>) {
        self.draft.amount = raw.into();
    }

    /// Replace the raw description text.
    pub fn set_description(&mut self, raw: impl Into<String>) {
        self.draft.description = raw.into();
    }

    /// Select or clear the payment method.
    pub fn set_payment_method(&mut self, method: Option<PaymentMethod>) {
        self.draft.payment_method = method;
    }

    /// Select or clear the category.
    pub fn set_category(&mut self, category: Option<CategoryId>) {
        self.draft.category_id = category;
    }

    /// Load the organization's categories.
    pub async fn load_categories(&mut self, access: &Access) {
        self.categories = LoadState::Loading;
        let outcome = self.catalog.categories(access).await;
        if !self.scope.is_active() {
            return;
        }
        self.categories = match outcome {
            Ok(categories) => LoadState::Ready(categories),
            Err(err) => LoadState::Failed(err.message().to_owned()),
        };
    }

    /// Submit the draft once. Errors are shown verbatim.
    pub async fn submit(&mut self, access: &Access) {
        self.submitting = true;
        self.message = None;
        self.error = None;
        let outcome = self.entries.submit(access, &self.draft).await;
        if !self.scope.is_active() {
            return;
        }
        self.submitting = false;
        match outcome {
            Ok(_) => {
                self.draft.clear_transient();
                self.message = Some(ENTRY_RECORDED.to_owned());
            }
            Err(err) => self.error = Some(err.message().to_owned()),
        }
    }
}
