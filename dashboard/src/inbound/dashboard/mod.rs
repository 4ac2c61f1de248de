//! View models for the dashboard screens.
//!
//! Each model is built from a [`DashboardPorts`] bundle, exposes plain
//! state for a renderer, and applies request results only while its
//! [`ViewScope`] is open.

mod entry_form;
mod login_form;
mod profile_view;
mod scope;
mod state;
mod summary_panel;
#[cfg(test)]
mod test_support;
mod transactions_table;
mod upload_card;

pub use self::entry_form::{ENTRY_RECORDED, EntryForm};
pub use self::login_form::{LoginForm, RESET_SENT, RoleChoice};
pub use self::profile_view::{ProfileView, Screen};
pub use self::scope::{LoadState, ViewScope};
pub use self::state::DashboardPorts;
pub use self::summary_panel::{SummaryCard, SummaryPanel};
pub use self::transactions_table::{TransactionRow, TransactionsTable};
pub use self::upload_card::{CaptureSession, NOTHING_SELECTED, UploadCard};
