//! Daily summary rows and the totals folded from them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use super::DateRange;

/// One precomputed row of the per-organization daily summary.
///
/// Numeric fields the store left empty or sent in an unreadable form arrive
/// as `None` and count as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySummaryRow {
    /// Calendar day the row covers.
    pub day: NaiveDate,
    /// Sum of income entries for the day.
    pub total_incomes: Option<Decimal>,
    /// Sum of expense entries for the day.
    pub total_expenses: Option<Decimal>,
    /// Net result as reported by the store.
    pub net_result: Option<Decimal>,
}

impl DailySummaryRow {
    /// Incomes with missing values read as zero.
    pub fn incomes(&self) -> Decimal {
        self.total_incomes.unwrap_or_default()
    }

    /// Expenses with missing values read as zero.
    pub fn expenses(&self) -> Decimal {
        self.total_expenses.unwrap_or_default()
    }
}

/// Totals left the representable decimal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("summary totals exceed the supported decimal range")]
pub struct SummaryOverflow;

/// Income, expense and net totals for a period.
///
/// ## Invariants
/// - `net == incomes - expenses`, and that difference is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    incomes: Decimal,
    expenses: Decimal,
}

impl Totals {
    /// Totals with the given incomes and expenses, or `None` when their
    /// net would overflow.
    pub fn new(incomes: Decimal, expenses: Decimal) -> Option<Self> {
        incomes.checked_sub(expenses)?;
        Some(Self { incomes, expenses })
    }

    /// Totals for a single summary row.
    ///
    /// # Errors
    ///
    /// Fails when the row's net is not representable.
    pub fn from_row(row: &DailySummaryRow) -> Result<Self, SummaryOverflow> {
        Self::new(row.incomes(), row.expenses()).ok_or(SummaryOverflow)
    }

    /// Money in.
    pub fn incomes(&self) -> Decimal {
        self.incomes
    }

    /// Money out.
    pub fn expenses(&self) -> Decimal {
        self.expenses
    }

    /// Incomes minus expenses.
    pub fn net(&self) -> Decimal {
        self.incomes - self.expenses
    }

    fn checked_add(self, other: Self) -> Result<Self, SummaryOverflow> {
        let incomes = self.incomes.checked_add(other.incomes);
        let expenses = self.expenses.checked_add(other.expenses);
        incomes
            .zip(expenses)
            .and_then(|(incomes, expenses)| Self::new(incomes, expenses))
            .ok_or(SummaryOverflow)
    }
}

/// What the owner dashboard shows: today's figures and the running month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Totals for `today`, or `None` when the store has no row for it yet.
    pub today: Option<Totals>,
    /// Totals across the requested range.
    pub month: Totals,
}

/// Inputs for one summary computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRequest {
    /// Days to aggregate, usually the current month.
    pub range: DateRange,
    /// Day whose row feeds the "today" card.
    pub today: NaiveDate,
}

impl SummaryRequest {
    /// Request covering the month that contains `today`.
    pub fn month_to_date(today: NaiveDate) -> Result<Self, super::CalendarError> {
        Ok(Self {
            range: DateRange::month_of(today)?,
            today,
        })
    }
}

/// Fold summary rows into dashboard totals.
///
/// Rows outside `request.range` are ignored.
///
/// # Errors
///
/// Returns [`SummaryOverflow`] when a sum or net leaves the decimal range.
pub fn fold(
    rows: &[DailySummaryRow],
    request: &SummaryRequest,
) -> Result<DashboardSummary, SummaryOverflow> {
    let in_range = rows.iter().filter(|row| request.range.contains(row.day));
    let month = in_range
        .clone()
        .try_fold(Totals::default(), |total, row| {
            total.checked_add(Totals::from_row(row)?)
        })?;
    let today = in_range
        .into_iter()
        .find(|row| row.day == request.today)
        .map(Totals::from_row)
        .transpose()?;
    Ok(DashboardSummary { today, month })
}
