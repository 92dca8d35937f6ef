use crate::config::Config;
use crate::ledger::read_ledger;
use crate::number_formatter::{FormatOptions, NumberFormatter};
use crate::style::{Palette, Role};
use crate::{AppError, Expense};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::fmt::Display;
use std::io::Write;

/// Where `today` falls in its calendar month.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MonthContext {
    pub days_in_month: u32,
    pub remaining_days: u32,
}

impl MonthContext {
    pub fn for_date(today: NaiveDate) -> Self {
        let days_in_month = days_in_month(today.year(), today.month());
        Self {
            days_in_month,
            remaining_days: days_in_month - today.day(),
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last_day| last_day.day())
        .unwrap_or(31)
}

/// Spending totals for a ledger, measured against a monthly budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Category totals in the order each category first appears.
    pub by_category: Vec<(String, Decimal)>,
    pub total_spent: Decimal,
    pub remaining_budget: Decimal,
    pub daily_budget: Decimal,
}

impl Summary {
    /// Fails with [`AppError::AmountOverflow`] when a total leaves the range of [`Decimal`].
    pub fn new(
        expenses: &[Expense],
        budget: Decimal,
        month: MonthContext,
    ) -> Result<Self, AppError> {
        let mut by_category: Vec<(String, Decimal)> = Vec::new();
        let mut total_spent = Decimal::ZERO;
        for expense in expenses {
            total_spent = checked(total_spent.checked_add(expense.amount))?;
            let known = by_category
                .iter()
                .position(|(category, _)| *category == expense.category);
            match known {
                Some(index) => {
                    let sum = &mut by_category[index].1;
                    *sum = checked(sum.checked_add(expense.amount))?;
                }
                None => by_category.push((expense.category.clone(), expense.amount)),
            }
        }

        let remaining_budget = checked(budget.checked_sub(total_spent))?;
        let daily_budget = if month.remaining_days > 0 {
            checked(remaining_budget.checked_div(Decimal::from(month.remaining_days)))?
        } else {
            Decimal::ZERO
        };

        Ok(Summary {
            by_category,
            total_spent,
            remaining_budget,
            daily_budget,
        })
    }
}

fn checked(amount: Option<Decimal>) -> Result<Decimal, AppError> {
    amount.ok_or(AppError::AmountOverflow)
}

/// A [`Summary`] ready to be printed.
pub struct Report<'a> {
    pub summary: &'a Summary,
    pub format_options: &'a FormatOptions,
    pub palette: Palette,
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let money = |amount: Decimal| amount.format(self.format_options);

        writeln!(f, "💸 Expenses by Category")?;
        for (category, amount) in &self.summary.by_category {
            writeln!(
                f,
                "  {}: {}",
                self.palette.paint(Role::Accent, category),
                money(*amount)
            )?;
        }

        let total_line = format!(
            "💵 Total Spent: {} this month!",
            money(self.summary.total_spent)
        );
        writeln!(f, "{}", self.palette.paint(Role::Warning, total_line))?;

        let remaining_line = format!(
            "📊 Budget Remaining: {}!",
            money(self.summary.remaining_budget)
        );
        writeln!(f, "{}", self.palette.paint(Role::Success, remaining_line))?;

        let daily_line = format!(
            "📅 Daily Budget Remaining: {}",
            money(self.summary.daily_budget)
        );
        writeln!(f, "{}", self.palette.paint(Role::Success, daily_line))?;

        Ok(())
    }
}

/// Reads the configured ledger and prints its summary.
///
/// Ledger problems are reported to `out` and end the summary early; only a
/// failure to write to `out` itself is returned as an error.
pub fn summarize(
    out: &mut impl Write,
    config: &Config,
    today: NaiveDate,
    palette: Palette,
) -> Result<(), AppError> {
    print_summary(out, config, today, palette)
        .map_err(|e| AppError::io(e, "Failed to write report"))
}

fn print_summary(
    out: &mut impl Write,
    config: &Config,
    today: NaiveDate,
    palette: Palette,
) -> std::io::Result<()> {
    writeln!(out, "{}", palette.paint(Role::Header, " Summarizing User Expense"))?;

    let path = &config.ledger_path;
    let ledger = match read_ledger(path) {
        Ok(ledger) => ledger,
        Err(AppError::LedgerNotFound(_)) => {
            log::warn!("ledger {} does not exist", path.display());
            writeln!(
                out,
                "File not found: {}. Please make sure the file exists.",
                path.display()
            )?;
            return Ok(());
        }
        Err(e) => {
            log::warn!("failed to read ledger {}: {e}", path.display());
            writeln!(out, "An error occurred while reading expenses: {e}")?;
            return Ok(());
        }
    };

    if ledger.is_empty() {
        writeln!(out, "No expenses recorded yet.")?;
        return Ok(());
    }

    for line in &ledger.invalid_lines {
        writeln!(out, "Skipping invalid line: {line}")?;
    }

    let month = MonthContext::for_date(today);
    let summary = match Summary::new(&ledger.expenses, config.budget, month) {
        Ok(summary) => summary,
        Err(e) => {
            log::warn!("failed to summarize ledger {}: {e}", path.display());
            writeln!(out, "An error occurred while reading expenses: {e}")?;
            return Ok(());
        }
    };
    let format_options = config.formatting.format_options();
    let report = Report {
        summary: &summary,
        format_options: &format_options,
        palette,
    };
    write!(out, "{report}")
}
