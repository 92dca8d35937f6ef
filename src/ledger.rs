//! The append-only ledger file: one `name,amount,category` line per expense.

use crate::{AppError, DELIMITER, Expense};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use std::str::FromStr;

/// Everything read back from a ledger file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    pub expenses: Vec<Expense>,
    /// Lines that could not be turned into an expense, whitespace-trimmed.
    pub invalid_lines: Vec<String>,
}

impl Ledger {
    /// True when the file held no lines at all. A blank line still counts as
    /// an (invalid) line.
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.invalid_lines.is_empty()
    }
}

/// Appends one line to the ledger, creating the file if needed.
///
/// Fields are written as-is: there is no quoting, so a name or category
/// containing a comma produces a line that [`read_ledger`] will skip.
pub fn append_expense(path: &Path, expense: &Expense) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::io(e, format!("Failed to open file: {}", path.display())))?;

    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);

    writer.write_record([
        expense.name.as_str(),
        expense.amount.to_string().as_str(),
        expense.category.as_str(),
    ])?;
    writer
        .flush()
        .map_err(|e| AppError::io(e, format!("Failed to write file: {}", path.display())))?;

    log::debug!("appended {expense} to {}", path.display());
    Ok(())
}

/// Reads every line of the ledger.
///
/// Lines that do not split into exactly three fields, or whose amount is not
/// a number, are collected in [`Ledger::invalid_lines`] instead of failing
/// the whole read. Blank lines are invalid lines too.
///
/// Lines are read directly: the `csv` reader skips empty rows silently.
pub fn read_ledger(path: &Path) -> Result<Ledger, AppError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::LedgerNotFound(path.to_path_buf()),
        _ => AppError::io(e, format!("Failed to access file: {}", path.display())),
    })?;

    let mut ledger = Ledger::default();
    for line in BufReader::new(file).lines() {
        let line =
            line.map_err(|e| AppError::io(e, format!("Failed to read file: {}", path.display())))?;
        let line = line.trim();
        match parse_line(line) {
            Some(expense) => ledger.expenses.push(expense),
            None => {
                log::warn!("invalid ledger line: {line:?}");
                ledger.invalid_lines.push(line.to_string());
            }
        }
    }

    log::debug!(
        "read {} expenses and {} invalid lines from {}",
        ledger.expenses.len(),
        ledger.invalid_lines.len(),
        path.display()
    );
    Ok(ledger)
}

fn parse_line(line: &str) -> Option<Expense> {
    let parts: Vec<&str> = line.split(char::from(DELIMITER)).collect();
    let [name, amount, category] = parts.as_slice() else {
        return None;
    };
    let amount = amount.trim();
    let amount = Decimal::from_str(amount)
        .or_else(|_| Decimal::from_scientific(amount))
        .ok()?;
    Some(Expense::new(*name, *category, amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_dir::TempDir;

    struct Fixture {
        #[allow(dead_code)] // Used to keep temp directory alive
        tempdir: TempDir,
        path: std::path::PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let tempdir = TempDir::with_prefix("budgetlog-ledger-").unwrap();
            let path = tempdir.child("expenses.csv");
            Fixture { tempdir, path }
        }

        fn with_content(content: &str) -> Self {
            let fixture = Self::new();
            std::fs::write(&fixture.path, content).unwrap();
            fixture
        }

        fn content(&self) -> String {
            std::fs::read_to_string(&self.path).unwrap()
        }
    }

    #[test]
    fn append_creates_file() {
        let fixture = Fixture::new();
        let expense = Expense::new("Coffee", "Food 🍽️", Decimal::new(450, 2));

        append_expense(&fixture.path, &expense).unwrap();

        insta::assert_snapshot!(fixture.content(), @"Coffee,4.50,Food 🍽️");
    }

    #[test]
    fn append_keeps_existing_lines() {
        let fixture = Fixture::with_content("Rent,900,Housing 🏠\n");
        let expense = Expense::new("Bus", "Transportation 🚗", Decimal::from(3));

        append_expense(&fixture.path, &expense).unwrap();

        assert_eq!(
            fixture.content(),
            "Rent,900,Housing 🏠\nBus,3,Transportation 🚗\n"
        );
    }

    #[test]
    fn append_does_not_round_amount() {
        let fixture = Fixture::new();
        let expense = Expense::new("Split bill", "Food 🍽️", Decimal::new(3333, 3));

        append_expense(&fixture.path, &expense).unwrap();

        assert_eq!(fixture.content(), "Split bill,3.333,Food 🍽️\n");
    }

    #[test]
    fn append_into_missing_directory_is_an_error() {
        let fixture = Fixture::new();
        let path = fixture.path.join("nested").join("expenses.csv");
        let expense = Expense::new("Coffee", "Food 🍽️", Decimal::ONE);

        let result = append_expense(&path, &expense);

        assert!(matches!(result, Err(AppError::Io { .. })));
    }

    #[test]
    fn written_expense_reads_back() {
        let fixture = Fixture::new();
        let expense = Expense::new("Museum", "Entertainment 🎮", Decimal::new(1850, 2));

        append_expense(&fixture.path, &expense).unwrap();
        let ledger = read_ledger(&fixture.path).unwrap();

        assert_eq!(ledger.expenses, vec![expense]);
        assert!(ledger.invalid_lines.is_empty());
    }

    #[test]
    fn read_missing_file() {
        let fixture = Fixture::new();

        let result = read_ledger(&fixture.path);

        assert!(matches!(result, Err(AppError::LedgerNotFound(path)) if path == fixture.path));
    }

    #[test]
    fn read_empty_file() {
        let fixture = Fixture::with_content("");

        let ledger = read_ledger(&fixture.path).unwrap();

        assert!(ledger.is_empty());
    }

    #[test]
    fn read_blank_line_is_invalid_not_empty() {
        let fixture = Fixture::with_content("\n");

        let ledger = read_ledger(&fixture.path).unwrap();

        assert!(!ledger.is_empty());
        assert!(ledger.expenses.is_empty());
        assert_eq!(ledger.invalid_lines, vec![""]);
    }

    #[test]
    fn read_flags_blank_and_whitespace_lines_alike() {
        let fixture = Fixture::with_content("Coffee,5,Food\n\n   \nTea,3,Food\n");

        let ledger = read_ledger(&fixture.path).unwrap();

        assert_eq!(ledger.expenses.len(), 2);
        assert_eq!(ledger.invalid_lines, vec!["", ""]);
    }

    #[test]
    fn read_last_line_without_newline() {
        let fixture = Fixture::with_content("Coffee,5,Food\nTea,3,Food");

        let ledger = read_ledger(&fixture.path).unwrap();

        assert_eq!(ledger.expenses.len(), 2);
        assert!(ledger.invalid_lines.is_empty());
    }

    #[test]
    fn read_skips_lines_with_wrong_field_count() {
        let fixture = Fixture::with_content("Coffee,5,Food\nbad,line\nTea,3,Food\na,1,b,c\n");

        let ledger = read_ledger(&fixture.path).unwrap();

        assert_eq!(
            ledger.expenses,
            vec![
                Expense::new("Coffee", "Food", Decimal::from(5)),
                Expense::new("Tea", "Food", Decimal::from(3)),
            ]
        );
        assert_eq!(ledger.invalid_lines, vec!["bad,line", "a,1,b,c"]);
    }

    #[test]
    fn read_skips_non_numeric_amount() {
        let fixture = Fixture::with_content("Coffee,five,Food\nTea,3,Food\n");

        let ledger = read_ledger(&fixture.path).unwrap();

        assert_eq!(ledger.expenses.len(), 1);
        assert_eq!(ledger.invalid_lines, vec!["Coffee,five,Food"]);
    }

    #[test]
    fn read_trims_line_and_amount() {
        let fixture = Fixture::with_content("  Taxi, 12.5 ,Transportation 🚗  \r\n");

        let ledger = read_ledger(&fixture.path).unwrap();

        assert_eq!(
            ledger.expenses,
            vec![Expense::new("Taxi", "Transportation 🚗", Decimal::new(125, 1))]
        );
    }

    #[test]
    fn read_accepts_negative_amount() {
        let fixture = Fixture::with_content("Refund,-20,Shopping 🛍️\n");

        let ledger = read_ledger(&fixture.path).unwrap();

        assert_eq!(ledger.expenses[0].amount, Decimal::from(-20));
    }

    #[test]
    fn read_keeps_quotes_literally() {
        let fixture = Fixture::with_content("\"Dinner,42,Food\n");

        let ledger = read_ledger(&fixture.path).unwrap();

        assert_eq!(ledger.expenses[0].name, "\"Dinner");
    }
}
