//! Interactive collection of a single expense.
//!
//! Every question is driven by the same small state machine: a prompt is
//! shown, a line is read and validated, and the question is asked again until
//! the answer is accepted. End of input is a state of its own, so a closed
//! stdin ends collection with [`AppError::InputClosed`] instead of looping.

use crate::style::{Palette, Role};
use crate::{AppError, Expense};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

enum PromptState<T> {
    AwaitingInput,
    Validating(String),
    Accepted(T),
    Closed,
}

pub struct ExpenseCollector<'a, R, W> {
    input: R,
    output: W,
    categories: &'a [String],
    palette: Palette,
}

impl<'a, R, W> ExpenseCollector<'a, R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W, categories: &'a [String], palette: Palette) -> Self {
        Self {
            input,
            output,
            categories,
            palette,
        }
    }

    pub fn collect(&mut self) -> Result<Expense, AppError> {
        writeln!(self.output, "Getting User Expense").map_err(terminal_error)?;

        let name = self.ask(
            |out| write!(out, "Enter expense name: "),
            |line| Ok(line.to_string()),
        )?;
        let amount = self.ask(|out| write!(out, "Enter expense amount: "), parse_amount)?;

        let categories = self.categories;
        let palette = self.palette;
        let index = self.ask(
            |out| print_category_menu(out, categories, palette),
            |line| parse_category_index(line, categories.len()),
        )?;

        let expense = Expense::new(name, categories[index].clone(), amount);
        log::debug!("collected {expense}");
        Ok(expense)
    }

    fn ask<T>(
        &mut self,
        mut show_prompt: impl FnMut(&mut W) -> std::io::Result<()>,
        validate: impl Fn(&str) -> Result<T, String>,
    ) -> Result<T, AppError> {
        let mut state = PromptState::AwaitingInput;
        loop {
            state = match state {
                PromptState::AwaitingInput => {
                    show_prompt(&mut self.output).map_err(terminal_error)?;
                    self.output.flush().map_err(terminal_error)?;
                    match self.read_line()? {
                        Some(line) => PromptState::Validating(line),
                        None => PromptState::Closed,
                    }
                }
                PromptState::Validating(line) => match validate(&line) {
                    Ok(value) => PromptState::Accepted(value),
                    Err(message) => {
                        writeln!(self.output, "{message}").map_err(terminal_error)?;
                        PromptState::AwaitingInput
                    }
                },
                PromptState::Accepted(value) => return Ok(value),
                PromptState::Closed => {
                    // Keep the shell prompt off the unanswered question's line.
                    writeln!(self.output).map_err(terminal_error)?;
                    return Err(AppError::InputClosed);
                }
            };
        }
    }

    fn read_line(&mut self) -> Result<Option<String>, AppError> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| AppError::io(e, "Failed to read from terminal"))?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

fn terminal_error(source: std::io::Error) -> AppError {
    AppError::io(source, "Failed to write to terminal")
}

fn print_category_menu(
    out: &mut impl Write,
    categories: &[String],
    palette: Palette,
) -> std::io::Result<()> {
    writeln!(out, "Select a category: ")?;
    for (i, category) in categories.iter().enumerate() {
        writeln!(out, " {}. {}", i + 1, palette.paint(Role::Accent, category))?;
    }
    write!(out, "Enter a category number [1 - {}]: ", categories.len())
}

fn parse_amount(line: &str) -> Result<Decimal, String> {
    let text = line.trim();
    let amount = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| invalid_amount(&format!("'{text}' is not a valid amount")))?;
    if amount < Decimal::ZERO {
        return Err(invalid_amount("Amount cannot be negative"));
    }
    Ok(amount)
}

fn invalid_amount(reason: &str) -> String {
    format!("Invalid input: {reason}. Please enter a valid number.")
}

fn parse_category_index(line: &str, count: usize) -> Result<usize, String> {
    line.trim()
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .filter(|index| *index < count)
        .ok_or_else(|| "Invalid Category. Try again!".to_string())
}
