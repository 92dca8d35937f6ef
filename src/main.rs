use budgetlog::collector::ExpenseCollector;
use budgetlog::config::{Config, LOCAL_CONFIG_FILE};
use budgetlog::ledger::append_expense;
use budgetlog::report::summarize;
use budgetlog::style::{Palette, Role};
use budgetlog::AppError;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "budgetlog")]
#[command(version, about = "Log an expense and compare your spending with a monthly budget", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Path to the ledger file (default: expenses.csv)
    #[arg(short, long, global = true, env = "BUDGETLOG_FILE")]
    file: Option<PathBuf>,
    /// Monthly budget (default: 2000)
    #[arg(short, long, global = true, env = "BUDGETLOG_BUDGET")]
    budget: Option<Decimal>,
    /// Additional configuration file, applied over ./budgetlog.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
    /// Pretend today is this date (e.g. 2024-12-12)
    #[arg(long, global = true, hide = true, env = "BUDGETLOG_TODAY")]
    today: Option<String>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Record one expense interactively, then print the summary (default)
    Add,
    /// Print the summary without recording anything
    Report,
}

impl Cli {
    fn load_config(&self) -> Config {
        let mut config = Config::load(Some(Path::new(LOCAL_CONFIG_FILE)), self.config.as_deref());
        if let Some(file) = &self.file {
            config.ledger_path = file.clone();
        }
        if let Some(budget) = self.budget {
            config.budget = budget;
        }
        config
    }

    fn parse_today(&self) -> Result<NaiveDate, AppError> {
        match self.today.as_deref() {
            Some(input) => input.parse().map_err(|source| AppError::DateParse {
                source,
                input: input.to_string(),
            }),
            None => Ok(chrono::Local::now().date_naive()),
        }
    }
}

fn main() -> Result<(), main_error::MainError> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.load_config();
    let today = cli.parse_today()?;
    let palette = Palette::detect(config.color && !cli.no_color);
    log::debug!(
        "ledger: {}, budget: {}, today: {today}",
        config.ledger_path.display(),
        config.budget
    );

    let mut stdout = std::io::stdout().lock();
    writeln!(
        stdout,
        "{}",
        palette.paint(Role::Header, "Running Expense Tracker!")
    )?;

    match cli.command.unwrap_or(Commands::Add) {
        Commands::Add => {
            let expense = ExpenseCollector::new(
                std::io::stdin().lock(),
                &mut stdout,
                &config.categories,
                palette,
            )
            .collect()?;

            writeln!(
                stdout,
                "Saving User Expense: {expense} to {}",
                config.ledger_path.display()
            )?;
            if let Err(e) = append_expense(&config.ledger_path, &expense) {
                log::warn!("failed to save expense: {e}");
                writeln!(stdout, "An error occurred while saving the expense: {e}")?;
            }

            summarize(&mut stdout, &config, today, palette)?;
        }
        Commands::Report => {
            summarize(&mut stdout, &config, today, palette)?;
        }
    }

    Ok(())
}
