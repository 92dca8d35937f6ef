use crate::number_formatter::{CurrencyPosition, FormatOptions};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_LEDGER_PATH: &str = "expenses.csv";
pub const DEFAULT_BUDGET: i64 = 2000;
pub const DEFAULT_CATEGORIES: [&str; 12] = [
    "Housing 🏠",
    "Transportation 🚗",
    "Food 🍽️",
    "Entertainment 🎮",
    "Health 🏥",
    "Education 📚",
    "Savings/Investments 💰",
    "Shopping 🛍️",
    "Debt Payments 💳",
    "Personal Care 💅",
    "Miscellaneous 🎁",
    "Travel ✈️",
];

/// Name of the optional configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "budgetlog.toml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub ledger_path: PathBuf,
    pub budget: Decimal,
    pub categories: Vec<String>,
    pub color: bool,
    pub formatting: FormattingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            budget: Decimal::from(DEFAULT_BUDGET),
            categories: default_categories(),
            color: true,
            formatting: FormattingConfig::default(),
        }
    }
}

impl Config {
    /// Layers the optional files over the defaults, later files winning.
    ///
    /// Missing files are ignored. A file that cannot be parsed produces a
    /// warning on stderr and the defaults are used instead.
    pub fn load(
        local_config_path: Option<impl AsRef<Path>>,
        extra_config_path: Option<impl AsRef<Path>>,
    ) -> Self {
        let mut settings = config::Config::builder();

        if let Some(path) = local_config_path {
            log::debug!("config source: {}", path.as_ref().display());
            settings = settings.add_source(config::File::from(path.as_ref()).required(false));
        }

        if let Some(path) = extra_config_path {
            log::debug!("config source: {}", path.as_ref().display());
            settings = settings.add_source(config::File::from(path.as_ref()).required(false));
        }

        let config = match settings.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to load config: {e}");
                    Config::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to load config: {e}");
                Config::default()
            }
        };
        config.normalized()
    }

    fn normalized(mut self) -> Self {
        if self.categories.is_empty() {
            log::warn!("no categories configured, using the defaults");
            self.categories = default_categories();
        }
        self
    }
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormattingConfig {
    #[serde(rename = "currency_symbol")]
    pub currency: Option<String>,
    #[serde(rename = "currency_position")]
    pub currency_position: Option<CurrencyPositionChoice>,
    #[serde(rename = "thousands_separator")]
    pub thousands_separator: Option<char>,
    #[serde(rename = "decimal_separator")]
    pub decimal_separator: char,
}

impl FormattingConfig {
    pub fn format_options(&self) -> FormatOptions {
        let currency = match (self.currency.as_ref(), self.currency_position) {
            (Some(symbol), Some(CurrencyPositionChoice::Suffix)) => {
                CurrencyPosition::Suffix(symbol.clone())
            }
            (Some(symbol), _) => CurrencyPosition::Prefix(symbol.clone()),
            (None, _) => CurrencyPosition::None,
        };

        FormatOptions {
            thousands_separator: self.thousands_separator,
            decimal_separator: self.decimal_separator,
            currency,
        }
    }
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            currency: Some("$".to_string()),
            currency_position: Some(CurrencyPositionChoice::Prefix),
            thousands_separator: None,
            decimal_separator: '.',
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum CurrencyPositionChoice {
    Prefix,
    Suffix,
}
