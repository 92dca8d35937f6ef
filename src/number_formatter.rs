use rust_decimal::Decimal;

pub trait NumberFormatter {
    fn format(&self, options: &FormatOptions) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyPosition {
    None,
    Prefix(String),
    Suffix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub thousands_separator: Option<char>,
    pub decimal_separator: char,
    pub currency: CurrencyPosition,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            thousands_separator: None,
            decimal_separator: '.',
            currency: CurrencyPosition::Prefix("$".to_string()),
        }
    }
}

impl NumberFormatter for Decimal {
    fn format(&self, options: &FormatOptions) -> String {
        let precision = 2;
        let decimal = self.round_dp(precision as u32);
        let decimal_string = format!("{decimal:.precision$}");
        let (integer, fraction) = decimal_string
            .split_once('.')
            .unwrap_or((decimal_string.as_str(), ""));

        let integer = match options.thousands_separator {
            Some(separator) => group_thousands(integer, separator),
            None => integer.to_string(),
        };
        let formatted = format!("{integer}{}{fraction}", options.decimal_separator);

        match &options.currency {
            CurrencyPosition::Prefix(symbol) => format!("{symbol}{formatted}"),
            CurrencyPosition::Suffix(symbol) => format!("{formatted}{symbol}"),
            CurrencyPosition::None => formatted,
        }
    }
}

/// Inserts `separator` between every three digits of a signed integer string.
fn group_thousands(integer: &str, separator: char) -> String {
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", integer),
    };
    let digit_count = digits.chars().count();
    let mut grouped = String::from(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digit_count - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
