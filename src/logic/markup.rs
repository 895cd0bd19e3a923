//! Markup & Text Helpers
//!
//! Everything that turns record fields into displayed text, or displayed
//! text back into numbers, goes through here.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading float prefix, the way a browser's `parseFloat` reads it
static LEADING_NUMBER: Lazy<Option<Regex>> = Lazy::new(|| {
    match Regex::new(r"^\s*[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?") {
        Ok(re) => Some(re),
        Err(e) => {
            log::error!("Number pattern failed to compile: {}", e);
            None
        }
    }
});

fn leading_number(text: &str) -> Option<f64> {
    LEADING_NUMBER
        .as_ref()?
        .find(text)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Escape untrusted text before it is inserted as markup
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Navigation target for a customer: `<risk_url>?q=<customer_id>`
pub fn navigation_url(risk_url: &str, customer_id: &str) -> String {
    format!("{}?q={}", risk_url, urlencoding::encode(customer_id))
}

/// Parse displayed numeric text (`"$12,500.00"`, `"81% high"`), 0 when unparsable
pub fn parse_number(text: &str) -> f64 {
    let cleaned: String = text.chars().filter(|c| *c != '$' && *c != ',').collect();
    leading_number(&cleaned).unwrap_or(0.0)
}

/// Parse a displayed counter value (`"1,204"`), 0 when unparsable
pub fn parse_count(text: &str) -> i64 {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    leading_number(&cleaned).map(|v| v.trunc() as i64).unwrap_or(0)
}

/// Format a count with thousands separators (`12345` -> `"12,345"`)
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a balance as the table shows it (`12500.5` -> `"$12,500.50"`)
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as i64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, format_count(cents / 100), cents % 100)
}

/// Format a score the way the pill shows it (`81.0` -> `"81"`, `63.25` -> `"63.25"`)
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{}", score)
    }
}
