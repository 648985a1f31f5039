mod pdf;

use std::str::FromStr;

use fraction::Fraction;
use larder_shared::{Error, Result};
use serde::Serialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::aggregation::{AggregatedEntry, ShoppingList};

pub const DEFAULT_DECIMAL_PLACES: u32 = 2;
/// Precision above this is clamped.
pub const MAX_DECIMAL_PLACES: u32 = 6;
pub const DEFAULT_TITLE: &str = "Shopping list:";

#[derive(EnumString, Display, VariantArray, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum ExportFormat {
    #[strum(serialize = "text", to_string = "txt")]
    PlainText,
    #[strum(to_string = "pdf")]
    Pdf,
    #[strum(to_string = "json")]
    Json,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Result<Self> {
        Self::from_str(value.trim()).map_err(|_| Error::UnsupportedFormat(value.to_owned()))
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::PlainText => "text/plain; charset=utf-8",
            Self::Pdf => "application/pdf",
            Self::Json => "application/json",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::PlainText => "shopping_list.txt",
            Self::Pdf => "shopping_list.pdf",
            Self::Json => "shopping_list.json",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Presentation precision of amounts.
    pub decimal_places: u32,
    /// Heading printed above the entries.
    pub title: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            decimal_places: DEFAULT_DECIMAL_PLACES,
            title: DEFAULT_TITLE.to_owned(),
        }
    }
}

/// Round an exact amount to `decimal_places` with round-half-to-even.
///
/// Trailing fractional zeros are dropped: 500 → "500", 1/2 → "0.5",
/// 1/3 → "0.33". `decimal_places` is clamped to [`MAX_DECIMAL_PLACES`].
pub fn format_amount(amount: &Fraction, decimal_places: u32) -> String {
    let (Some(numer), Some(denom)) = (amount.numer(), amount.denom()) else {
        return amount.to_string();
    };

    let decimal_places = decimal_places.min(MAX_DECIMAL_PLACES);
    let scale = 10u128.pow(decimal_places);
    let scaled = u128::from(*numer) * scale;
    let denom = u128::from(*denom);

    let mut units = scaled / denom;
    let remainder = scaled % denom;
    match (remainder * 2).cmp(&denom) {
        std::cmp::Ordering::Greater => units += 1,
        std::cmp::Ordering::Equal if units % 2 == 1 => units += 1,
        _ => {}
    }

    let sign = if amount.is_sign_negative() && units != 0 {
        "-"
    } else {
        ""
    };
    let whole = units / scale;
    let fractional = units % scale;
    if fractional == 0 {
        return format!("{sign}{whole}");
    }

    let digits = format!("{:0width$}", fractional, width = decimal_places as usize);
    format!("{sign}{whole}.{}", digits.trim_end_matches('0'))
}

/// `name — amount unit`
pub fn render_entry(entry: &AggregatedEntry, options: &FormatOptions) -> String {
    format!(
        "{} — {} {}",
        entry.name(),
        format_amount(&entry.total, options.decimal_places),
        entry.unit()
    )
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    title: &'a str,
    items: Vec<JsonItem<'a>>,
}

#[derive(Serialize)]
struct JsonItem<'a> {
    name: &'a str,
    amount: String,
    unit: &'a str,
}

/// Render a shopping list. The output only depends on the list and the
/// options, never on time or environment.
pub fn format(
    list: &ShoppingList,
    format: ExportFormat,
    options: &FormatOptions,
) -> Result<Vec<u8>> {
    match format {
        ExportFormat::PlainText => {
            let mut content = format!("{}\n\n", options.title);
            for entry in list.entries() {
                content.push_str(&render_entry(entry, options));
                content.push('\n');
            }

            Ok(content.into_bytes())
        }
        ExportFormat::Pdf => {
            let lines: Vec<String> = list
                .entries()
                .iter()
                .map(|entry| render_entry(entry, options))
                .collect();

            Ok(pdf::render(&options.title, &lines))
        }
        ExportFormat::Json => {
            let document = JsonDocument {
                title: &options.title,
                items: list
                    .entries()
                    .iter()
                    .map(|entry| JsonItem {
                        name: entry.name(),
                        amount: format_amount(&entry.total, options.decimal_places),
                        unit: entry.key.unit.as_ref(),
                    })
                    .collect(),
            };

            let mut content =
                serde_json::to_vec_pretty(&document).map_err(|err| Error::Unknown(err.into()))?;
            content.push(b'\n');

            Ok(content)
        }
    }
}
