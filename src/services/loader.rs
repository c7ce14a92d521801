use std::{
    fs::File,
    io::{self, Read},
    ops::RangeInclusive,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use crate::models::{BonusSuggestions, Phone};

use super::catalog::Catalog;

/// Separator between individual reviews inside the reviews column
pub const REVIEW_SEPARATOR: &str = "||";

const CATALOG_COLUMNS: [&str; 9] = [
    "name",
    "brand",
    "price",
    "os",
    "usage",
    "reviews",
    "purchaseLink",
    "sentiment",
    "totalReviews",
];

/// Error types for flat-file ingestion
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: missing column '{column}'")]
    MissingField { line: u64, column: &'static str },

    #[error("Line {line}: invalid {column} '{value}'")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// Loads the phone catalog from a CSV file
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let phones = read_catalog(file)?;
    tracing::info!(path = %path.display(), phones = phones.len(), "Catalog loaded");
    Ok(Catalog::with_phones(phones))
}

/// Parses catalog rows (header first) into phone records
///
/// Columns: name, brand, price, os, usage, reviews, purchaseLink, sentiment and
/// an optional totalReviews. Reviews are `||`-separated; when totalReviews is
/// missing or blank it is the number of parsed reviews.
pub fn read_catalog<R: Read>(reader: R) -> Result<Vec<Phone>, LoadError> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut phones = Vec::new();
    for record in csv.records() {
        let record = record?;
        phones.push(parse_phone(&record)?);
    }
    Ok(phones)
}

fn parse_phone(record: &StringRecord) -> Result<Phone, LoadError> {
    let line = record.position().map(|p| p.line()).unwrap_or_default();

    let name = field(record, line, 0)?;
    let brand = field(record, line, 1)?;
    let price = parse_score(field(record, line, 2)?, line, 2, 0.0..=f64::MAX)?;
    let os = field(record, line, 3)?;
    let usage = field(record, line, 4)?;
    let reviews: Vec<String> = field(record, line, 5)?
        .split(REVIEW_SEPARATOR)
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();
    let purchase_link = field(record, line, 6)?;
    let sentiment = parse_score(field(record, line, 7)?, line, 7, 0.0..=100.0)?;

    let total_reviews = match record.get(8).filter(|v| !v.is_empty()) {
        Some(value) => parse_number(value, line, 8)?,
        None => reviews.len() as u32,
    };

    Ok(Phone::new(
        name,
        brand,
        price,
        os,
        usage,
        purchase_link,
        reviews,
        sentiment,
        total_reviews,
    ))
}

fn field(record: &StringRecord, line: u64, index: usize) -> Result<&str, LoadError> {
    record.get(index).ok_or(LoadError::MissingField {
        line,
        column: CATALOG_COLUMNS[index],
    })
}

fn parse_number<T: std::str::FromStr>(value: &str, line: u64, index: usize) -> Result<T, LoadError> {
    value.parse().map_err(|_| LoadError::InvalidField {
        line,
        column: CATALOG_COLUMNS[index],
        value: value.to_string(),
    })
}

/// Parses a float column that must be finite and inside `range`
fn parse_score(
    value: &str,
    line: u64,
    index: usize,
    range: RangeInclusive<f64>,
) -> Result<f64, LoadError> {
    let number: f64 = parse_number(value, line, index)?;
    if !range.contains(&number) {
        return Err(LoadError::InvalidField {
            line,
            column: CATALOG_COLUMNS[index],
            value: value.to_string(),
        });
    }
    Ok(number)
}

/// Loads the bonus-suggestion table
///
/// The table is best-effort: a missing file yields an empty table.
pub fn load_bonus(path: impl AsRef<Path>) -> Result<BonusSuggestions, LoadError> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Bonus suggestions file not found, continuing without");
            return Ok(BonusSuggestions::new());
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let bonus = read_bonus(file)?;
    tracing::info!(path = %path.display(), categories = bonus.len(), "Bonus suggestions loaded");
    Ok(bonus)
}

/// Parses bonus rows (header first): usage in column 0, suggestion name in
/// column 2
pub fn read_bonus<R: Read>(reader: R) -> Result<BonusSuggestions, LoadError> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bonus = BonusSuggestions::new();
    for record in csv.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let usage = record.get(0).ok_or(LoadError::MissingField { line, column: "usage" })?;
        let name = record.get(2).ok_or(LoadError::MissingField { line, column: "name" })?;
        bonus.insert(usage, name);
    }
    Ok(bonus)
}
