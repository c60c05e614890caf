//! Raw statement rows → validated transactions.
//!
//! Rows that cannot be trusted are dropped with a recorded reason; a bad row
//! never aborts the batch.

use anyhow::Result;
use pennywise_core::NormalizedTransaction;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::parsers::{DateParser, parse_amount};
use crate::types::{Field, RawRow};

/// Why a row was excluded from the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    #[serde(rename = "empty_row")]
    EmptyRow,
    #[serde(rename = "invalid_date")]
    InvalidDate,
    #[serde(rename = "empty_description")]
    EmptyDescription,
    #[serde(rename = "invalid_amount")]
    InvalidAmount,
    #[serde(rename = "zero_amount")]
    ZeroAmount,
}

impl SkipReason {
    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::EmptyRow => "row has no columns",
            SkipReason::InvalidDate => "date missing or unparseable",
            SkipReason::EmptyDescription => "description missing",
            SkipReason::InvalidAmount => "amount missing or not a number",
            SkipReason::ZeroAmount => "amount is zero",
        }
    }
}

/// A dropped row, by position in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub index: usize,
    pub reason: SkipReason,
}

/// Normalization output with an account of every dropped row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizeReport {
    pub transactions: Vec<NormalizedTransaction>,
    pub skipped: Vec<SkippedRow>,
}

pub struct RowNormalizer {
    dates: DateParser,
}

impl RowNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self::with_date_parser(DateParser::new()?))
    }

    pub fn with_date_parser(dates: DateParser) -> Self {
        Self { dates }
    }

    /// Valid transactions in input order
    pub fn normalize(&self, rows: &[RawRow]) -> Vec<NormalizedTransaction> {
        self.normalize_with_report(rows).transactions
    }

    pub fn normalize_with_report(&self, rows: &[RawRow]) -> NormalizeReport {
        let mut report = NormalizeReport::default();

        for (index, row) in rows.iter().enumerate() {
            match self.normalize_row(row) {
                Ok(txn) => report.transactions.push(txn),
                Err(reason) => {
                    debug!(row = index, reason = reason.describe(), "skipping statement row");
                    report.skipped.push(SkippedRow { index, reason });
                }
            }
        }

        info!(
            rows = rows.len(),
            kept = report.transactions.len(),
            skipped = report.skipped.len(),
            "normalized statement rows"
        );
        report
    }

    /// Validate a single row against the fixed schema
    pub fn normalize_row(&self, row: &RawRow) -> std::result::Result<NormalizedTransaction, SkipReason> {
        if row.is_empty() {
            return Err(SkipReason::EmptyRow);
        }

        let date = row
            .lookup(Field::Date)
            .and_then(|raw| self.dates.parse(raw))
            .ok_or(SkipReason::InvalidDate)?;

        let description = row.lookup(Field::Description).map(str::trim).unwrap_or("");
        if description.is_empty() {
            return Err(SkipReason::EmptyDescription);
        }

        let amount = row
            .lookup(Field::Amount)
            .and_then(parse_amount)
            .ok_or(SkipReason::InvalidAmount)?;
        if amount == 0.0 {
            return Err(SkipReason::ZeroAmount);
        }

        let mut txn = NormalizedTransaction::new(date, description, amount);
        if let Some(category) = row.lookup(Field::Category) {
            txn = txn.with_category(category.trim());
        }
        Ok(txn)
    }
}
