//! Transaction types shared by every pipeline stage

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Spending categories assigned by keyword scoring.
///
/// Declaration order is the tie-break order of the categorizer and the
/// iteration order of every per-category map.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Utilities")]
    Utilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Housing")]
    Housing,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Uncategorized")]
    Uncategorized,
}

impl Category {
    /// The keyword-scored spending buckets, in tie-break order
    pub const SPENDING: [Category; 10] = [
        Category::FoodDining,
        Category::Transportation,
        Category::Entertainment,
        Category::Shopping,
        Category::Utilities,
        Category::Healthcare,
        Category::Education,
        Category::Housing,
        Category::PersonalCare,
        Category::Travel,
    ];

    /// Display name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FoodDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Housing => "Housing",
            Category::PersonalCare => "Personal Care",
            Category::Travel => "Travel",
            Category::Income => "Income",
            Category::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated statement row reduced to the fixed schema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedTransaction {
    /// Calendar date (serialized as YYYY-MM-DD)
    pub date: NaiveDate,
    /// Trimmed, never empty
    pub description: String,
    /// Positive = income, negative = expense, never zero
    pub amount: f64,
    /// Category column as supplied by the statement, if any
    pub category: Option<String>,
}

impl NormalizedTransaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            category: None,
        }
    }

    /// Attach the statement-supplied category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }
}

/// A normalized transaction with its assigned category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorizedTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    /// Keyword-match strength in [0.3, 0.9]
    pub confidence: f64,
    /// Statement-supplied category, kept for audit only
    pub original_category: Option<String>,
}

impl CategorizedTransaction {
    /// Build from a normalized transaction, preserving its original category
    pub fn from_normalized(txn: &NormalizedTransaction, category: Category, confidence: f64) -> Self {
        Self {
            date: txn.date,
            description: txn.description.clone(),
            amount: txn.amount,
            category,
            confidence,
            original_category: txn.category.clone(),
        }
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Get the absolute amount
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    /// Calendar month key, e.g. "2024-01"
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.date.year(), self.date.month())
    }

    /// Case-insensitive substring test against the description
    pub fn description_contains_any(&self, keywords: &[&str]) -> bool {
        let desc = self.description.to_lowercase();
        keywords.iter().any(|k| desc.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_categorized_keeps_original_category() {
        let txn = NormalizedTransaction::new(jan(5), "Restaurant", -67.89).with_category("Dining");
        let cat = CategorizedTransaction::from_normalized(&txn, Category::FoodDining, 0.6);
        assert_eq!(cat.category, Category::FoodDining);
        assert_eq!(cat.original_category.as_deref(), Some("Dining"));
        assert!(cat.is_expense());
        assert_eq!(cat.abs_amount(), 67.89);
        // Source row untouched
        assert_eq!(txn.category.as_deref(), Some("Dining"));
    }

    #[test]
    fn test_month_key_is_zero_padded() {
        let txn = NormalizedTransaction::new(jan(9), "Coffee", -4.5);
        let cat = CategorizedTransaction::from_normalized(&txn, Category::FoodDining, 0.6);
        assert_eq!(cat.month_key(), "2024-01");
    }

    #[test]
    fn test_category_serializes_as_display_name() {
        let json = serde_json::to_string(&Category::PersonalCare).unwrap();
        assert_eq!(json, "\"Personal Care\"");
        assert_eq!(Category::FoodDining.to_string(), "Food & Dining");
        for c in Category::SPENDING {
            assert_eq!(serde_json::to_string(&c).unwrap(), format!("\"{}\"", c.as_str()));
        }
    }

    #[test]
    fn test_transaction_date_serializes_iso() {
        let txn = NormalizedTransaction::new(jan(1), "Grocery Store", -45.67);
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["date"], "2024-01-01");
        assert!(json["category"].is_null());
    }
}
