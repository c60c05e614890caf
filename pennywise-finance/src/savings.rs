//! Category-level savings analysis: where the money goes, and which
//! categories recur often enough to be worth trimming.

use pennywise_core::Category;
use serde::{Deserialize, Serialize};

use crate::budget_metrics::BudgetMetrics;

const HIGH_SPENDING_FLOOR: f64 = 100.0;
const HIGH_SPENDING_LIMIT: usize = 5;
const RECURRING_MIN_COUNT: usize = 2;
const RECURRING_LIMIT: usize = 3;
const REDUCTION_RATE: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: Category,
    pub total: f64,
    pub count: usize,
    pub average_per_transaction: f64,
    /// Saving from a 20% cut
    pub potential_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAnalysis {
    /// Over $100, largest first, at most five
    pub high_spending_categories: Vec<CategorySpend>,
    /// More than two transactions, highest average first, at most three
    pub recurring_expenses: Vec<CategorySpend>,
    pub potential_savings: f64,
    pub total_expenses: f64,
}

pub fn savings_analysis(metrics: &BudgetMetrics) -> SavingsAnalysis {
    let spends: Vec<CategorySpend> = metrics
        .spending_patterns
        .category_trends
        .iter()
        .map(|(category, trend)| CategorySpend {
            category: *category,
            total: trend.total,
            count: trend.count,
            average_per_transaction: trend.average,
            potential_savings: trend.total * REDUCTION_RATE,
        })
        .collect();

    let mut high_spending_categories: Vec<_> = spends
        .iter()
        .filter(|s| s.total > HIGH_SPENDING_FLOOR)
        .cloned()
        .collect();
    high_spending_categories.sort_by(|a, b| b.total.total_cmp(&a.total));
    high_spending_categories.truncate(HIGH_SPENDING_LIMIT);

    let mut recurring_expenses: Vec<_> = spends
        .iter()
        .filter(|s| s.count > RECURRING_MIN_COUNT)
        .cloned()
        .collect();
    recurring_expenses.sort_by(|a, b| b.average_per_transaction.total_cmp(&a.average_per_transaction));
    recurring_expenses.truncate(RECURRING_LIMIT);

    SavingsAnalysis {
        potential_savings: high_spending_categories.iter().map(|s| s.potential_savings).sum(),
        total_expenses: spends.iter().map(|s| s.total).sum(),
        high_spending_categories,
        recurring_expenses,
    }
}
