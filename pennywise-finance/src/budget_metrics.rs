//! Budget metrics over a categorized ledger: totals, per-category buckets,
//! monthly averages, spending patterns, a 0-100 health score and
//! budget-level recommendations.

use chrono::{Datelike, NaiveDate, Weekday};
use pennywise_core::{CategorizedTransaction, Category, Priority, Recommendation, RecommendationKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Ledger-wide totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_savings: f64,
    /// Percent of income kept; 0 when there is no income
    pub savings_rate: f64,
    pub transaction_count: usize,
}

impl BudgetSummary {
    pub fn from_transactions(txns: &[CategorizedTransaction]) -> Self {
        let total_income: f64 = txns.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
        let total_expenses: f64 = txns.iter().filter(|t| t.is_expense()).map(|t| t.abs_amount()).sum();
        let net_savings = total_income - total_expenses;
        let savings_rate = if total_income > 0.0 {
            net_savings / total_income * 100.0
        } else {
            0.0
        };

        Self {
            total_income,
            total_expenses,
            net_savings,
            savings_rate,
            transaction_count: txns.len(),
        }
    }

    /// Expenses as a fraction of income exceed `ratio`
    pub fn expenses_exceed(&self, ratio: f64) -> bool {
        self.total_expenses > self.total_income * ratio
    }
}

/// Per-category accumulator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    /// Sum of absolute amounts
    pub total: f64,
    pub count: usize,
    pub expenses: f64,
    pub income: f64,
}

impl CategoryBucket {
    fn add(&mut self, amount: f64) {
        self.total += amount.abs();
        self.count += 1;
        if amount < 0.0 {
            self.expenses += amount.abs();
        } else {
            self.income += amount;
        }
    }
}

/// Income and expenses for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotals {
    /// YYYY-MM
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAverages {
    pub average_monthly_income: f64,
    pub average_monthly_expenses: f64,
    pub average_monthly_savings: f64,
    /// Ascending by month
    pub months: Vec<MonthTotals>,
}

/// Day-of-month bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MonthPhase {
    #[serde(rename = "Early Month")]
    Early,
    #[serde(rename = "Mid Month")]
    Mid,
    #[serde(rename = "Late Month")]
    Late,
}

impl MonthPhase {
    /// Early 1-10, Mid 11-20, Late 21 onwards
    pub fn of(date: NaiveDate) -> Self {
        match date.day() {
            1..=10 => MonthPhase::Early,
            11..=20 => MonthPhase::Mid,
            _ => MonthPhase::Late,
        }
    }
}

/// Running expense statistics for a category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrend {
    pub total: f64,
    pub count: usize,
    pub average: f64,
}

/// An expense more than twice its category's average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrregularExpense {
    pub category: Category,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub average_for_category: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendingPatterns {
    /// Expense total keyed by weekday name ("Monday" ...)
    pub day_of_week: BTreeMap<String, f64>,
    pub time_of_month: BTreeMap<MonthPhase, f64>,
    /// Expense-only statistics
    pub category_trends: BTreeMap<Category, CategoryTrend>,
    pub irregular_expenses: Vec<IrregularExpense>,
}

/// Everything derived from one categorized ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetMetrics {
    pub summary: BudgetSummary,
    pub category_breakdown: BTreeMap<Category, CategoryBucket>,
    pub monthly_averages: Option<MonthlyAverages>,
    pub spending_patterns: SpendingPatterns,
    /// 0-100
    pub budget_health_score: u8,
    pub recommendations: Vec<Recommendation>,
}

/// Compute metrics for a ledger; `None` when there are no transactions.
pub fn aggregate(txns: &[CategorizedTransaction]) -> Option<BudgetMetrics> {
    if txns.is_empty() {
        return None;
    }

    let summary = BudgetSummary::from_transactions(txns);
    let budget_health_score = budget_health_score(summary.total_income, summary.total_expenses, summary.savings_rate);
    let recommendations = budget_recommendations(&summary);

    info!(
        transactions = summary.transaction_count,
        income = summary.total_income,
        expenses = summary.total_expenses,
        score = budget_health_score,
        "aggregated budget metrics"
    );

    Some(BudgetMetrics {
        category_breakdown: category_breakdown(txns),
        monthly_averages: monthly_averages(txns),
        spending_patterns: spending_patterns(txns),
        budget_health_score,
        recommendations,
        summary,
    })
}

pub fn category_breakdown(txns: &[CategorizedTransaction]) -> BTreeMap<Category, CategoryBucket> {
    let mut buckets: BTreeMap<Category, CategoryBucket> = BTreeMap::new();
    for t in txns {
        buckets.entry(t.category).or_default().add(t.amount);
    }
    buckets
}

/// Average income/expenses across calendar months; `None` without data
pub fn monthly_averages(txns: &[CategorizedTransaction]) -> Option<MonthlyAverages> {
    let mut by_month: BTreeMap<String, MonthTotals> = BTreeMap::new();
    for t in txns {
        let key = t.month_key();
        let entry = by_month.entry(key.clone()).or_insert_with(|| MonthTotals {
            month: key,
            income: 0.0,
            expenses: 0.0,
            count: 0,
        });
        entry.income += t.amount.max(0.0);
        entry.expenses += t.amount.min(0.0).abs();
        entry.count += 1;
    }

    if by_month.is_empty() {
        return None;
    }

    let months: Vec<MonthTotals> = by_month.into_values().collect();
    let n = months.len() as f64;
    let average_monthly_income = months.iter().map(|m| m.income).sum::<f64>() / n;
    let average_monthly_expenses = months.iter().map(|m| m.expenses).sum::<f64>() / n;

    Some(MonthlyAverages {
        average_monthly_income,
        average_monthly_expenses,
        average_monthly_savings: average_monthly_income - average_monthly_expenses,
        months,
    })
}

pub fn spending_patterns(txns: &[CategorizedTransaction]) -> SpendingPatterns {
    let mut patterns = SpendingPatterns::default();

    for t in txns.iter().filter(|t| t.is_expense()) {
        let amount = t.abs_amount();
        *patterns
            .day_of_week
            .entry(weekday_name(t.date.weekday()).to_string())
            .or_insert(0.0) += amount;
        *patterns.time_of_month.entry(MonthPhase::of(t.date)).or_insert(0.0) += amount;

        let trend = patterns.category_trends.entry(t.category).or_default();
        trend.total += amount;
        trend.count += 1;
        trend.average = trend.total / trend.count as f64;
    }

    patterns.irregular_expenses = txns
        .iter()
        .filter(|t| t.is_expense())
        .filter_map(|t| {
            let average = patterns.category_trends.get(&t.category)?.average;
            (t.abs_amount() > average * 2.0).then(|| IrregularExpense {
                category: t.category,
                amount: t.abs_amount(),
                date: t.date,
                description: t.description.clone(),
                average_for_category: average,
            })
        })
        .collect();

    patterns
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Composite 0-100 score from expense ratio and savings rate
pub fn budget_health_score(total_income: f64, total_expenses: f64, savings_rate: f64) -> u8 {
    let mut score: i32 = 100;

    if total_expenses > total_income {
        score -= 30;
    } else if total_expenses > total_income * 0.9 {
        score -= 15;
    } else if total_expenses > total_income * 0.8 {
        score -= 5;
    }

    if savings_rate >= 20.0 {
        score += 20;
    } else if savings_rate >= 15.0 {
        score += 15;
    } else if savings_rate >= 10.0 {
        score += 10;
    } else if savings_rate >= 5.0 {
        score += 5;
    }

    if savings_rate < 0.0 {
        score -= 20;
    } else if savings_rate < 5.0 {
        score -= 10;
    }

    score.clamp(0, 100) as u8
}

/// Budget-level advice; several may apply at once
pub fn budget_recommendations(summary: &BudgetSummary) -> Vec<Recommendation> {
    let mut recs = Vec::new();
    let rate = summary.savings_rate;

    if summary.total_expenses > summary.total_income {
        recs.push(
            Recommendation::new(
                Priority::High,
                RecommendationKind::Critical,
                "Emergency: Spending Exceeds Income",
                "Your expenses are higher than your income. Immediate action is required.",
            )
            .with_actions(&[
                "Review and cut non-essential expenses",
                "Consider additional income sources",
                "Create a strict budget plan",
            ]),
        );
    }

    if rate < 10.0 {
        recs.push(
            Recommendation::new(
                Priority::Medium,
                RecommendationKind::Warning,
                "Low Savings Rate",
                format!("Your savings rate is {rate:.1}%, below the recommended 10-20%."),
            )
            .with_actions(&[
                "Aim to save at least 10% of income",
                "Set up automatic savings transfers",
                "Review recurring expenses",
            ]),
        );
    }

    if summary.expenses_exceed(0.8) {
        recs.push(
            Recommendation::new(
                Priority::Medium,
                RecommendationKind::Info,
                "High Expense Ratio",
                "Your expenses represent a high percentage of income, limiting savings potential.",
            )
            .with_actions(&[
                "Review the 50/30/20 budget rule",
                "Identify areas for cost reduction",
                "Consider lifestyle adjustments",
            ]),
        );
    }

    if rate >= 20.0 {
        recs.push(
            Recommendation::new(
                Priority::Low,
                RecommendationKind::Success,
                "Excellent Savings Rate",
                format!("Great job! Your {rate:.1}% savings rate is above the recommended 20%."),
            )
            .with_actions(&[
                "Consider investment opportunities",
                "Build emergency fund",
                "Plan for long-term goals",
            ]),
        );
    }

    recs
}
