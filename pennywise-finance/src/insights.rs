//! Spending insights and ratio checks layered on top of budget metrics

use pennywise_core::CategorizedTransaction;
use serde::{Deserialize, Serialize};

use crate::budget_metrics::{BudgetMetrics, BudgetSummary};

const DEBT_KEYWORDS: &[&str] = &["loan", "credit", "mortgage"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InsightKind {
    #[serde(rename = "pattern")]
    Pattern,
    #[serde(rename = "trend")]
    Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingInsight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub recommendation: String,
}

/// Most expensive weekday, and the change between the last two months with spending
pub fn spending_insights(metrics: &BudgetMetrics) -> Vec<SpendingInsight> {
    let mut out = Vec::new();

    if let Some((day, total)) = metrics
        .spending_patterns
        .day_of_week
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
    {
        out.push(SpendingInsight {
            kind: InsightKind::Pattern,
            title: "Most Expensive Day".to_string(),
            description: format!("You tend to spend the most on {day}s (${total:.2} total)"),
            recommendation: "Consider planning activities on other days to balance spending".to_string(),
        });
    }

    let spending_months: Vec<_> = metrics
        .monthly_averages
        .iter()
        .flat_map(|m| m.months.iter())
        .filter(|m| m.expenses > 0.0)
        .collect();

    if let [.., previous, recent] = spending_months.as_slice() {
        let change = recent.expenses - previous.expenses;
        let insight = if change > 0.0 {
            SpendingInsight {
                kind: InsightKind::Trend,
                title: "Spending Increase".to_string(),
                description: format!(
                    "Your spending increased by ${change:.2} from {} to {}",
                    previous.month, recent.month
                ),
                recommendation: "Review recent purchases to identify areas for cost reduction".to_string(),
            }
        } else {
            SpendingInsight {
                kind: InsightKind::Trend,
                title: "Spending Decrease".to_string(),
                description: format!(
                    "Great job! Your spending decreased by ${:.2} from {} to {}",
                    change.abs(),
                    previous.month,
                    recent.month
                ),
                recommendation: "Keep up the good work and consider increasing your savings".to_string(),
            }
        };
        out.push(insight);
    }

    out
}

/// Debt-like payments (loan, credit, mortgage) as a percent of income
pub fn debt_to_income_ratio(txns: &[CategorizedTransaction]) -> f64 {
    let income: f64 = txns.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let debt: f64 = txns
        .iter()
        .filter(|t| t.is_expense() && t.description_contains_any(DEBT_KEYWORDS))
        .map(|t| t.abs_amount())
        .sum();

    if income > 0.0 { debt / income * 100.0 } else { 0.0 }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FundAdequacy {
    #[serde(rename = "excellent")]
    Excellent,
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "fair")]
    Fair,
    #[serde(rename = "poor")]
    Poor,
}

impl FundAdequacy {
    pub fn from_months(months_covered: f64) -> Self {
        if months_covered >= 6.0 {
            FundAdequacy::Excellent
        } else if months_covered >= 3.0 {
            FundAdequacy::Good
        } else if months_covered >= 1.0 {
            FundAdequacy::Fair
        } else {
            FundAdequacy::Poor
        }
    }
}

/// How many periods of spending the net savings would cover
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmergencyFund {
    pub monthly_expenses: f64,
    pub total_savings: f64,
    pub months_covered: f64,
    pub adequacy: FundAdequacy,
}

pub fn emergency_fund(summary: &BudgetSummary) -> EmergencyFund {
    let monthly_expenses = summary.total_expenses;
    let total_savings = summary.total_income - summary.total_expenses;
    let months_covered = if monthly_expenses > 0.0 {
        total_savings / monthly_expenses
    } else {
        0.0
    };

    EmergencyFund {
        monthly_expenses,
        total_savings,
        months_covered,
        adequacy: FundAdequacy::from_months(months_covered),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget_metrics::aggregate;
    use chrono::NaiveDate;
    use pennywise_core::{Category, NormalizedTransaction};

    fn txn(date: (i32, u32, u32), desc: &str, amount: f64) -> CategorizedTransaction {
        let d = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        let category = if amount > 0.0 { Category::Income } else { Category::Uncategorized };
        CategorizedTransaction::from_normalized(&NormalizedTransaction::new(d, desc, amount), category, 0.3)
    }

    #[test]
    fn test_most_expensive_day() {
        let txns = vec![
            // Monday
            txn((2024, 1, 1), "a", -10.0),
            // Saturday
            txn((2024, 1, 6), "b", -40.0),
            txn((2024, 1, 13), "c", -5.0),
        ];
        let insights = spending_insights(&aggregate(&txns).unwrap());
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Pattern);
        assert!(insights[0].description.contains("Saturdays"));
        assert!(insights[0].description.contains("$45.00"));
    }

    #[test]
    fn test_month_over_month_trend() {
        let txns = vec![
            txn((2024, 1, 5), "a", -100.0),
            txn((2024, 2, 5), "b", -150.0),
            // Income-only month does not count as a spending month
            txn((2024, 3, 1), "salary", 1000.0),
        ];
        let insights = spending_insights(&aggregate(&txns).unwrap());
        let trend = insights.iter().find(|i| i.kind == InsightKind::Trend).unwrap();
        assert_eq!(trend.title, "Spending Increase");
        assert!(trend.description.contains("$50.00 from 2024-01 to 2024-02"));

        let txns = vec![txn((2024, 1, 5), "a", -100.0), txn((2024, 2, 5), "b", -60.0)];
        let insights = spending_insights(&aggregate(&txns).unwrap());
        assert_eq!(insights[1].title, "Spending Decrease");
    }

    #[test]
    fn test_single_month_has_no_trend() {
        let txns = vec![txn((2024, 1, 5), "a", -100.0)];
        let insights = spending_insights(&aggregate(&txns).unwrap());
        assert!(insights.iter().all(|i| i.kind != InsightKind::Trend));
    }

    #[test]
    fn test_debt_to_income() {
        let txns = vec![
            txn((2024, 1, 1), "Salary", 2000.0),
            txn((2024, 1, 2), "Student Loan payment", -200.0),
            txn((2024, 1, 3), "Mortgage", -300.0),
            txn((2024, 1, 4), "Pizza", -50.0),
        ];
        assert!((debt_to_income_ratio(&txns) - 25.0).abs() < 1e-9);
        assert_eq!(debt_to_income_ratio(&txns[1..]), 0.0);
    }

    #[test]
    fn test_emergency_fund_adequacy() {
        let summary = |income: f64, expenses: f64| BudgetSummary {
            total_income: income,
            total_expenses: expenses,
            ..BudgetSummary::default()
        };
        assert_eq!(emergency_fund(&summary(7000.0, 1000.0)).adequacy, FundAdequacy::Excellent);
        assert_eq!(emergency_fund(&summary(4000.0, 1000.0)).adequacy, FundAdequacy::Good);
        assert_eq!(emergency_fund(&summary(2000.0, 1000.0)).adequacy, FundAdequacy::Fair);
        assert_eq!(emergency_fund(&summary(1500.0, 1000.0)).adequacy, FundAdequacy::Poor);

        let none = emergency_fund(&summary(1000.0, 0.0));
        assert_eq!(none.months_covered, 0.0);
        assert_eq!(none.adequacy, FundAdequacy::Poor);
    }
}
