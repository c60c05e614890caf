//! Transaction-level advice: 50/30/20 rule status, smart suggestions,
//! risk areas and savings opportunities.

use pennywise_core::{CategorizedTransaction, Category};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::budget_metrics::{BudgetMetrics, BudgetSummary};

pub const SUBSCRIPTION_KEYWORDS: &[&str] = &[
    "netflix",
    "spotify",
    "hulu",
    "amazon prime",
    "youtube",
    "subscription",
    "monthly",
];
const DINING_OUT_KEYWORDS: &[&str] = &["restaurant", "cafe", "dining"];
const GROCERY_KEYWORDS: &[&str] = &["grocery", "supermarket", "market"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RuleStatus {
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "danger")]
    Danger,
}

/// One leg of the 50/30/20 rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRuleBucket {
    pub name: String,
    pub target: f64,
    pub actual: f64,
    /// Share of income this leg targets
    pub percentage: u8,
    pub status: RuleStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub potential_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskArea {
    pub title: String,
    pub description: String,
    pub current_amount: f64,
    pub recommended_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub title: String,
    pub description: String,
    pub estimated_savings: f64,
}

/// Full advice bundle for one ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub budget_rule: Vec<BudgetRuleBucket>,
    pub suggestions: Vec<Suggestion>,
    pub risk_areas: Vec<RiskArea>,
    pub opportunities: Vec<Opportunity>,
    pub summary: BudgetSummary,
}

/// Derive advice from the ledger and its metrics
pub fn recommend(txns: &[CategorizedTransaction], metrics: &BudgetMetrics) -> Advice {
    let summary = &metrics.summary;
    let advice = Advice {
        budget_rule: budget_rule(summary),
        suggestions: smart_suggestions(metrics),
        risk_areas: risk_areas(txns, metrics),
        opportunities: savings_opportunities(txns, summary.total_expenses),
        summary: summary.clone(),
    };

    info!(
        suggestions = advice.suggestions.len(),
        risks = advice.risk_areas.len(),
        opportunities = advice.opportunities.len(),
        "generated recommendations"
    );
    advice
}

/// Needs 50% / wants 30% / savings 20% of income
pub fn budget_rule(summary: &BudgetSummary) -> Vec<BudgetRuleBucket> {
    let income = summary.total_income;
    let expenses = summary.total_expenses;
    let needs_cap = income * 0.5;

    vec![
        BudgetRuleBucket {
            name: "Needs (50%)".to_string(),
            target: needs_cap,
            actual: expenses.min(needs_cap),
            percentage: 50,
            status: if expenses <= needs_cap {
                RuleStatus::Good
            } else {
                RuleStatus::Danger
            },
        },
        BudgetRuleBucket {
            name: "Wants (30%)".to_string(),
            target: income * 0.3,
            actual: (expenses - needs_cap).max(0.0),
            percentage: 30,
            status: if expenses <= income * 0.8 {
                RuleStatus::Good
            } else {
                RuleStatus::Warning
            },
        },
        BudgetRuleBucket {
            name: "Savings (20%)".to_string(),
            target: income * 0.2,
            actual: summary.net_savings.max(0.0),
            percentage: 20,
            status: if summary.net_savings >= income * 0.2 {
                RuleStatus::Good
            } else {
                RuleStatus::Warning
            },
        },
    ]
}

fn expenses_in(metrics: &BudgetMetrics, category: Category) -> f64 {
    metrics
        .category_breakdown
        .get(&category)
        .map(|b| b.expenses)
        .unwrap_or(0.0)
}

fn suggestion(title: &str, description: &str, potential_savings: f64) -> Suggestion {
    Suggestion {
        title: title.to_string(),
        description: description.to_string(),
        potential_savings,
    }
}

/// Every qualifying suggestion, or a single "keep going" one
pub fn smart_suggestions(metrics: &BudgetMetrics) -> Vec<Suggestion> {
    let income = metrics.summary.total_income;
    let mut out = Vec::new();

    let food = expenses_in(metrics, Category::FoodDining);
    if food > income * 0.15 {
        out.push(suggestion(
            "Optimize Food Spending",
            "Your food spending is above the recommended 15% of income. Consider meal planning and reducing dining out.",
            food * 0.2,
        ));
    }

    let transport = expenses_in(metrics, Category::Transportation);
    if transport > income * 0.1 {
        out.push(suggestion(
            "Review Transportation Costs",
            "Transportation costs are high. Consider carpooling, public transit, or reviewing insurance rates.",
            transport * 0.15,
        ));
    }

    let entertainment = expenses_in(metrics, Category::Entertainment);
    if entertainment > income * 0.1 {
        out.push(suggestion(
            "Balance Entertainment Budget",
            "Entertainment spending could be optimized. Look for free activities and bundle subscriptions.",
            entertainment * 0.25,
        ));
    }

    if metrics.summary.expenses_exceed(0.8) {
        out.push(suggestion(
            "Emergency Fund Priority",
            "Focus on building an emergency fund. Aim to save 3-6 months of expenses.",
            income * 0.1,
        ));
    }

    if out.is_empty() {
        out.push(suggestion(
            "Maintain Good Habits",
            "Your spending is well-balanced! Keep up the good work and consider increasing your savings rate.",
            income * 0.05,
        ));
    }

    out
}

/// Categories above 20% of income, plus thin income streams
pub fn risk_areas(txns: &[CategorizedTransaction], metrics: &BudgetMetrics) -> Vec<RiskArea> {
    let income = metrics.summary.total_income;
    let mut out = Vec::new();

    for (category, bucket) in &metrics.category_breakdown {
        if bucket.expenses > 0.0 && bucket.expenses > income * 0.2 {
            let description = if income > 0.0 {
                format!(
                    "This category represents {:.1}% of your income, which is above recommended levels.",
                    bucket.expenses / income * 100.0
                )
            } else {
                "This category has spending but no income recorded to cover it.".to_string()
            };
            out.push(RiskArea {
                title: format!("High {category} Spending"),
                description,
                current_amount: bucket.expenses,
                recommended_amount: income * 0.15,
            });
        }
    }

    if txns.iter().filter(|t| t.is_income()).count() < 2 {
        out.push(RiskArea {
            title: "Irregular Income".to_string(),
            description: "You have limited income transactions. Consider diversifying income sources for financial stability.".to_string(),
            current_amount: 0.0,
            recommended_amount: 0.0,
        });
    }

    out
}

fn expense_total_where<F>(txns: &[CategorizedTransaction], pred: F) -> f64
where
    F: Fn(&CategorizedTransaction) -> bool,
{
    txns.iter()
        .filter(|t| t.is_expense() && pred(*t))
        .map(|t| t.abs_amount())
        .sum()
}

pub fn savings_opportunities(txns: &[CategorizedTransaction], total_expenses: f64) -> Vec<Opportunity> {
    let mut out = Vec::new();

    let subscriptions = expense_total_where(txns, |t| t.description_contains_any(SUBSCRIPTION_KEYWORDS));
    if subscriptions > 50.0 {
        out.push(Opportunity {
            title: "Review Subscriptions".to_string(),
            description: "Multiple subscriptions detected. Consider bundling services or canceling unused ones.".to_string(),
            estimated_savings: subscriptions * 0.3,
        });
    }

    let is_food = |t: &CategorizedTransaction| t.category == Category::FoodDining;
    let dining_out = expense_total_where(txns, |t| is_food(t) && t.description_contains_any(DINING_OUT_KEYWORDS));
    let groceries = expense_total_where(txns, |t| is_food(t) && t.description_contains_any(GROCERY_KEYWORDS));
    if dining_out > groceries * 0.8 {
        out.push(Opportunity {
            title: "Optimize Food Budget".to_string(),
            description: "Dining out costs are high relative to groceries. Meal planning could save significantly.".to_string(),
            estimated_savings: dining_out * 0.4,
        });
    }

    if total_expenses > 2000.0 {
        out.push(Opportunity {
            title: "Bulk Purchasing".to_string(),
            description: "Consider bulk purchases for frequently used items to reduce per-unit costs.".to_string(),
            estimated_savings: total_expenses * 0.05,
        });
    }

    out
}
