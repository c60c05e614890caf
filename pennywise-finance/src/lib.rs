//! pennywise-finance: categorization, budget metrics, recommendations and the
//! analysis pipeline

pub mod advisor;
pub mod budget_metrics;
pub mod category_rules;
pub mod insights;
pub mod pipeline;
pub mod savings;

pub use advisor::{Advice, BudgetRuleBucket, Opportunity, RiskArea, RuleStatus, Suggestion, recommend};
pub use budget_metrics::{BudgetMetrics, BudgetSummary, CategoryBucket, MonthPhase, aggregate};
pub use category_rules::{categorize, categorize_all};
pub use insights::{EmergencyFund, FundAdequacy, InsightKind, SpendingInsight};
pub use pipeline::{Analysis, Stage, StageDelays, analyze, analyze_staged, analyze_with};
pub use savings::SavingsAnalysis;
