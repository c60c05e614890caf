//! End-to-end ledger analysis: raw rows → normalized → categorized →
//! metrics → advice, plus the supplementary insights.
//!
//! Stages run strictly in order and share no state between invocations.

use anyhow::Result;
use pennywise_core::CategorizedTransaction;
use pennywise_ingest::{RawRow, RowNormalizer, SkippedRow};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::advisor::{Advice, recommend};
use crate::budget_metrics::{BudgetMetrics, aggregate};
use crate::category_rules::categorize_all;
use crate::insights::{EmergencyFund, SpendingInsight, debt_to_income_ratio, emergency_fund, spending_insights};
use crate::savings::{SavingsAnalysis, savings_analysis};

/// Result handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub ledger: Vec<CategorizedTransaction>,
    pub skipped: Vec<SkippedRow>,
    /// `None` means "no data", not an error
    pub metrics: Option<BudgetMetrics>,
    pub advice: Option<Advice>,
    pub insights: Vec<SpendingInsight>,
    pub savings: Option<SavingsAnalysis>,
    pub emergency_fund: Option<EmergencyFund>,
    pub debt_to_income_ratio: f64,
}

impl Analysis {
    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }
}

/// Completed pipeline stage, reported in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Normalized,
    Categorized,
    Aggregated,
    Recommended,
}

/// Simulated processing time before the slower stages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageDelays {
    pub categorize: Duration,
    pub recommend: Duration,
}

/// Run the whole pipeline synchronously
pub fn analyze(rows: &[RawRow]) -> Result<Analysis> {
    let normalizer = RowNormalizer::new()?;
    Ok(analyze_with(&normalizer, rows))
}

/// Same as `analyze`, reusing an existing normalizer
pub fn analyze_with(normalizer: &RowNormalizer, rows: &[RawRow]) -> Analysis {
    let report = normalizer.normalize_with_report(rows);
    let ledger = categorize_all(&report.transactions);
    let metrics = aggregate(&ledger);
    let advice = metrics.as_ref().map(|m| recommend(&ledger, m));
    assemble(ledger, report.skipped, metrics, advice)
}

/// Run the pipeline as awaitable stages, reporting each completed stage.
///
/// Dropping the future abandons the run; nothing is retained.
pub async fn analyze_staged<F>(rows: &[RawRow], delays: StageDelays, mut on_stage: F) -> Result<Analysis>
where
    F: FnMut(Stage),
{
    let normalizer = RowNormalizer::new()?;

    let report = normalizer.normalize_with_report(rows);
    on_stage(Stage::Normalized);

    pause(delays.categorize).await;
    let ledger = categorize_all(&report.transactions);
    on_stage(Stage::Categorized);

    let metrics = aggregate(&ledger);
    on_stage(Stage::Aggregated);

    pause(delays.recommend).await;
    let advice = metrics.as_ref().map(|m| recommend(&ledger, m));
    on_stage(Stage::Recommended);

    Ok(assemble(ledger, report.skipped, metrics, advice))
}

async fn pause(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}

fn assemble(
    ledger: Vec<CategorizedTransaction>,
    skipped: Vec<SkippedRow>,
    metrics: Option<BudgetMetrics>,
    advice: Option<Advice>,
) -> Analysis {
    let insights = metrics.as_ref().map(spending_insights).unwrap_or_default();
    let savings = metrics.as_ref().map(savings_analysis);
    let emergency_fund = metrics.as_ref().map(|m| emergency_fund(&m.summary));
    let debt_to_income_ratio = debt_to_income_ratio(&ledger);

    if metrics.is_none() {
        info!(skipped = skipped.len(), "no valid transactions to analyze");
    }

    Analysis {
        ledger,
        skipped,
        metrics,
        advice,
        insights,
        savings,
        emergency_fund,
        debt_to_income_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pennywise_ingest::sample_rows;

    #[test]
    fn test_empty_input_is_no_data() {
        let analysis = analyze(&[]).unwrap();
        assert!(analysis.is_empty());
        assert!(analysis.metrics.is_none());
        assert!(analysis.advice.is_none());
        assert!(analysis.savings.is_none());
        assert!(analysis.insights.is_empty());
    }

    #[test]
    fn test_all_rows_invalid_is_no_data() {
        let rows = vec![RawRow::new().with("Date", "nope").with("Description", "x").with("Amount", "1")];
        let analysis = analyze(&rows).unwrap();
        assert!(analysis.metrics.is_none());
        assert_eq!(analysis.skipped.len(), 1);
    }

    #[test]
    fn test_sample_runs_end_to_end() {
        let analysis = analyze(&sample_rows()).unwrap();
        assert_eq!(analysis.ledger.len(), 10);
        assert!(analysis.metrics.is_some());
        assert!(analysis.advice.is_some());
        assert!(analysis.emergency_fund.is_some());
    }

    #[tokio::test]
    async fn test_staged_reports_in_order() {
        let mut seen = Vec::new();
        let delays = StageDelays {
            categorize: Duration::from_millis(5),
            recommend: Duration::ZERO,
        };
        let staged = analyze_staged(&sample_rows(), delays, |s| seen.push(s)).await.unwrap();
        assert_eq!(
            seen,
            vec![Stage::Normalized, Stage::Categorized, Stage::Aggregated, Stage::Recommended]
        );

        let direct = analyze(&sample_rows()).unwrap();
        assert_eq!(staged, direct);
    }
}
