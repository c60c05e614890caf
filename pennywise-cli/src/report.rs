//! Plain-text rendering of an analysis

use pennywise_finance::Analysis;
use std::fmt::Write;

pub fn render_text(analysis: &Analysis, max_rows: usize) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, analysis, max_rows);
    out
}

fn write_report(out: &mut String, analysis: &Analysis, max_rows: usize) -> std::fmt::Result {
    let (Some(metrics), Some(advice)) = (&analysis.metrics, &analysis.advice) else {
        writeln!(
            out,
            "No valid transactions found ({} rows skipped).",
            analysis.skipped.len()
        )?;
        return Ok(());
    };

    let s = &metrics.summary;
    writeln!(out, "# Summary\n")?;
    writeln!(out, "Transactions: {} ({} rows skipped)", s.transaction_count, analysis.skipped.len())?;
    writeln!(out, "Income:       ${:.2}", s.total_income)?;
    writeln!(out, "Expenses:     ${:.2}", s.total_expenses)?;
    writeln!(out, "Net savings:  ${:.2}", s.net_savings)?;
    writeln!(out, "Savings rate: {:.1}%", s.savings_rate)?;
    writeln!(out, "Health score: {}/100", metrics.budget_health_score)?;

    writeln!(out, "\n## Categories\n")?;
    for (category, bucket) in &metrics.category_breakdown {
        writeln!(
            out,
            "- {} | count={} | expenses=${:.2} | income=${:.2}",
            category, bucket.count, bucket.expenses, bucket.income
        )?;
    }

    if let Some(monthly) = &metrics.monthly_averages {
        writeln!(out, "\n## Monthly averages ({} months)\n", monthly.months.len())?;
        writeln!(
            out,
            "Income ${:.2} | Expenses ${:.2} | Savings ${:.2}",
            monthly.average_monthly_income,
            monthly.average_monthly_expenses,
            monthly.average_monthly_savings
        )?;
    }

    writeln!(out, "\n## 50/30/20\n")?;
    for b in &advice.budget_rule {
        writeln!(out, "- {} target=${:.2} actual=${:.2} [{:?}]", b.name, b.target, b.actual, b.status)?;
    }

    writeln!(out, "\n## Recommendations\n")?;
    for r in &metrics.recommendations {
        writeln!(out, "- [{:?}/{:?}] {}: {}", r.priority, r.kind, r.title, r.description)?;
        for a in &r.actions {
            writeln!(out, "    * {a}")?;
        }
    }
    for sug in &advice.suggestions {
        writeln!(out, "- {} (save ~${:.2}): {}", sug.title, sug.potential_savings, sug.description)?;
    }

    if !advice.risk_areas.is_empty() {
        writeln!(out, "\n## Risks\n")?;
        for r in &advice.risk_areas {
            writeln!(out, "- {}: {}", r.title, r.description)?;
        }
    }

    if !advice.opportunities.is_empty() {
        writeln!(out, "\n## Opportunities\n")?;
        for o in &advice.opportunities {
            writeln!(out, "- {} (save ~${:.2}): {}", o.title, o.estimated_savings, o.description)?;
        }
    }

    if !analysis.insights.is_empty() {
        writeln!(out, "\n## Insights\n")?;
        for i in &analysis.insights {
            writeln!(out, "- {}: {} ({})", i.title, i.description, i.recommendation)?;
        }
    }

    if let Some(sav) = &analysis.savings {
        if !sav.high_spending_categories.is_empty() || !sav.recurring_expenses.is_empty() {
            writeln!(out, "\n## Savings\n")?;
            for c in &sav.high_spending_categories {
                writeln!(
                    out,
                    "- {}: ${:.2} over {} (cut 20%: ~${:.2})",
                    c.category, c.total, c.count, c.potential_savings
                )?;
            }
            for c in &sav.recurring_expenses {
                writeln!(out, "- recurring {}: avg ${:.2} x{}", c.category, c.average_per_transaction, c.count)?;
            }
            writeln!(out, "Potential savings: ${:.2}", sav.potential_savings)?;
        }
    }

    if let Some(fund) = &analysis.emergency_fund {
        writeln!(
            out,
            "\nEmergency fund: {:.1} periods covered ({:?}) | debt-to-income {:.1}%",
            fund.months_covered, fund.adequacy, analysis.debt_to_income_ratio
        )?;
    }

    writeln!(out, "\n## Ledger (first {})\n", max_rows.min(analysis.ledger.len()))?;
    for t in analysis.ledger.iter().take(max_rows) {
        writeln!(
            out,
            "{} | {:>10.2} | {} | {} ({:.1})",
            t.date, t.amount, t.description, t.category, t.confidence
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pennywise_finance::analyze;
    use pennywise_ingest::sample_rows;

    #[test]
    fn test_renders_sections() {
        let analysis = analyze(&sample_rows()).unwrap();
        let text = render_text(&analysis, 3);
        assert!(text.contains("# Summary"));
        assert!(text.contains("Income:       $2500.00"));
        assert!(text.contains("## 50/30/20"));
        assert!(text.contains("## Ledger (first 3)"));
        assert!(text.contains("2024-01-01 |     -45.67 | Grocery Store | Food & Dining (0.6)"));
    }

    #[test]
    fn test_renders_savings_section() {
        let analysis = analyze(&sample_rows()).unwrap();
        let text = render_text(&analysis, 10);
        // Grocery, restaurant and coffee rows: 118.06 over three transactions
        assert!(text.contains("## Savings"));
        assert!(text.contains("- Food & Dining: $118.06 over 3 (cut 20%: ~$23.61)"));
        assert!(text.contains("- recurring Food & Dining: avg $39.35 x3"));
    }

    #[test]
    fn test_renders_no_data_notice() {
        let analysis = analyze(&[]).unwrap();
        assert_eq!(render_text(&analysis, 10), "No valid transactions found (0 rows skipped).\n");
    }
}
