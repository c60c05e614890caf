use pennywise_core::Category;
use pennywise_finance::{RuleStatus, analyze};
use pennywise_ingest::{RawRow, read_csv_rows_from_reader};

fn row(date: &str, desc: &str, amount: &str, category: &str) -> RawRow {
    RawRow::new()
        .with("Date", date)
        .with("Description", desc)
        .with("Amount", amount)
        .with("Category", category)
}

fn five_rows() -> Vec<RawRow> {
    vec![
        row("2024-01-01", "Grocery Store", "-45.67", "Food & Dining"),
        row("2024-01-02", "Gas Station", "-32.50", "Transportation"),
        row("2024-01-03", "Salary Deposit", "2500.00", "Income"),
        row("2024-01-04", "Netflix Subscription", "-15.99", "Entertainment"),
        row("2024-01-05", "Restaurant", "-67.89", "Food & Dining"),
    ]
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// Five-row statement: totals, savings rate and the savings leg of 50/30/20.
#[test]
fn test_five_row_statement_totals() {
    let analysis = analyze(&five_rows()).unwrap();
    let metrics = analysis.metrics.as_ref().unwrap();

    assert!(close(metrics.summary.total_income, 2500.00));
    assert!(close(metrics.summary.total_expenses, 162.05));
    assert!(close(metrics.summary.net_savings, 2337.95));
    assert!((metrics.summary.savings_rate - 93.5).abs() < 0.1);

    let advice = analysis.advice.as_ref().unwrap();
    let savings_leg = advice.budget_rule.iter().find(|b| b.name.starts_with("Savings")).unwrap();
    assert_eq!(savings_leg.status, RuleStatus::Good);
    assert_eq!(advice.summary, metrics.summary);
}

/// Categories come from keywords and sign, never from the supplied column.
#[test]
fn test_five_row_statement_categories() {
    let analysis = analyze(&five_rows()).unwrap();
    let cats: Vec<_> = analysis.ledger.iter().map(|t| t.category).collect();
    assert_eq!(
        cats,
        vec![
            Category::FoodDining,
            Category::Transportation,
            Category::Income,
            Category::Entertainment,
            Category::FoodDining,
        ]
    );
    assert_eq!(analysis.ledger[1].original_category.as_deref(), Some("Transportation"));
    assert!(analysis.ledger.iter().all(|t| (0.3..=0.9).contains(&t.confidence)));
}

#[test]
fn test_breakdown_reconciles_with_summary() {
    let analysis = analyze(&five_rows()).unwrap();
    let metrics = analysis.metrics.unwrap();
    let income: f64 = metrics.category_breakdown.values().map(|b| b.income).sum();
    let expenses: f64 = metrics.category_breakdown.values().map(|b| b.expenses).sum();
    assert!(close(income, metrics.summary.total_income));
    assert!(close(expenses, metrics.summary.total_expenses));
    assert!(metrics.budget_health_score <= 100);
}

/// Single salary deposit is flagged as irregular income; restaurant spend beats groceries.
#[test]
fn test_five_row_statement_advice() {
    let advice = analyze(&five_rows()).unwrap().advice.unwrap();
    assert!(advice.risk_areas.iter().any(|r| r.title == "Irregular Income"));
    assert!(advice.opportunities.iter().any(|o| o.title == "Optimize Food Budget"));
    assert_eq!(advice.suggestions.len(), 1);
    assert_eq!(advice.suggestions[0].title, "Maintain Good Habits");
}

/// Messy export: mixed date formats, currency noise, junk rows.
#[test]
fn test_messy_csv_export() {
    let csv = "date,DESC,AMOUNT,cat\n\
               31/12/2024,Starbucks Coffee Run,-$4.50,\n\
               13/02/24,PAYROLL ACME,\"$3,000.00\",\n\
               31/02/2024,Impossible date,-10.00,\n\
               2024-03-01,Zero row,0.00,\n\
               2024-03-02,,-5.00,\n\
               03/13/2024,Uber trip,(25.00),Travel\n";

    let rows = read_csv_rows_from_reader(csv.as_bytes()).unwrap();
    let analysis = analyze(&rows).unwrap();

    assert_eq!(analysis.ledger.len(), 3);
    assert_eq!(analysis.skipped.len(), 3);

    let dates: Vec<_> = analysis.ledger.iter().map(|t| t.date.to_string()).collect();
    assert_eq!(dates, vec!["2024-12-31", "2024-02-13", "2024-03-13"]);

    assert_eq!(analysis.ledger[0].category, Category::FoodDining);
    assert_eq!(analysis.ledger[1].category, Category::Income);
    assert_eq!(analysis.ledger[2].category, Category::Transportation);
    assert_eq!(analysis.ledger[2].amount, -25.0);
    assert_eq!(analysis.ledger[2].original_category.as_deref(), Some("Travel"));
}

#[test]
fn test_analysis_serializes_for_presentation() {
    let analysis = analyze(&five_rows()).unwrap();
    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["ledger"][0]["date"], "2024-01-01");
    assert_eq!(json["ledger"][0]["category"], "Food & Dining");
    assert_eq!(json["metrics"]["category_breakdown"]["Food & Dining"]["count"], 2);
    assert_eq!(json["advice"]["budget_rule"][2]["status"], "good");
}
