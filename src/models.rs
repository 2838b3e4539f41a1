use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Authenticated identity cached in browser storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub display_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TxnType {
    #[default]
    Income,
    Expense,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Income => "Income",
            TxnType::Expense => "Expense",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Income" => Some(TxnType::Income),
            "Expense" => Some(TxnType::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    #[serde(rename = "type_")]
    pub kind: TxnType,
}

/// Body of a create request; the server assigns the id.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewTransaction {
    pub name: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    #[serde(rename = "type_")]
    pub kind: TxnType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub icon: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub icon: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginRequest {
    pub mobile: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub mobile: String,
    pub password: String,
}

/// One `category × type` aggregate for a period.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(default)]
    pub total: f64,
    #[serde(rename = "type_")]
    pub kind: TxnType,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub total_income: Option<f64>,
    #[serde(default)]
    pub total_expense: Option<f64>,
    #[serde(default)]
    pub net_savings: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Period {
    Year,
    Month,
    Week,
    Date,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Year, Period::Month, Period::Week, Period::Date];

    pub fn label(&self) -> &'static str {
        match self {
            Period::Year => "Yearly",
            Period::Month => "Monthly",
            Period::Week => "Weekly",
            Period::Date => "Daily",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Period::Year => "📊",
            Period::Month => "🗓️",
            Period::Week => "📅",
            Period::Date => "📆",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub summary: AnalyticsSummary,
    #[serde(default)]
    pub year: Vec<CategoryTotal>,
    #[serde(default)]
    pub month: Vec<CategoryTotal>,
    #[serde(default)]
    pub week: Vec<CategoryTotal>,
    #[serde(default)]
    pub date: Vec<CategoryTotal>,
}

impl AnalyticsSnapshot {
    pub fn period(&self, period: Period) -> &[CategoryTotal] {
        match period {
            Period::Year => &self.year,
            Period::Month => &self.month,
            Period::Week => &self.week,
            Period::Date => &self.date,
        }
    }

    /// Copy of the snapshot keeping only rows of `kind`.
    pub fn only(&self, kind: TxnType) -> Self {
        let keep = |rows: &[CategoryTotal]| -> Vec<CategoryTotal> {
            rows.iter().filter(|r| r.kind == kind).cloned().collect()
        };
        Self {
            summary: self.summary.clone(),
            year: keep(&self.year),
            month: keep(&self.month),
            week: keep(&self.week),
            date: keep(&self.date),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct KindTotal {
    #[serde(default)]
    pub total: f64,
    #[serde(rename = "type_")]
    pub kind: TxnType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrendPeriod {
    Day,
    Week,
    Month,
    Year,
}

impl TrendPeriod {
    pub const ALL: [TrendPeriod; 4] = [
        TrendPeriod::Day,
        TrendPeriod::Week,
        TrendPeriod::Month,
        TrendPeriod::Year,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TrendPeriod::Day => "day",
            TrendPeriod::Week => "week",
            TrendPeriod::Month => "month",
            TrendPeriod::Year => "year",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            TrendPeriod::Day => "🕒",
            TrendPeriod::Week => "📆",
            TrendPeriod::Month => "🗓️",
            TrendPeriod::Year => "📊",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PeriodicTrends {
    #[serde(default)]
    pub day_trends: Vec<KindTotal>,
    #[serde(default)]
    pub week_trends: Vec<KindTotal>,
    #[serde(default)]
    pub month_trends: Vec<KindTotal>,
    #[serde(default)]
    pub year_trends: Vec<KindTotal>,
}

impl PeriodicTrends {
    pub fn period(&self, period: TrendPeriod) -> &[KindTotal] {
        match period {
            TrendPeriod::Day => &self.day_trends,
            TrendPeriod::Week => &self.week_trends,
            TrendPeriod::Month => &self.month_trends,
            TrendPeriod::Year => &self.year_trends,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FilteredRow {
    pub category: String,
    #[serde(default)]
    pub total: f64,
    #[serde(rename = "type_")]
    pub kind: TxnType,
    pub date: NaiveDate,
}

/// Optional filters for the `/analytics/filter` query. Blank fields are omitted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalyticsFilter {
    pub start_date: String,
    pub end_date: String,
    pub kind: Option<TxnType>,
    pub category: String,
}

impl AnalyticsFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &'static str, value: &str| {
            let value = value.trim();
            if !value.is_empty() {
                pairs.push((key, value.to_string()));
            }
        };
        push("start_date", &self.start_date);
        push("end_date", &self.end_date);
        if let Some(kind) = self.kind {
            push("type_", kind.as_str());
        }
        push("category", &self.category);
        pairs
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MonthlySpending {
    #[serde(default)]
    pub total_spent: f64,
}

/// Predicted next-month spend per category.
pub type BudgetPrediction = BTreeMap<String, f64>;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BudgetRecommendation {
    pub months_considered: u32,
    pub total_spent: f64,
    pub target_saving: f64,
    #[serde(default)]
    pub allocatable_budget: f64,
    pub recommended_budget: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UploadOutcome {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transaction_uses_backend_field_names() {
        let txn: Transaction = serde_json::from_value(json!({
            "id": 4,
            "user_id": 1,
            "name": "Salary",
            "amount": 1200.5,
            "category": "Job",
            "date": "2024-03-01",
            "type_": "Income"
        }))
        .unwrap();
        assert_eq!(txn.kind, TxnType::Income);
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        let body = serde_json::to_value(NewTransaction {
            name: txn.name.clone(),
            amount: txn.amount,
            category: txn.category.clone(),
            date: txn.date,
            kind: TxnType::Expense,
        })
        .unwrap();
        assert_eq!(body["type_"], "Expense");
        assert_eq!(body["date"], "2024-03-01");
    }

    #[test]
    fn snapshot_tolerates_null_sums_and_missing_periods() {
        let snapshot: AnalyticsSnapshot = serde_json::from_value(json!({
            "summary": { "total_income": null, "total_expense": 50.0, "net_savings": null },
            "month": [{ "category": "Food", "total": 50.0, "type_": "Expense" }]
        }))
        .unwrap();
        assert_eq!(snapshot.summary.total_income, None);
        assert!(snapshot.year.is_empty());
        assert_eq!(snapshot.period(Period::Month).len(), 1);
    }

    #[test]
    fn only_keeps_rows_of_one_kind() {
        let snapshot: AnalyticsSnapshot = serde_json::from_value(json!({
            "year": [
                { "category": "Job", "total": 900.0, "type_": "Income" },
                { "category": "Rent", "total": 400.0, "type_": "Expense" }
            ]
        }))
        .unwrap();
        let expenses = snapshot.only(TxnType::Expense);
        assert_eq!(expenses.year.len(), 1);
        assert_eq!(expenses.year[0].category, "Rent");
    }

    #[test]
    fn filter_skips_blank_fields() {
        let filter = AnalyticsFilter {
            start_date: "2024-01-01".into(),
            end_date: " ".into(),
            kind: Some(TxnType::Expense),
            category: String::new(),
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("start_date", "2024-01-01".to_string()),
                ("type_", "Expense".to_string())
            ]
        );
    }
}
