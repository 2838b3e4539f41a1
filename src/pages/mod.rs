mod analysis;
mod auth;
mod budget;
mod csv_upload;
mod dashboard;
mod kind_analysis;
mod transactions;

pub use analysis::AnalysisPage;
pub use auth::AuthPage;
pub use budget::BudgetPage;
pub use csv_upload::CsvUploadPage;
pub use dashboard::DashboardPage;
pub use kind_analysis::KindAnalysisPage;
pub use transactions::{CategoryAction, LedgerAction, TransactionsPage};

use crate::error::ApiError;
use crate::models::AnalyticsSnapshot;

/// A failed analytics read renders as an empty snapshot instead of waiting forever.
fn snapshot_or_empty(result: Result<AnalyticsSnapshot, ApiError>) -> AnalyticsSnapshot {
    result.unwrap_or_else(|err| {
        tracing::error!(error = %err, "failed to load analytics");
        AnalyticsSnapshot::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_analytics_read_is_an_empty_snapshot() {
        let failed = Err(ApiError::from_response(404, r#"{"detail":"User not found"}"#));
        let snapshot = snapshot_or_empty(failed);
        assert_eq!(snapshot, AnalyticsSnapshot::default());
        assert_eq!(snapshot.summary.total_income, None);
        assert!(snapshot.month.is_empty());
    }
}
