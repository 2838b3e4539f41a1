use std::future::Future;
use std::time::Duration;

use futures::future::{select, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{
    AnalyticsFilter, AnalyticsSnapshot, BudgetPrediction, BudgetRecommendation, Category,
    FilteredRow, LoginRequest, MonthlySpending, NewCategory, NewTransaction, PeriodicTrends,
    SignupRequest, Transaction, UploadOutcome,
};

/// Thin JSON-over-HTTP wrapper around the finance backend. Every data route
/// is scoped by the caller's `user_id`.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    /// Absolute URL for `path` under the base URL with percent-encoded query pairs.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<String, ApiError> {
        let base = format!("{}/", self.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&base)?.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.into())
    }

    fn scoped(&self, path: &str, user_id: &str) -> Result<String, ApiError> {
        self.endpoint(path, &[("user_id", user_id.to_string())])
    }

    // ============= Auth =============

    pub async fn login(&self, body: &LoginRequest) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint("login", &[])?;
        let request = Request::post(&url)
            .header("Content-Type", "application/json")
            .json(body)?;
        read_json(request.send().await?).await
    }

    pub async fn signup(&self, body: &SignupRequest) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint("signup", &[])?;
        let request = Request::post(&url)
            .header("Content-Type", "application/json")
            .json(body)?;
        read_json(request.send().await?).await
    }

    // ============= Transactions =============

    pub async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>, ApiError> {
        let url = self.scoped("transactions/", user_id)?;
        read_json(Request::get(&url).send().await?).await
    }

    pub async fn create_transaction(
        &self,
        user_id: &str,
        body: &NewTransaction,
    ) -> Result<Transaction, ApiError> {
        let url = self.scoped("transactions/", user_id)?;
        let request = Request::post(&url).json(body)?;
        read_json(request.send().await?).await
    }

    pub async fn delete_transaction(&self, user_id: &str, id: i64) -> Result<(), ApiError> {
        let url = self.scoped(&format!("transactions/{}", id), user_id)?;
        let response = Request::delete(&url).send().await?;
        ensure_ok(response).await.map(|_| ())
    }

    // ============= Categories =============

    pub async fn list_categories(&self, user_id: &str) -> Result<Vec<Category>, ApiError> {
        let url = self.scoped("categories/", user_id)?;
        read_json(Request::get(&url).send().await?).await
    }

    pub async fn create_category(
        &self,
        user_id: &str,
        body: &NewCategory,
    ) -> Result<Category, ApiError> {
        let url = self.scoped("categories/", user_id)?;
        let request = Request::post(&url).json(body)?;
        read_json(request.send().await?).await
    }

    // ============= Analytics =============

    pub async fn analytics_all(&self, user_id: &str) -> Result<AnalyticsSnapshot, ApiError> {
        let url = self.scoped("analytics/all", user_id)?;
        read_json(Request::get(&url).send().await?).await
    }

    pub async fn analytics_trends(&self, user_id: &str) -> Result<PeriodicTrends, ApiError> {
        let url = self.scoped("analytics/trends", user_id)?;
        read_json(Request::get(&url).send().await?).await
    }

    pub async fn analytics_filter(
        &self,
        user_id: &str,
        filter: &AnalyticsFilter,
    ) -> Result<Vec<FilteredRow>, ApiError> {
        let mut query = vec![("user_id", user_id.to_string())];
        query.extend(filter.query_pairs());
        let url = self.endpoint("analytics/filter", &query)?;
        read_json(Request::get(&url).send().await?).await
    }

    pub async fn monthly_spending(&self, user_id: &str) -> Result<MonthlySpending, ApiError> {
        let url = self.scoped("analytics/monthly_spending", user_id)?;
        read_json(Request::get(&url).send().await?).await
    }

    pub async fn predict_budget(
        &self,
        user_id: &str,
        months: u32,
    ) -> Result<BudgetPrediction, ApiError> {
        let url = self.endpoint(
            "analytics/predict_budget",
            &[("user_id", user_id.to_string()), ("months", months.to_string())],
        )?;
        read_json(Request::get(&url).send().await?).await
    }

    pub async fn recommend_budget(
        &self,
        user_id: &str,
        months: u32,
        target_saving: f64,
    ) -> Result<BudgetRecommendation, ApiError> {
        let url = self.endpoint(
            "analytics/recommend_budget",
            &[
                ("months", months.to_string()),
                ("target_saving", target_saving.to_string()),
                ("user_id", user_id.to_string()),
            ],
        )?;
        read_json(Request::get(&url).send().await?).await
    }

    // ============= Import =============

    pub async fn upload_csv(
        &self,
        user_id: &str,
        file: &web_sys::File,
    ) -> Result<UploadOutcome, ApiError> {
        let url = self.scoped("upload_csv/", user_id)?;
        let form = web_sys::FormData::new()
            .map_err(|e| ApiError::Unexpected(format!("{:?}", e)))?;
        form.append_with_blob("file", file)
            .map_err(|e| ApiError::Unexpected(format!("{:?}", e)))?;
        let request = Request::post(&url).body(form)?;
        read_json(request.send().await?).await
    }
}

async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_response(status, &body))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = ensure_ok(response).await?;
    Ok(response.json::<T>().await?)
}

/// Race `future` against a timer; the timer winning is a [`ApiError::Timeout`].
pub async fn with_timeout<T, F>(limit: Duration, future: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let millis = u32::try_from(limit.as_millis()).unwrap_or(u32::MAX);
    let request = Box::pin(future);
    let timer = Box::pin(TimeoutFuture::new(millis));
    match select(request, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(ApiError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://127.0.0.1:8000")
    }

    #[test]
    fn scoped_endpoints_carry_user_id() {
        assert_eq!(
            client().scoped("transactions/", "7").unwrap(),
            "http://127.0.0.1:8000/transactions/?user_id=7"
        );
        assert_eq!(
            client().scoped("transactions/42", "7").unwrap(),
            "http://127.0.0.1:8000/transactions/42?user_id=7"
        );
    }

    #[test]
    fn base_path_and_trailing_slash_are_kept() {
        let client = ApiClient::new("https://finance.example.com/api/");
        assert_eq!(
            client.endpoint("/login", &[]).unwrap(),
            "https://finance.example.com/api/login"
        );
    }

    #[test]
    fn query_values_are_encoded() {
        let url = client()
            .endpoint(
                "analytics/filter",
                &[("user_id", "1".into()), ("category", "Eating Out & Bars".into())],
            )
            .unwrap();
        assert_eq!(
            url,
            "http://127.0.0.1:8000/analytics/filter?user_id=1&category=Eating+Out+%26+Bars"
        );
    }

    #[test]
    fn bad_base_url_is_reported() {
        let err = ApiClient::new("not a url").endpoint("login", &[]).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn from_config_uses_base_url() {
        let config = AppConfig::default();
        assert_eq!(
            ApiClient::from_config(&config),
            ApiClient::new("http://127.0.0.1:8000")
        );
    }
}
