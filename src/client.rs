//! REST consumer for the IFRS 17 reporting API
//!
//! Wraps the `/api/v1/ifrs17` endpoints. Every failure path (connect
//! error, timeout, non-success status, undecodable body) is absorbed into
//! `None` so callers render an empty state instead of crashing.

use crate::aggregate::{CohortSeries, ComparisonRow, CsmReconciliation, DashboardSummary, LiabilityReconciliation};
use crate::records::{ReportingMetadata, Snapshot};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout for snapshot retrieval
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Combined payload of the `/dashboard` endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardPayload {
    pub summary: DashboardSummary,
    pub liability_trend: CohortSeries,
    pub csm_trend: CohortSeries,
    pub portfolio_comparison: Vec<ComparisonRow>,
}

/// Client over the reporting API base URL
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Create a client with an explicit request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Create a client with the default timeout
    pub fn with_default_timeout(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::new(base_url, DEFAULT_TIMEOUT)
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/api/v1/ifrs17{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Option<T> {
        let url = self.endpoint_url(path);
        let response = self.http.get(&url).query(query).send().await;
        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<T>().await {
                Ok(value) => Some(value),
                Err(e) => {
                    log::warn!("malformed response from {}: {}", url, e);
                    None
                }
            },
            Ok(resp) => {
                log::warn!("{} returned status {}", url, resp.status());
                None
            }
            Err(e) => {
                log::warn!("request to {} failed: {}", url, e);
                None
            }
        }
    }

    /// Reporting date, currency, portfolios
    pub async fn metadata(&self) -> Option<ReportingMetadata> {
        self.get_json("/metadata", &[]).await
    }

    /// Summary, both cohort trends, and the comparison table in one call
    pub async fn dashboard(&self) -> Option<DashboardPayload> {
        self.get_json("/dashboard", &[]).await
    }

    /// Liability reconciliation rows and totals
    pub async fn reconciliation_liability(&self) -> Option<LiabilityReconciliation> {
        self.get_json("/reconciliations/liability", &[]).await
    }

    /// CSM reconciliation rows, totals, and revenue from release
    pub async fn reconciliation_csm(&self) -> Option<CsmReconciliation> {
        self.get_json("/reconciliations/csm", &[]).await
    }

    /// Raw snapshot, optionally narrowed by portfolio and/or cohort year
    pub async fn data(&self, portfolio: Option<&str>, cohort_year: Option<i32>) -> Option<Snapshot> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(p) = portfolio {
            query.push(("portfolio", p.to_string()));
        }
        if let Some(y) = cohort_year {
            query.push(("cohort_year", y.to_string()));
        }
        self.get_json("/data", &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_base() {
        let client = ApiClient::with_default_timeout("http://localhost:8000/").unwrap();
        assert_eq!(
            client.endpoint_url("/reconciliations/csm"),
            "http://localhost:8000/api/v1/ifrs17/reconciliations/csm"
        );
    }

    #[test]
    fn test_dashboard_payload_decodes_wire_shape() {
        let payload: DashboardPayload = serde_json::from_str(
            r#"{
                "summary": {
                    "insurance_liability": 1600.0,
                    "insurance_liability_opening": 1000.0,
                    "liability_trend_pct": 60.0,
                    "reinsurance_asset": 0.0,
                    "closing_csm": 180.0,
                    "csm_trend_pct": null,
                    "gross_premium": 4000.0,
                    "net_premium": 3700.0,
                    "claims_incurred": 700.0,
                    "loss_ratio_pct": 18.9,
                    "contracts_count": 2,
                    "insurance_revenue_csm_release": 0.0,
                    "acquisition_costs_total": 0.0,
                    "claims_paid": 0.0,
                    "claims_outstanding_reserve": 0.0,
                    "by_portfolio": {
                        "Motor": {"premium": 1500.0, "claims": 700.0, "liability": 1100.0,
                                  "csm": 180.0, "count": 1, "opening": 1000.0}
                    },
                    "portfolios": ["Motor"]
                },
                "liability_trend": {"labels": ["2023"], "values": [1100.0]},
                "csm_trend": {"labels": ["2023"], "values": [180.0]},
                "portfolio_comparison": [
                    {"portfolio": "Motor", "contracts": 1, "gross_premium": 1500.0,
                     "claims": 700.0, "loss_ratio_pct": 46.7, "closing_liability": 1100.0,
                     "closing_csm": 180.0}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(payload.summary.contracts_count, 2);
        assert_eq!(payload.summary.csm_trend_pct, None);
        assert_eq!(payload.liability_trend.labels, vec!["2023"]);
        assert_eq!(payload.portfolio_comparison[0].loss_ratio_pct, Some(46.7));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_none() {
        // Port 9 (discard) on localhost is not serving the API
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        assert!(client.metadata().await.is_none());
        assert!(client.dashboard().await.is_none());
    }
}
