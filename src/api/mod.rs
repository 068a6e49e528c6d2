//! HTTP surface

pub mod admin;
pub mod estimate;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::estimator::CapacityEstimator;
use crate::events::EventPublisher;
use crate::store::CapacityConfigStore;

pub const SERVICE_NAME: &str = "pharmacy-orders";

#[derive(Clone)]
pub struct AppState {
    pub estimator: CapacityEstimator,
    pub settings: Arc<dyn CapacityConfigStore>,
    pub events: EventPublisher,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": SERVICE_NAME})) }))
        .route("/api/checkout/estimate-date", get(estimate::estimate_date))
        .route("/api/fecha-estimada", get(estimate::estimate_date))
        .route("/api/admin/config", get(admin::get_config).post(admin::update_config))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()).with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::EstimatorConfig;
    use crate::estimator::FixedClock;
    use crate::store::{InMemoryCapacityConfigStore, InMemoryOrderBacklog};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use tower::ServiceExt;

    pub struct Harness {
        pub app: Router,
        pub backlog: Arc<InMemoryOrderBacklog>,
        pub settings: Arc<InMemoryCapacityConfigStore>,
    }

    pub fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2026, 10, 16).unwrap() }

    pub fn harness(pending: i64, weeks_shifted: Option<i64>) -> Harness {
        let backlog = Arc::new(InMemoryOrderBacklog::new(pending));
        let settings = Arc::new(match weeks_shifted {
            Some(w) => InMemoryCapacityConfigStore::with_weeks_shifted(w),
            None => InMemoryCapacityConfigStore::new(),
        });
        let estimator = CapacityEstimator::new(EstimatorConfig::default(), backlog.clone(), settings.clone())
            .with_clock(Arc::new(FixedClock(today())));
        let app = router(AppState { estimator, settings: settings.clone(), events: EventPublisher::disabled() });
        Harness { app, backlog, settings }
    }

    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health() {
        let h = harness(0, None);
        let (status, body) = send(&h.app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "pharmacy-orders");
    }
}
