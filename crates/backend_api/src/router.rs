use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, repository::TradeRepository};

/// Create the main application router with all API endpoints
pub fn create_router(repo: Arc<dyn TradeRepository>) -> Router {
    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // CSV upload
        .route("/api/trades/import", post(handlers::import_trades))
        // Trade listing
        .route("/api/trades", get(handlers::list_trades))
        // Aggregated views
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/chart", get(handlers::get_chart))
        // Add shared state
        .with_state(repo)
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryTradeRepository;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    const CSV: &str = "Date,Action,Amount,Instrument,AverageOpenPrice,ClosePrice,GrossPl,NetPl,CloseTradeId\n\
                       02/01/2025 10:00 AM,Buy,1,ES,100,101,10.50,10.00,1\n\
                       02/01/2025 02:00 PM,Sell,1,ES,101,100,(3.00),(3.50),2\n\
                       bogus,Sell,1,ES,101,100,1.00,0.50,3\n";

    async fn upload(router: &Router) -> serde_json::Value {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/trades/import")
                    .body(Body::from(CSV))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_import_reports_count_and_errors() {
        let router = create_router(Arc::new(InMemoryTradeRepository::new()));
        let summary = upload(&router).await;

        assert_eq!(summary["imported"], 2);
        assert_eq!(summary["errors"].as_array().unwrap().len(), 1);
        assert!(summary["errors"][0]["row"]
            .as_str()
            .unwrap()
            .contains("bogus"));
    }

    #[tokio::test]
    async fn test_calendar_after_import() {
        let router = create_router(Arc::new(InMemoryTradeRepository::new()));
        upload(&router).await;

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/calendar?year=2025&month=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let calendar: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(calendar["monthly_total"], 6.5);
        assert_eq!(calendar["daily_net_pl"]["2025-02-01"], 6.5);
    }

    #[tokio::test]
    async fn test_chart_is_cumulative() {
        let router = create_router(Arc::new(InMemoryTradeRepository::new()));
        upload(&router).await;

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/chart")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let series: serde_json::Value = serde_json::from_slice(&body).unwrap();

        let points = series.as_array().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0]["net_pl"], 10.0);
        assert_eq!(points[1]["cumulative_net_pl"], 6.5);
    }

    #[tokio::test]
    async fn test_invalid_month_is_rejected() {
        let router = create_router(Arc::new(InMemoryTradeRepository::new()));

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/calendar?year=2025&month=13")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_utf8_upload_is_rejected() {
        let router = create_router(Arc::new(InMemoryTradeRepository::new()));

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/trades/import")
                    .body(Body::from(vec![0xff, 0xfe, 0x00]))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
