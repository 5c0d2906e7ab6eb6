//! Health check endpoint for load balancers and monitoring.
//!
//! Returns 200 OK if the service is healthy (database and Redis reachable),
//! 503 Service Unavailable otherwise.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: bool,
    redis: bool,
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = state.repos.status.health_check().await.unwrap_or(false);
    let redis_ok = state
        .stores
        .destinations
        .health_check()
        .await
        .unwrap_or(false);

    let healthy = db_ok && redis_ok;

    let response = HealthResponse {
        status: if healthy { "ok" } else { "unhealthy" },
        database: db_ok,
        redis: redis_ok,
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::MockStatusRepo;
    use crate::stores::MockDestinationStore;
    use crate::test_utils::TestStateBuilder;

    #[tokio::test]
    async fn healthy_when_both_dependencies_respond() {
        let mut status = MockStatusRepo::new();
        status.expect_health_check().returning(|| Ok(true));

        let mut destinations = MockDestinationStore::new();
        destinations.expect_health_check().returning(|| Ok(true));

        let state = TestStateBuilder::new()
            .with_status_repo(status)
            .with_destination_store(destinations)
            .build();

        let response = health_check(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unhealthy_when_redis_is_down() {
        let mut status = MockStatusRepo::new();
        status.expect_health_check().returning(|| Ok(true));

        let mut destinations = MockDestinationStore::new();
        destinations
            .expect_health_check()
            .returning(|| Err(anyhow::anyhow!("connection refused")));

        let state = TestStateBuilder::new()
            .with_status_repo(status)
            .with_destination_store(destinations)
            .build();

        let response = health_check(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
