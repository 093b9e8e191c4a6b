//! HTTP route handlers.
//!
//! Searches run on the blocking thread pool through [`AppState::run_blocking`]
//! with search tables borrowed from the shared pool. The request concurrency
//! limit is shared by all routes.

use axum::{
    Json, Router,
    error_handling::HandleErrorLayer,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::header,
    response::IntoResponse,
    routing::get,
};
use geo::Point;
use geojson::FeatureCollection;
use roadnet_core::prelude::*;
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::dto::*;
use crate::error::{ApiError, handle_middleware_error};
use crate::state::AppState;

const GEOJSON_CONTENT_TYPE: &str = "application/geo+json";

/// Create the application router with its middleware stack
pub fn create_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .layer(TimeoutLayer::new(state.limits.request_timeout()))
        .layer(GlobalConcurrencyLimitLayer::new(
            state.limits.max_concurrent_requests,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/network", get(network_summary))
        .route("/nodes/{id}", get(node))
        .route("/nearest", get(nearest))
        .route("/route", get(route))
        .route("/route/geojson", get(route_geojson))
        .route("/articulation-points", get(articulation_points))
        .route("/roads/search", get(search_roads))
        .layer(middleware)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn network_summary(State(state): State<AppState>) -> Json<NetworkResponse> {
    Json(state.network.summary().into())
}

async fn node(
    State(state): State<AppState>,
    id: Result<Path<NodeId>, PathRejection>,
) -> Result<Json<NodeResponse>, ApiError> {
    let Path(id) = id?;
    let intersection = state
        .network
        .intersection(id)
        .ok_or(ApiError::UnknownNode(id))?;
    Ok(Json(NodeResponse::new(&state.network, intersection)))
}

async fn nearest(
    State(state): State<AppState>,
    query: Result<Query<NearestQuery>, QueryRejection>,
) -> Result<Json<NearestResponse>, ApiError> {
    let Query(query) = query?;
    if !(-90.0..=90.0).contains(&query.lat) || !(-180.0..=180.0).contains(&query.lon) {
        return Err(ApiError::BadRequest(format!(
            "Coordinate out of range: {}, {}",
            query.lat, query.lon
        )));
    }
    let max_distance = query
        .max_distance
        .unwrap_or(state.limits.default_nearest_km);
    if !(max_distance > 0.0 && max_distance <= state.limits.max_nearest_km) {
        return Err(ApiError::BadRequest(format!(
            "max_distance must be in (0, {}] km",
            state.limits.max_nearest_km
        )));
    }

    let (node, distance_km) = state
        .network
        .nearest_intersection(Point::new(query.lon, query.lat), max_distance)
        .ok_or(ApiError::NothingNearby(max_distance))?;
    Ok(Json(NearestResponse { node, distance_km }))
}

/// Shortest route on the blocking pool, `NoPath` if `to` is unreachable
async fn find_route(state: &AppState, query: RouteQuery) -> Result<Route, ApiError> {
    let RouteQuery { from, to } = query;
    state
        .run_blocking(move |state| {
            state
                .with_search_table(|table| find_path_with(&state.network, table, from, to))?
                .ok_or(ApiError::NoPath { from, to })
        })
        .await
}

async fn route(
    State(state): State<AppState>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Result<Json<RouteResponse>, ApiError> {
    let Query(query) = query?;
    debug!("Route {} -> {}", query.from, query.to);
    let route = find_route(&state, query).await?;
    Ok(Json(RouteResponse::new(&state.network, &route)?))
}

async fn route_geojson(
    State(state): State<AppState>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let route = find_route(&state, query).await?;
    let collection: FeatureCollection = route.to_geojson(&state.network)?;

    Ok(([(header::CONTENT_TYPE, GEOJSON_CONTENT_TYPE)], Json(collection)))
}

async fn articulation_points(
    State(state): State<AppState>,
) -> Result<Json<ArticulationResponse>, ApiError> {
    let response = state
        .run_blocking(|state| Ok(ArticulationResponse::from(state.articulation_points())))
        .await?;
    Ok(Json(response))
}

async fn search_roads(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(SearchQuery { q }) = query?;
    if q.trim().is_empty() {
        return Err(ApiError::BadRequest("Query must not be empty".to_owned()));
    }
    let matches = state.index.lookup(&q);
    Ok(Json(SearchResponse::new(q, matches)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::LimitsConfig;

    /// Square 1-2-3-4 with the side 2 -> 1 one-way, plus node 5 on its own
    fn app() -> Router {
        let nodes = vec![
            NodeRecord::new(1, -36.850, 174.760),
            NodeRecord::new(2, -36.850, 174.761),
            NodeRecord::new(3, -36.851, 174.761),
            NodeRecord::new(4, -36.851, 174.760),
            NodeRecord::new(5, -36.900, 174.800),
        ];
        let roads = vec![
            RoadRecord::new(12, "Wakefield Street", true),
            RoadRecord::new(23, "Lorne Street", false),
            RoadRecord::new(34, "Rutland Street", false),
            RoadRecord::new(41, "Kitchener Street", false),
        ];
        let segments = vec![
            SegmentRecord::new(12, 2, 1, 0.1),
            SegmentRecord::new(23, 2, 3, 0.2),
            SegmentRecord::new(34, 3, 4, 0.1),
            SegmentRecord::new(41, 4, 1, 0.2),
        ];
        let network = RoadNetwork::build(nodes, roads, segments).unwrap();
        create_router(AppState::new(network, LimitsConfig::default()))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_and_summary() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = get("/network").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["intersections"], 5);
        assert_eq!(body["one_way_roads"], 1);
    }

    #[tokio::test]
    async fn route_detours_around_one_way() {
        let (status, body) = get("/route?from=1&to=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["nodes"], serde_json::json!([1, 4, 3, 2]));
        assert_eq!(body["avoided_one_way_count"], 1);
        assert!((body["distance_km"].as_f64().unwrap() - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn route_errors() {
        let (status, body) = get("/route?from=1&to=5").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "no_path");

        let (status, body) = get("/route?from=1&to=77").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "unknown_node");

        let (status, body) = get("/route?from=1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");
    }

    #[tokio::test]
    async fn route_as_geojson() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/route/geojson?from=2&to=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            GEOJSON_CONTENT_TYPE
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["type"], "FeatureCollection");
    }

    #[tokio::test]
    async fn nodes_and_nearest() {
        let (status, body) = get("/nodes/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["neighbours"], serde_json::json!([1, 3]));

        let (status, _) = get("/nodes/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get("/nearest?lat=-36.8501&lon=174.7611").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["node"], 2);

        let (status, body) = get("/nearest?lat=-37.5&lon=175.5&max_distance=1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "nothing_nearby");

        let (status, _) = get("/nearest?lat=-36.85&lon=174.76&max_distance=500").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn articulation_points_and_search() {
        let (status, body) = get("/articulation-points").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);
        assert_eq!(body["components"], 2);

        let (status, body) = get("/roads/search?q=Lorne%20Street").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["exact"], true);
        assert_eq!(body["roads"], serde_json::json!([23]));

        let (status, _) = get("/roads/search?q=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
