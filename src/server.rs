use crate::classify::ElevationCategory;
use crate::config::AppConfig;
use crate::export::to_feature_collection;
use crate::render::render_html;
use crate::types::{MapDocument, MarkerColor, VolcanoRecord};
use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Json},
    routing::get,
    Router,
};
use geo::{HaversineDistance, Point};
use geojson::FeatureCollection;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

// Wrapper for RTree indexing, keyed on [lon, lat]
pub struct VolcanoIndex {
    index: usize,
    position: [f64; 2],
}

impl RTreeObject for VolcanoIndex {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for VolcanoIndex {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        dx * dx + dy * dy
    }
}

pub struct AppState {
    pub volcanoes: Vec<VolcanoRecord>,
    pub tree: RTree<VolcanoIndex>,
    pub html: String,
    pub layers: FeatureCollection,
}

impl AppState {
    pub fn new(volcanoes: Vec<VolcanoRecord>, map: &MapDocument) -> Result<Self> {
        info!("Building spatial index for {} volcanoes...", volcanoes.len());
        let tree_items: Vec<VolcanoIndex> = volcanoes.iter().enumerate().map(|(i, v)| {
            VolcanoIndex {
                index: i,
                position: [v.lon(), v.lat()],
            }
        }).collect();
        let tree = RTree::bulk_load(tree_items);

        Ok(Self {
            volcanoes,
            tree,
            html: render_html(map)?,
            layers: to_feature_collection(map),
        })
    }

    /// Nearest volcano by planar lon/lat distance, with its great-circle distance in km.
    pub fn nearest(&self, lat: f64, lon: f64) -> Option<(&VolcanoRecord, f64)> {
        let candidate = self.tree.nearest_neighbor(&[lon, lat])?;
        let volcano = self.volcanoes.get(candidate.index)?;
        let meters = Point::new(lon, lat).haversine_distance(&volcano.point);
        Some((volcano, meters / 1000.0))
    }
}

#[derive(Deserialize)]
pub struct QueryParams {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct QueryResponse {
    lat: f64,
    lon: f64,
    elevation: f64,
    category: ElevationCategory,
    band: &'static str,
    color: MarkerColor,
    distance_km: f64,
}

pub async fn start_server(config: AppConfig, volcanoes: Vec<VolcanoRecord>, map: MapDocument) -> Result<()> {
    let state = Arc::new(AppState::new(volcanoes, &map)?);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.server.port));
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/layers", get(layers_handler))
        .route("/api/query", get(query_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.html.clone())
}

async fn layers_handler(State(state): State<Arc<AppState>>) -> Json<FeatureCollection> {
    Json(state.layers.clone())
}

async fn query_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Option<QueryResponse>>, (StatusCode, String)> {
    if !(-90.0..=90.0).contains(&params.lat) || !(-180.0..=180.0).contains(&params.lon) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("lat/lon out of range: {}, {}", params.lat, params.lon),
        ));
    }

    let response = state.nearest(params.lat, params.lon).map(|(volcano, distance_km)| {
        let category = ElevationCategory::classify(volcano.elevation);
        QueryResponse {
            lat: volcano.lat(),
            lon: volcano.lon(),
            elevation: volcano.elevation,
            category,
            band: category.label(),
            color: category.color(),
            distance_km,
        }
    });

    Ok(Json(response))
}
