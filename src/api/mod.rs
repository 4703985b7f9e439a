use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};

use crate::{
    error::GatewayError,
    models::{Coordinate, CoordinateParams, PollenReport},
    pollen::{ForecastSource, get_pollen_severity},
};

/// Shared state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ForecastSource>,
}

impl AppState {
    pub fn new<S: ForecastSource + 'static>(source: S) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/pollen", get(get_pollen))
        .with_state(state)
}

/// `GET /api/pollen?lat=<float>&lng=<float>`
async fn get_pollen(
    State(state): State<AppState>,
    params: Result<Query<CoordinateParams>, QueryRejection>,
) -> Result<Json<PollenReport>, GatewayError> {
    let Query(params) = params.map_err(|e| GatewayError::bad_request(e.body_text()))?;
    let coordinate = Coordinate::from_params(&params)?;

    let report = get_pollen_severity(state.source.as_ref(), coordinate).await?;
    Ok(Json(report))
}
