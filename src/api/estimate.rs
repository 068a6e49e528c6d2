//! Estimated fulfillment date endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use super::AppState;
use crate::presentation;
use crate::Result;

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub ok: bool,
    #[serde(rename = "fechaISO")]
    pub fecha_iso: String,
    #[serde(rename = "fechaAR")]
    pub fecha_ar: String,
}

pub async fn estimate_date(State(s): State<AppState>) -> Result<Json<EstimateResponse>> {
    let estimate = s.estimator.estimate().await?;
    let formatted = presentation::format(estimate.date)?;
    Ok(Json(EstimateResponse { ok: true, fecha_iso: formatted.iso, fecha_ar: formatted.localized }))
}
