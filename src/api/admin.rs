//! Operator controls for the weeks-shifted offset.
//!
//! Authentication is handled in front of this service.

use axum::{extract::{rejection::JsonRejection, State}, Json};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigAction { Incrementar, Resetear }

#[derive(Debug, Deserialize)] pub struct ConfigActionRequest { pub action: ConfigAction }

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub ok: bool,
    #[serde(rename = "semanasDesplazadas")]
    pub semanas_desplazadas: i64,
}

pub async fn get_config(State(s): State<AppState>) -> Result<Json<ConfigResponse>> {
    let weeks_shifted = s.settings.get_weeks_shifted().await?;
    Ok(Json(ConfigResponse { ok: true, semanas_desplazadas: weeks_shifted.value() }))
}

pub async fn update_config(
    State(s): State<AppState>,
    payload: std::result::Result<Json<ConfigActionRequest>, JsonRejection>,
) -> Result<Json<ConfigResponse>> {
    let Json(r) = payload.map_err(|e| Error::InvalidRequest(e.body_text()))?;
    let change = match r.action {
        ConfigAction::Incrementar => s.settings.increment().await?,
        ConfigAction::Resetear => s.settings.reset().await?,
    };
    tracing::info!(action = ?r.action, weeks_shifted = change.weeks_shifted.value(), "capacity offset updated");
    s.events.publish_all(change.events).await;
    Ok(Json(ConfigResponse { ok: true, semanas_desplazadas: change.weeks_shifted.value() }))
}
