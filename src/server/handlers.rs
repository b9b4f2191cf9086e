// src/server/handlers.rs
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio::task::JoinError;
use tracing::{info, instrument};

use crate::error::NdviError;
use crate::processing::{self, NdviResult};
use crate::server::error::ApiError;
use crate::VERSION;

/// Multipart field carrying the raster upload.
pub const IMAGE_FIELD: &str = "image_file";

#[derive(Debug, Deserialize)]
pub struct NdviParams {
    /// 1-indexed red band
    pub red_band: usize,
    /// 1-indexed near-infrared band
    pub nir_band: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NdviResponse {
    pub message: String,
    #[serde(flatten)]
    pub result: NdviResult,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Welcome {
    pub message: String,
    pub version: String,
}

pub async fn root() -> Json<Welcome> {
    Json(Welcome {
        message: "Welcome to the NDVI analysis API".to_string(),
        version: VERSION.to_string(),
    })
}

/// `POST /analyze/ndvi/?red_band=..&nir_band=..` with a multipart raster upload.
#[instrument(skip_all)]
pub async fn compute_ndvi(
    query: Result<Query<NdviParams>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<NdviResponse>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let image = read_image_field(&mut multipart).await?;
    if image.is_empty() {
        return Err(ApiError::EmptyUpload);
    }

    info!(
        bytes = image.len(),
        red_band = params.red_band,
        nir_band = params.nir_band,
        "computing NDVI"
    );

    let NdviParams { red_band, nir_band } = params;
    let result = tokio::task::spawn_blocking(move || processing::compute(image, red_band, nir_band))
        .await
        .map_err(blocking_failure)??;

    Ok(Json(NdviResponse {
        message: "NDVI calculated successfully".to_string(),
        result,
    }))
}

/// Turns a failed blocking task into `Unexpected`, keeping the panic message.
fn blocking_failure(e: JoinError) -> NdviError {
    match e.try_into_panic() {
        Ok(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "calculation panicked".to_string());
            NdviError::Unexpected(message)
        }
        Err(e) => NdviError::Unexpected(e.to_string()),
    }
}

async fn read_image_field(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field.bytes().await?;
            return Ok(Vec::from(bytes));
        }
    }

    Err(ApiError::BadRequest(format!(
        "missing multipart field `{IMAGE_FIELD}`"
    )))
}
