use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::domain::{ChatModel, Temperature};

#[derive(Serialize)]
pub struct ModelsResponse {
    pub object: &'static str,
    pub data: Vec<ModelInfo>,
    pub temperature: TemperatureRange,
}

#[derive(Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub default: bool,
}

#[derive(Serialize)]
pub struct TemperatureRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
}

/// Choices the display surface offers: the supported models (first is the
/// default) and the temperature slider bounds.
pub async fn models_handler() -> impl IntoResponse {
    let data = ChatModel::ALL
        .into_iter()
        .map(|model| ModelInfo {
            id: model.as_str(),
            default: model == ChatModel::default(),
        })
        .collect();

    (
        StatusCode::OK,
        Json(ModelsResponse {
            object: "list",
            data,
            temperature: TemperatureRange {
                min: Temperature::MIN,
                max: Temperature::MAX,
                step: Temperature::STEP,
                default: Temperature::DEFAULT,
            },
        }),
    )
}
