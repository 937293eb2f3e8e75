use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::responses::FieldDefinitionResponse;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_form_fields(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let fields = state.catalog_repo.list().await?;

    Ok(Json(fields.iter().map(FieldDefinitionResponse::from).collect::<Vec<_>>()))
}
