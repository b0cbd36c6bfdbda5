use crate::domain::PosicaoVeiculo;
use crate::http::error::ApiError;
use crate::http::paradas::coordinate;
use crate::http::record_id::RecordId;
use crate::http::request_body::RequestBody;
use crate::store::SharedStore;
use crate::validation::rules::{self, ID_INVALIDO};
use crate::validation::validate;
use axum::Json;
use axum::extract::State;
use tracing::instrument;

pub async fn index(State(store): State<SharedStore>) -> Json<Vec<PosicaoVeiculo>> {
    Json(store.all_posicoes().await)
}

pub async fn show(State(store): State<SharedStore>, RecordId(id): RecordId) -> Result<Json<PosicaoVeiculo>, ApiError> {
    let posicao = store.find_posicao(id).await.map_err(|_| ApiError::bad_request(ID_INVALIDO))?;
    Ok(Json(posicao))
}

#[instrument(skip(store))]
pub async fn update(
    State(store): State<SharedStore>,
    RecordId(id): RecordId,
    RequestBody(body): RequestBody,
) -> Result<Json<PosicaoVeiculo>, ApiError> {
    let input = validate(&body, rules::POSICAO)?;
    let posicao = store
        .update_posicao(id, coordinate(&input)?)
        .await
        .map_err(|_| ApiError::bad_request(ID_INVALIDO))?;
    Ok(Json(posicao))
}
