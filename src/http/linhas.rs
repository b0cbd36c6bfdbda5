use crate::domain::{Linha, LinhaWithParadas, LinhaWithVeiculos, NewLinha};
use crate::http::error::ApiError;
use crate::http::paradas::{NearestParada, coordinate};
use crate::http::record_id::RecordId;
use crate::http::request_body::RequestBody;
use crate::store::{SharedStore, StoreError};
use crate::validation::rules::{self, ID_INVALIDO, LINHA_ID_INVALIDO, NOME_REPETIDO, PARADA_ID_INVALIDO};
use crate::validation::{Input, as_id, validate};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

pub async fn index(State(store): State<SharedStore>) -> Json<Vec<Linha>> {
    Json(store.all_linhas().await)
}

pub async fn show(State(store): State<SharedStore>, RecordId(id): RecordId) -> Result<Json<Linha>, ApiError> {
    let linha = store.find_linha(id).await.map_err(|_| ApiError::bad_request(ID_INVALIDO))?;
    Ok(Json(linha))
}

#[instrument(skip(store))]
pub async fn create(
    State(store): State<SharedStore>,
    RequestBody(body): RequestBody,
) -> Result<Json<LinhaWithParadas>, ApiError> {
    let new_linha = new_linha(&validate(&body, rules::LINHA)?)?;
    let linha = store.create_linha(new_linha).await.map_err(linha_error)?;
    Ok(Json(linha))
}

#[instrument(skip(store))]
pub async fn update(
    State(store): State<SharedStore>,
    RecordId(id): RecordId,
    RequestBody(body): RequestBody,
) -> Result<Json<LinhaWithParadas>, ApiError> {
    let changes = new_linha(&validate(&body, rules::LINHA)?)?;
    let linha = store.update_linha(id, changes).await.map_err(linha_error)?;
    Ok(Json(linha))
}

#[instrument(skip(store))]
pub async fn destroy(State(store): State<SharedStore>, RecordId(id): RecordId) -> Result<StatusCode, ApiError> {
    store.delete_linha(id).await.map_err(linha_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn veiculos_linha(
    State(store): State<SharedStore>,
    RecordId(id): RecordId,
) -> Result<Json<LinhaWithVeiculos>, ApiError> {
    let linha = store.linha_with_veiculos(id).await.map_err(linha_error)?;
    Ok(Json(linha))
}

pub async fn paradas_linha(
    State(store): State<SharedStore>,
    RecordId(id): RecordId,
) -> Result<Json<LinhaWithParadas>, ApiError> {
    let linha = store.linha_with_paradas(id).await.map_err(linha_error)?;
    Ok(Json(linha))
}

/// Nearest stop of one line to the posted position.
#[instrument(skip(store))]
pub async fn parada_proxima_linha(
    State(store): State<SharedStore>,
    RequestBody(body): RequestBody,
) -> Result<Json<NearestParada>, ApiError> {
    let input = validate(&body, rules::PARADA_PROXIMA_LINHA)?;
    let query = coordinate(&input)?;
    let linha_id = as_id(input.number("linha_id")?).ok_or_else(|| ApiError::not_found(LINHA_ID_INVALIDO))?;

    let paradas = store
        .paradas_of_linha(linha_id)
        .await
        .map_err(|_| ApiError::not_found(LINHA_ID_INVALIDO))?;
    Ok(Json(NearestParada::search(query, paradas)))
}

fn new_linha(input: &Input) -> Result<NewLinha, ApiError> {
    let paradas = input
        .ids("paradas")?
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| ApiError::bad_request(PARADA_ID_INVALIDO))?;
    Ok(NewLinha {
        nome: input.string("nome")?,
        paradas,
    })
}

fn linha_error(error: StoreError) -> ApiError {
    match error {
        StoreError::DuplicateNome { .. } => ApiError::bad_request(NOME_REPETIDO),
        StoreError::UnknownParada(_) => ApiError::bad_request(PARADA_ID_INVALIDO),
        _ => ApiError::not_found(ID_INVALIDO),
    }
}
