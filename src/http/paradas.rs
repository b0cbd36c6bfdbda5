use crate::domain::nearest::find_nearest;
use crate::domain::{Coordinate, NewParada, Parada, ParadaWithLinhas};
use crate::http::error::ApiError;
use crate::http::record_id::RecordId;
use crate::http::request_body::RequestBody;
use crate::store::{SharedStore, StoreError};
use crate::validation::rules::{self, ID_INVALIDO, NOME_REPETIDO};
use crate::validation::{Input, ValidationError, validate};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::{debug, instrument};

/// The nearest stop, serialized as the stop itself or as an empty array when there are no stops.
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NearestParada {
    Found(Parada),
    Empty(Vec<Parada>),
}

impl NearestParada {
    pub fn search(query: Coordinate, paradas: Vec<Parada>) -> Self {
        let result = find_nearest(query, paradas);
        debug!(distance = ?result.distance(), "Searched nearest parada");
        match result.into_value() {
            Some(parada) => NearestParada::Found(parada),
            None => NearestParada::Empty(Vec::new()),
        }
    }
}

pub async fn index(State(store): State<SharedStore>) -> Json<Vec<Parada>> {
    Json(store.all_paradas().await)
}

pub async fn show(State(store): State<SharedStore>, RecordId(id): RecordId) -> Result<Json<Parada>, ApiError> {
    let parada = store.find_parada(id).await.map_err(parada_error)?;
    Ok(Json(parada))
}

#[instrument(skip(store))]
pub async fn create(
    State(store): State<SharedStore>,
    RequestBody(body): RequestBody,
) -> Result<Json<Parada>, ApiError> {
    let new_parada = new_parada(&validate(&body, rules::PARADA)?)?;
    let parada = store.create_parada(new_parada).await.map_err(parada_error)?;
    Ok(Json(parada))
}

#[instrument(skip(store))]
pub async fn update(
    State(store): State<SharedStore>,
    RecordId(id): RecordId,
    RequestBody(body): RequestBody,
) -> Result<Json<Parada>, ApiError> {
    let changes = new_parada(&validate(&body, rules::PARADA)?)?;
    let parada = store.update_parada(id, changes).await.map_err(parada_error)?;
    Ok(Json(parada))
}

#[instrument(skip(store))]
pub async fn destroy(State(store): State<SharedStore>, RecordId(id): RecordId) -> Result<StatusCode, ApiError> {
    store.delete_parada(id).await.map_err(parada_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn linhas_parada(
    State(store): State<SharedStore>,
    RecordId(id): RecordId,
) -> Result<Json<ParadaWithLinhas>, ApiError> {
    let parada = store.parada_with_linhas(id).await.map_err(parada_error)?;
    Ok(Json(parada))
}

/// Nearest stop among all stops to the posted position.
#[instrument(skip(store))]
pub async fn parada_proxima(
    State(store): State<SharedStore>,
    RequestBody(body): RequestBody,
) -> Result<Json<NearestParada>, ApiError> {
    let input = validate(&body, rules::PARADA_PROXIMA)?;
    let query = coordinate(&input)?;
    Ok(Json(NearestParada::search(query, store.all_paradas().await)))
}

pub fn coordinate(input: &Input) -> Result<Coordinate, ValidationError> {
    Ok(Coordinate::new(input.number("latitude")?, input.number("longitude")?))
}

fn new_parada(input: &Input) -> Result<NewParada, ValidationError> {
    Ok(NewParada {
        nome: input.string("nome")?,
        coordinate: coordinate(input)?,
    })
}

fn parada_error(error: StoreError) -> ApiError {
    match error {
        StoreError::DuplicateNome { .. } => ApiError::bad_request(NOME_REPETIDO),
        _ => ApiError::bad_request(ID_INVALIDO),
    }
}
