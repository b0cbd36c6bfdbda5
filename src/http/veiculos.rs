use crate::domain::{NewVeiculo, VeiculoWithLinha, VeiculoWithParadas, VeiculoWithPosicao};
use crate::http::error::ApiError;
use crate::http::record_id::RecordId;
use crate::http::request_body::RequestBody;
use crate::store::{SharedStore, StoreError};
use crate::validation::rules::{self, ID_INVALIDO, LINHA_ID_INVALIDO, NOME_REPETIDO};
use crate::validation::{Input, as_id, validate};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

pub async fn index(State(store): State<SharedStore>) -> Json<Vec<VeiculoWithLinha>> {
    Json(store.all_veiculos().await)
}

pub async fn show(State(store): State<SharedStore>, RecordId(id): RecordId) -> Result<Json<VeiculoWithLinha>, ApiError> {
    let veiculo = store.veiculo_with_linha(id).await.map_err(veiculo_error)?;
    Ok(Json(veiculo))
}

#[instrument(skip(store))]
pub async fn create(
    State(store): State<SharedStore>,
    RequestBody(body): RequestBody,
) -> Result<Json<VeiculoWithPosicao>, ApiError> {
    let new_veiculo = new_veiculo(&validate(&body, rules::VEICULO)?)?;
    let veiculo = store.create_veiculo(new_veiculo).await.map_err(veiculo_error)?;
    Ok(Json(veiculo))
}

#[instrument(skip(store))]
pub async fn update(
    State(store): State<SharedStore>,
    RecordId(id): RecordId,
    RequestBody(body): RequestBody,
) -> Result<Json<VeiculoWithLinha>, ApiError> {
    let changes = new_veiculo(&validate(&body, rules::VEICULO)?)?;
    let veiculo = store.update_veiculo(id, changes).await.map_err(veiculo_error)?;
    Ok(Json(veiculo))
}

#[instrument(skip(store))]
pub async fn destroy(State(store): State<SharedStore>, RecordId(id): RecordId) -> Result<StatusCode, ApiError> {
    store.delete_veiculo(id).await.map_err(veiculo_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn paradas_veiculo(
    State(store): State<SharedStore>,
    RecordId(id): RecordId,
) -> Result<Json<VeiculoWithParadas>, ApiError> {
    let veiculo = store.veiculo_with_paradas(id).await.map_err(veiculo_error)?;
    Ok(Json(veiculo))
}

fn new_veiculo(input: &Input) -> Result<NewVeiculo, ApiError> {
    let linha_id = as_id(input.number("linha_id")?).ok_or_else(|| ApiError::bad_request(LINHA_ID_INVALIDO))?;
    Ok(NewVeiculo {
        nome: input.string("nome")?,
        modelo: input.string("modelo")?,
        linha_id,
    })
}

fn veiculo_error(error: StoreError) -> ApiError {
    match error {
        StoreError::DuplicateNome { .. } => ApiError::bad_request(NOME_REPETIDO),
        StoreError::UnknownLinha(_) => ApiError::bad_request(LINHA_ID_INVALIDO),
        _ => ApiError::bad_request(ID_INVALIDO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    async fn store_with_linha() -> SharedStore {
        let store = Store::new().shared();
        store
            .create_linha(crate::domain::NewLinha {
                nome: "L1".to_string(),
                paradas: vec![],
            })
            .await
            .expect("linha is valid");
        store
    }

    #[tokio::test]
    async fn create_returns_the_veiculo_with_its_posicao() -> Result<(), ApiError> {
        let store = store_with_linha().await;

        let Json(created) = create(State(store), RequestBody(json!({ "nome": "V1", "modelo": "M", "linha_id": 1 }))).await?;

        let value = serde_json::to_value(&created).unwrap_or_default();
        assert_eq!(value["nome"], json!("V1"));
        assert_eq!(value["posicao_veiculos"]["latitude"], json!(0.0));
        assert_eq!(value["posicao_veiculos"]["veiculo_id"], json!(created.veiculo.id));
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_an_unknown_or_fractional_linha_id() {
        let store = store_with_linha().await;

        let unknown = create(State(store.clone()), RequestBody(json!({ "nome": "V1", "modelo": "M", "linha_id": 4 }))).await;
        let fractional = create(State(store), RequestBody(json!({ "nome": "V1", "modelo": "M", "linha_id": 1.5 }))).await;

        assert_eq!(unknown.err(), Some(ApiError::bad_request(LINHA_ID_INVALIDO)));
        assert_eq!(fractional.err(), Some(ApiError::bad_request(LINHA_ID_INVALIDO)));
    }

    #[tokio::test]
    async fn show_includes_the_linha_name() -> Result<(), ApiError> {
        let store = store_with_linha().await;
        let _veiculo = create(State(store.clone()), RequestBody(json!({ "nome": "V1", "modelo": "M", "linha_id": 1 }))).await?;

        let Json(veiculo) = show(State(store), RecordId(1)).await?;

        assert_eq!(veiculo.linha, "L1");
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_an_unknown_veiculo() {
        let store = store_with_linha().await;

        let result = update(State(store), RecordId(9), RequestBody(json!({ "nome": "V1", "modelo": "M", "linha_id": 1 }))).await;

        assert_eq!(result.err(), Some(ApiError::bad_request(ID_INVALIDO)));
    }
}
