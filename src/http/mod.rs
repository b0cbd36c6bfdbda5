use crate::app_config::AppConfig;
use crate::store::SharedStore;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::io;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

mod error;
mod linhas;
mod paradas;
mod posicoes;
mod record_id;
mod request_body;
mod veiculos;

pub fn router(store: SharedStore, config: &AppConfig) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(greeting))
        .route("/paradas", get(paradas::index).post(paradas::create))
        .route(
            "/paradas/{id}",
            get(paradas::show).put(paradas::update).patch(paradas::update).delete(paradas::destroy),
        )
        .route("/linhas", get(linhas::index).post(linhas::create))
        .route(
            "/linhas/{id}",
            get(linhas::show).put(linhas::update).patch(linhas::update).delete(linhas::destroy),
        )
        .route("/veiculo", get(veiculos::index).post(veiculos::create))
        .route(
            "/veiculo/{id}",
            get(veiculos::show).put(veiculos::update).patch(veiculos::update).delete(veiculos::destroy),
        )
        .route("/posicao_veiculo", get(posicoes::index))
        .route("/posicao_veiculo/{id}", get(posicoes::show).put(posicoes::update).patch(posicoes::update))
        .route("/linhasParada/{id}", get(paradas::linhas_parada))
        .route("/veiculosLinha/{id}", get(linhas::veiculos_linha))
        .route("/paradasLinha/{id}", get(linhas::paradas_linha))
        .route("/paradasVeiculo/{id}", get(veiculos::paradas_veiculo))
        .route("/paradaProxima", post(paradas::parada_proxima))
        .route("/paradaProximaLinha", post(linhas::parada_proxima_linha))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.server().request_timeout()))
        .layer(cors)
        .with_state(store)
}

/// Serves `app` on `listener` until `shutdown` completes.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> io::Result<()> {
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}

async fn greeting() -> Json<Value> {
    Json(json!({ "greeting": "OK" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use crate::store::Store;
    use pretty_assertions::assert_eq;
    use reqwest::{Client, StatusCode};
    use std::error::Error;
    use std::time::Duration;
    use test_log::test;

    type TestResult = Result<(), Box<dyn Error>>;

    async fn spawn_server() -> io::Result<String> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        let config = AppConfigBuilder::new().request_timeout(Duration::from_secs(2)).build();
        let app = router(Store::new().shared(), &config);

        tokio::spawn(async move { axum::serve(listener, app).await });
        Ok(format!("http://{}", address))
    }

    async fn post(client: &Client, url: String, body: Value) -> Result<(StatusCode, Value), reqwest::Error> {
        let response = client.post(url).json(&body).send().await?;
        let status = response.status();
        Ok((status, response.json().await?))
    }

    #[test(tokio::test)]
    async fn root_greets() -> TestResult {
        let base = spawn_server().await?;

        let body: Value = reqwest::get(&base).await?.json().await?;

        assert_eq!(body, json!({ "greeting": "OK" }));
        Ok(())
    }

    #[test(tokio::test)]
    async fn nearest_parada_of_a_linha_end_to_end() -> TestResult {
        let base = spawn_server().await?;
        let client = Client::new();

        for (nome, latitude, longitude) in [("A", 0.0, 0.0), ("B", 10.0, 10.1), ("C", 20.0, 20.0)] {
            let (status, _) = post(
                &client,
                format!("{}/paradas", base),
                json!({ "nome": nome, "latitude": latitude, "longitude": longitude }),
            )
            .await?;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, linha) = post(&client, format!("{}/linhas", base), json!({ "nome": "L1", "paradas": [1, 3] })).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(linha["paradas"].as_array().map(Vec::len), Some(2));

        let (_, nearest_overall) = post(
            &client,
            format!("{}/paradaProxima", base),
            json!({ "latitude": 10.0, "longitude": 10.0 }),
        )
        .await?;
        let (_, nearest_on_linha) = post(
            &client,
            format!("{}/paradaProximaLinha", base),
            json!({ "linha_id": 1, "latitude": 10.0, "longitude": 10.0 }),
        )
        .await?;

        assert_eq!(nearest_overall["nome"], json!("B"));
        assert_eq!(nearest_on_linha["nome"], json!("A"));
        Ok(())
    }

    #[test(tokio::test)]
    async fn nearest_parada_without_paradas_is_an_empty_array() -> TestResult {
        let base = spawn_server().await?;

        let (status, body) = post(
            &Client::new(),
            format!("{}/paradaProxima", base),
            json!({ "latitude": 1.0, "longitude": 1.0 }),
        )
        .await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
        Ok(())
    }

    #[test(tokio::test)]
    async fn validation_failures_are_bad_requests_with_a_message() -> TestResult {
        let base = spawn_server().await?;

        let (status, body) = post(&Client::new(), format!("{}/paradaProximaLinha", base), json!({ "latitude": 1.0 })).await?;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "É preciso informar uma linha" }));
        Ok(())
    }

    #[test(tokio::test)]
    async fn a_name_that_is_not_text_is_a_bad_request() -> TestResult {
        let base = spawn_server().await?;

        let (status, body) = post(
            &Client::new(),
            format!("{}/paradas", base),
            json!({ "nome": { "x": 1 }, "latitude": 1, "longitude": 1 }),
        )
        .await?;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "O nome deve ser um texto" }));
        Ok(())
    }

    #[test(tokio::test)]
    async fn a_malformed_json_body_is_a_bad_request_with_a_message() -> TestResult {
        let base = spawn_server().await?;

        let response = Client::new()
            .post(format!("{}/paradaProxima", base))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body("{bad")
            .send()
            .await?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>().await?, json!({ "message": "Corpo da requisição inválido" }));
        Ok(())
    }

    #[test(tokio::test)]
    async fn nearest_parada_accepts_a_form_body() -> TestResult {
        let base = spawn_server().await?;
        let client = Client::new();
        post(&client, format!("{}/paradas", base), json!({ "nome": "A", "latitude": 1, "longitude": 1 })).await?;

        let response = client
            .post(format!("{}/paradaProxima", base))
            .form(&[("latitude", "1"), ("longitude", "1")])
            .send()
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.json::<Value>().await?["nome"], json!("A"));
        Ok(())
    }

    #[test(tokio::test)]
    async fn unknown_linha_for_nearest_parada_is_not_found() -> TestResult {
        let base = spawn_server().await?;

        let (status, body) = post(
            &Client::new(),
            format!("{}/paradaProximaLinha", base),
            json!({ "linha_id": 12, "latitude": 1.0, "longitude": 1.0 }),
        )
        .await?;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "ID da linha inválido" }));
        Ok(())
    }

    #[test(tokio::test)]
    async fn a_path_id_that_is_not_a_number_is_rejected() -> TestResult {
        let base = spawn_server().await?;

        let response = reqwest::get(format!("{}/paradas/abc", base)).await?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>().await?, json!({ "message": "ID inválido" }));
        Ok(())
    }

    #[test(tokio::test)]
    async fn deleting_a_linha_removes_its_veiculos() -> TestResult {
        let base = spawn_server().await?;
        let client = Client::new();
        post(&client, format!("{}/linhas", base), json!({ "nome": "L1", "paradas": [] })).await?;
        let (status, _) = post(
            &client,
            format!("{}/veiculo", base),
            json!({ "nome": "V1", "modelo": "M", "linha_id": 1 }),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);

        let deleted = client.delete(format!("{}/linhas/1", base)).send().await?;
        let veiculos: Value = reqwest::get(format!("{}/veiculo", base)).await?.json().await?;
        let veiculos_linha = reqwest::get(format!("{}/veiculosLinha/1", base)).await?;

        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
        assert_eq!(veiculos, json!([]));
        assert_eq!(veiculos_linha.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[test(tokio::test)]
    async fn moving_a_veiculo_updates_its_posicao() -> TestResult {
        let base = spawn_server().await?;
        let client = Client::new();
        post(&client, format!("{}/linhas", base), json!({ "nome": "L1", "paradas": [] })).await?;
        post(&client, format!("{}/veiculo", base), json!({ "nome": "V1", "modelo": "M", "linha_id": 1 })).await?;

        let response = client
            .put(format!("{}/posicao_veiculo/1", base))
            .json(&json!({ "latitude": -23.55, "longitude": "-46.63" }))
            .send()
            .await?;
        let posicao: Value = response.json().await?;

        assert_eq!(posicao["latitude"], json!(-23.55));
        assert_eq!(posicao["longitude"], json!(-46.63));
        assert_eq!(posicao["veiculo_id"], json!(1));
        Ok(())
    }
}
