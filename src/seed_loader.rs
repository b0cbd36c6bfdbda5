use crate::domain::{Coordinate, NewLinha, NewParada, NewVeiculo};
use crate::extensions::path_ext::FileName;
use crate::store::{Store, StoreError};
use serde::Deserialize;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, instrument};

#[derive(Debug, Deserialize)]
struct Seed {
    #[serde(default)]
    paradas: Vec<SeedParada>,
    #[serde(default)]
    linhas: Vec<SeedLinha>,
    #[serde(default)]
    veiculos: Vec<SeedVeiculo>,
}

#[derive(Debug, Deserialize)]
struct SeedParada {
    nome: String,
    latitude: f64,
    longitude: f64,
}

/// A line referencing its stops by name.
#[derive(Debug, Deserialize)]
struct SeedLinha {
    nome: String,
    #[serde(default)]
    paradas: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SeedVeiculo {
    nome: String,
    modelo: String,
    linha: String,
}

#[derive(Debug, Default, PartialEq)]
pub struct SeedSummary {
    pub paradas: usize,
    pub linhas: usize,
    pub veiculos: usize,
}

/// Loads the JSON seed file at `path` into `store`.
#[instrument(skip(store))]
pub async fn load_seed_from(path: &Path, store: &Store) -> Result<SeedSummary, SeedError> {
    info!("📁 Loading seed data from '{}'...", path.string_file_name());
    let content = fs::read_to_string(path).await.map_err(|e| SeedError::Io {
        source: e,
        path: path.to_path_buf(),
    })?;
    let seed: Seed = serde_json::from_str(&content).map_err(|e| SeedError::Json {
        source: e,
        path: path.to_path_buf(),
    })?;

    let summary = apply(seed, store).await?;
    info!(
        "📁 Loading seed data from '{}'... OK, {} parada(s), {} linha(s), {} veiculo(s)",
        path.string_file_name(),
        summary.paradas,
        summary.linhas,
        summary.veiculos
    );
    Ok(summary)
}

async fn apply(seed: Seed, store: &Store) -> Result<SeedSummary, SeedError> {
    let mut parada_ids = HashMap::new();
    for parada in seed.paradas {
        let created = store
            .create_parada(NewParada {
                nome: parada.nome,
                coordinate: Coordinate::new(parada.latitude, parada.longitude),
            })
            .await?;
        parada_ids.insert(created.nome, created.id);
    }

    let mut linha_ids = HashMap::new();
    for linha in &seed.linhas {
        let paradas = linha
            .paradas
            .iter()
            .map(|nome| parada_ids.get(nome).copied().ok_or_else(|| SeedError::UnknownParada(nome.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        let created = store
            .create_linha(NewLinha {
                nome: linha.nome.clone(),
                paradas,
            })
            .await?;
        linha_ids.insert(created.linha.nome, created.linha.id);
    }

    for veiculo in &seed.veiculos {
        let linha_id = linha_ids
            .get(&veiculo.linha)
            .copied()
            .ok_or_else(|| SeedError::UnknownLinha(veiculo.linha.clone()))?;
        store
            .create_veiculo(NewVeiculo {
                nome: veiculo.nome.clone(),
                modelo: veiculo.modelo.clone(),
                linha_id,
            })
            .await?;
    }

    Ok(SeedSummary {
        paradas: parada_ids.len(),
        linhas: linha_ids.len(),
        veiculos: seed.veiculos.len(),
    })
}

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("could not read '{}': {}", path.display(), source)]
    Io { source: io::Error, path: PathBuf },
    #[error("invalid seed file '{}': {}", path.display(), source)]
    Json { source: serde_json::Error, path: PathBuf },
    #[error("linha references unknown parada '{0}'")]
    UnknownParada(String),
    #[error("veiculo references unknown linha '{0}'")]
    UnknownLinha(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
