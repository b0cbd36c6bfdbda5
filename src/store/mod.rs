use crate::domain::{Linha, LinhaParada, Parada, PosicaoVeiculo, Veiculo};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

mod linhas;
mod paradas;
mod posicoes;
mod veiculos;

pub type SharedStore = Arc<Store>;

/// In-memory relational store for lines, stops, vehicles and their positions.
///
/// All tables sit behind a single lock so operations spanning several tables (attaching stops to a new line,
/// cascading deletes) are atomic.
#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<Tables>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    pub fn shared(self) -> SharedStore {
        Arc::new(self)
    }
}

#[derive(Debug, Default)]
struct Tables {
    paradas: BTreeMap<u64, Parada>,
    linhas: BTreeMap<u64, Linha>,
    linha_paradas: Vec<LinhaParada>,
    veiculos: BTreeMap<u64, Veiculo>,
    posicoes: BTreeMap<u64, PosicaoVeiculo>,
    sequences: Sequences,
}

/// Last id handed out per table. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
struct Sequences {
    paradas: u64,
    linhas: u64,
    linha_paradas: u64,
    veiculos: u64,
    posicoes: u64,
}

fn next_id(sequence: &mut u64) -> u64 {
    *sequence += 1;
    *sequence
}

impl Tables {
    fn parada(&self, id: u64) -> Result<&Parada, StoreError> {
        self.paradas.get(&id).ok_or(StoreError::UnknownParada(id))
    }

    fn linha(&self, id: u64) -> Result<&Linha, StoreError> {
        self.linhas.get(&id).ok_or(StoreError::UnknownLinha(id))
    }

    fn veiculo(&self, id: u64) -> Result<&Veiculo, StoreError> {
        self.veiculos.get(&id).ok_or(StoreError::UnknownVeiculo(id))
    }

    /// Stops of a line, in the order they were attached.
    fn paradas_of(&self, linha_id: u64) -> Vec<Parada> {
        self.linha_paradas
            .iter()
            .filter(|row| row.linha_id == linha_id)
            .filter_map(|row| self.paradas.get(&row.parada_id))
            .cloned()
            .collect()
    }

    fn linhas_of(&self, parada_id: u64) -> Vec<Linha> {
        self.linha_paradas
            .iter()
            .filter(|row| row.parada_id == parada_id)
            .filter_map(|row| self.linhas.get(&row.linha_id))
            .cloned()
            .collect()
    }

    fn attach(&mut self, linha_id: u64, paradas: &[u64]) {
        for parada_id in paradas {
            let id = next_id(&mut self.sequences.linha_paradas);
            self.linha_paradas.push(LinhaParada {
                id,
                linha_id,
                parada_id: *parada_id,
            });
        }
    }

    fn detach(&mut self, linha_id: u64) {
        self.linha_paradas.retain(|row| row.linha_id != linha_id);
    }

    fn ensure_paradas_exist(&self, paradas: &[u64]) -> Result<(), StoreError> {
        paradas.iter().try_for_each(|id| self.parada(*id).map(|_| ()))
    }

    fn delete_veiculo(&mut self, id: u64) -> Option<Veiculo> {
        let veiculo = self.veiculos.remove(&id)?;
        self.posicoes.retain(|_, posicao| posicao.veiculo_id != id);
        Some(veiculo)
    }
}

/// Fails with [`StoreError::DuplicateNome`] when another record than `own_id` already uses `nome`.
fn ensure_unique_nome<'a>(
    table: &'static str,
    nome: &str,
    own_id: Option<u64>,
    mut existing: impl Iterator<Item = (u64, &'a str)>,
) -> Result<(), StoreError> {
    if existing.any(|(id, existing_nome)| existing_nome == nome && Some(id) != own_id) {
        return Err(StoreError::DuplicateNome {
            table,
            nome: nome.to_string(),
        });
    }
    Ok(())
}

#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("unknown parada '{0}'")]
    UnknownParada(u64),
    #[error("unknown linha '{0}'")]
    UnknownLinha(u64),
    #[error("unknown veiculo '{0}'")]
    UnknownVeiculo(u64),
    #[error("unknown posicao_veiculo '{0}'")]
    UnknownPosicao(u64),
    #[error("{table} already contains a record named '{nome}'")]
    DuplicateNome { table: &'static str, nome: String },
}
