use crate::domain::{Parada, Veiculo};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A transit line. Its stops are kept in the order they were attached.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Linha {
    pub id: u64,
    pub nome: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewLinha {
    pub nome: String,
    pub paradas: Vec<u64>,
}

/// Row of the many-to-many relation between lines and stops.
#[derive(Clone, Debug, PartialEq)]
pub struct LinhaParada {
    pub id: u64,
    pub linha_id: u64,
    pub parada_id: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinhaWithParadas {
    #[serde(flatten)]
    pub linha: Linha,
    pub paradas: Vec<Parada>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinhaWithVeiculos {
    #[serde(flatten)]
    pub linha: Linha,
    pub veiculos: Vec<Veiculo>,
}
