use crate::domain::{Parada, PosicaoVeiculo};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Veiculo {
    pub id: u64,
    pub nome: String,
    pub modelo: String,
    pub linha_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewVeiculo {
    pub nome: String,
    pub modelo: String,
    pub linha_id: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VeiculoWithLinha {
    #[serde(flatten)]
    pub veiculo: Veiculo,
    /// Name of the line the vehicle is assigned to.
    pub linha: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VeiculoWithPosicao {
    #[serde(flatten)]
    pub veiculo: Veiculo,
    pub posicao_veiculos: Option<PosicaoVeiculo>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VeiculoWithParadas {
    #[serde(flatten)]
    pub veiculo: Veiculo,
    pub paradas: Vec<Parada>,
}
