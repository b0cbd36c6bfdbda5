use chrono::{DateTime, Utc};
use serde::Serialize;

/// Last known position of a vehicle. Every vehicle owns exactly one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PosicaoVeiculo {
    pub id: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub veiculo_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
