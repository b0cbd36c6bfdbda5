use crate::domain::nearest::Located;
use crate::domain::{Coordinate, Linha};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stop, a fixed geographic point with a name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Parada {
    pub id: u64,
    pub nome: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Located for Parada {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewParada {
    pub nome: String,
    pub coordinate: Coordinate,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParadaWithLinhas {
    #[serde(flatten)]
    pub parada: Parada,
    pub linhas: Vec<Linha>,
}
