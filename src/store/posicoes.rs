use crate::domain::{Coordinate, PosicaoVeiculo};
use crate::store::{Store, StoreError};
use chrono::Utc;
use tracing::{debug, instrument};

impl Store {
    pub async fn all_posicoes(&self) -> Vec<PosicaoVeiculo> {
        self.tables.read().await.posicoes.values().cloned().collect()
    }

    pub async fn find_posicao(&self, id: u64) -> Result<PosicaoVeiculo, StoreError> {
        let tables = self.tables.read().await;
        tables.posicoes.get(&id).cloned().ok_or(StoreError::UnknownPosicao(id))
    }

    /// Moves a vehicle position. Positions are created and removed together with their vehicle.
    #[instrument(skip(self))]
    pub async fn update_posicao(&self, id: u64, coordinate: Coordinate) -> Result<PosicaoVeiculo, StoreError> {
        let mut tables = self.tables.write().await;
        let posicao = tables.posicoes.get_mut(&id).ok_or(StoreError::UnknownPosicao(id))?;

        let coordinate = coordinate.rounded_for_storage();
        posicao.latitude = coordinate.latitude;
        posicao.longitude = coordinate.longitude;
        posicao.updated_at = Utc::now();

        debug!(posicao_id = id, veiculo_id = posicao.veiculo_id, "📍 Moved veiculo to {:?}", coordinate);
        Ok(posicao.clone())
    }
}
