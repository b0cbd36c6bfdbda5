use crate::domain::{NewParada, Parada, ParadaWithLinhas};
use crate::store::{Store, StoreError, ensure_unique_nome, next_id};
use chrono::Utc;
use tracing::{debug, info, instrument};

impl Store {
    /// All stops in ascending id order.
    pub async fn all_paradas(&self) -> Vec<Parada> {
        self.tables.read().await.paradas.values().cloned().collect()
    }

    pub async fn find_parada(&self, id: u64) -> Result<Parada, StoreError> {
        self.tables.read().await.parada(id).cloned()
    }

    pub async fn parada_with_linhas(&self, id: u64) -> Result<ParadaWithLinhas, StoreError> {
        let tables = self.tables.read().await;
        let parada = tables.parada(id)?.clone();
        let linhas = tables.linhas_of(id);
        Ok(ParadaWithLinhas { parada, linhas })
    }

    #[instrument(skip(self))]
    pub async fn create_parada(&self, new_parada: NewParada) -> Result<Parada, StoreError> {
        let mut tables = self.tables.write().await;
        ensure_unique_nome(
            "paradas",
            &new_parada.nome,
            None,
            tables.paradas.values().map(|p| (p.id, p.nome.as_str())),
        )?;

        let now = Utc::now();
        let coordinate = new_parada.coordinate.rounded_for_storage();
        let parada = Parada {
            id: next_id(&mut tables.sequences.paradas),
            nome: new_parada.nome,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            created_at: now,
            updated_at: now,
        };
        tables.paradas.insert(parada.id, parada.clone());

        info!(parada_id = parada.id, "🚏 Created parada '{}'", parada.nome);
        Ok(parada)
    }

    #[instrument(skip(self))]
    pub async fn update_parada(&self, id: u64, changes: NewParada) -> Result<Parada, StoreError> {
        let mut tables = self.tables.write().await;
        ensure_unique_nome(
            "paradas",
            &changes.nome,
            Some(id),
            tables.paradas.values().map(|p| (p.id, p.nome.as_str())),
        )?;

        let parada = tables.paradas.get_mut(&id).ok_or(StoreError::UnknownParada(id))?;
        let coordinate = changes.coordinate.rounded_for_storage();
        parada.nome = changes.nome;
        parada.latitude = coordinate.latitude;
        parada.longitude = coordinate.longitude;
        parada.updated_at = Utc::now();

        info!(parada_id = id, "🚏 Updated parada '{}'", parada.nome);
        Ok(parada.clone())
    }

    #[instrument(skip(self))]
    pub async fn delete_parada(&self, id: u64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let parada = tables.paradas.remove(&id).ok_or(StoreError::UnknownParada(id))?;

        let before = tables.linha_paradas.len();
        tables.linha_paradas.retain(|row| row.parada_id != id);
        debug!(parada_id = id, "🚏 Detached parada from {} linha(s)", before - tables.linha_paradas.len());

        info!(parada_id = id, "🚏 Deleted parada '{}'", parada.nome);
        Ok(())
    }
}
