use crate::domain::{Linha, LinhaWithParadas, LinhaWithVeiculos, NewLinha, Parada};
use crate::store::{Store, StoreError, ensure_unique_nome, next_id};
use chrono::Utc;
use tracing::{debug, info, instrument};

impl Store {
    pub async fn all_linhas(&self) -> Vec<Linha> {
        self.tables.read().await.linhas.values().cloned().collect()
    }

    pub async fn find_linha(&self, id: u64) -> Result<Linha, StoreError> {
        self.tables.read().await.linha(id).cloned()
    }

    pub async fn linha_with_paradas(&self, id: u64) -> Result<LinhaWithParadas, StoreError> {
        let tables = self.tables.read().await;
        let linha = tables.linha(id)?.clone();
        let paradas = tables.paradas_of(id);
        Ok(LinhaWithParadas { linha, paradas })
    }

    pub async fn linha_with_veiculos(&self, id: u64) -> Result<LinhaWithVeiculos, StoreError> {
        let tables = self.tables.read().await;
        let linha = tables.linha(id)?.clone();
        let veiculos = tables.veiculos.values().filter(|v| v.linha_id == id).cloned().collect();
        Ok(LinhaWithVeiculos { linha, veiculos })
    }

    /// Stops of a line in the order they were attached.
    pub async fn paradas_of_linha(&self, id: u64) -> Result<Vec<Parada>, StoreError> {
        let tables = self.tables.read().await;
        tables.linha(id)?;
        Ok(tables.paradas_of(id))
    }

    #[instrument(skip(self))]
    pub async fn create_linha(&self, new_linha: NewLinha) -> Result<LinhaWithParadas, StoreError> {
        let mut tables = self.tables.write().await;
        ensure_unique_nome(
            "linhas",
            &new_linha.nome,
            None,
            tables.linhas.values().map(|l| (l.id, l.nome.as_str())),
        )?;
        tables.ensure_paradas_exist(&new_linha.paradas)?;

        let now = Utc::now();
        let linha = Linha {
            id: next_id(&mut tables.sequences.linhas),
            nome: new_linha.nome,
            created_at: now,
            updated_at: now,
        };
        tables.linhas.insert(linha.id, linha.clone());
        tables.attach(linha.id, &new_linha.paradas);

        info!(linha_id = linha.id, "🛣️ Created linha '{}' with {} parada(s)", linha.nome, new_linha.paradas.len());
        let paradas = tables.paradas_of(linha.id);
        Ok(LinhaWithParadas { linha, paradas })
    }

    /// Renames a line and replaces its stops with `changes.paradas`.
    #[instrument(skip(self))]
    pub async fn update_linha(&self, id: u64, changes: NewLinha) -> Result<LinhaWithParadas, StoreError> {
        let mut tables = self.tables.write().await;
        ensure_unique_nome(
            "linhas",
            &changes.nome,
            Some(id),
            tables.linhas.values().map(|l| (l.id, l.nome.as_str())),
        )?;
        tables.ensure_paradas_exist(&changes.paradas)?;
        tables.linha(id)?;

        tables.detach(id);
        tables.attach(id, &changes.paradas);

        let linha = tables.linhas.get_mut(&id).ok_or(StoreError::UnknownLinha(id))?;
        linha.nome = changes.nome;
        linha.updated_at = Utc::now();
        let linha = linha.clone();

        info!(linha_id = id, "🛣️ Updated linha '{}', now {} parada(s)", linha.nome, changes.paradas.len());
        let paradas = tables.paradas_of(id);
        Ok(LinhaWithParadas { linha, paradas })
    }

    /// Deletes a line together with its vehicles and their positions.
    #[instrument(skip(self))]
    pub async fn delete_linha(&self, id: u64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let linha = tables.linhas.remove(&id).ok_or(StoreError::UnknownLinha(id))?;
        tables.detach(id);

        let veiculo_ids: Vec<u64> = tables.veiculos.values().filter(|v| v.linha_id == id).map(|v| v.id).collect();
        for veiculo_id in &veiculo_ids {
            tables.delete_veiculo(*veiculo_id);
        }
        debug!(linha_id = id, "🛣️ Removed {} veiculo(s) of linha", veiculo_ids.len());

        info!(linha_id = id, "🛣️ Deleted linha '{}'", linha.nome);
        Ok(())
    }
}
