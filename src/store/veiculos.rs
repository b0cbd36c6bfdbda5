use crate::domain::{
    Coordinate, NewVeiculo, PosicaoVeiculo, Veiculo, VeiculoWithLinha, VeiculoWithParadas, VeiculoWithPosicao,
};
use crate::store::{Store, StoreError, Tables, ensure_unique_nome, next_id};
use chrono::Utc;
use tracing::{info, instrument};

impl Store {
    pub async fn all_veiculos(&self) -> Vec<VeiculoWithLinha> {
        let tables = self.tables.read().await;
        tables
            .veiculos
            .values()
            .filter_map(|veiculo| with_linha(&tables, veiculo).ok())
            .collect()
    }

    pub async fn veiculo_with_linha(&self, id: u64) -> Result<VeiculoWithLinha, StoreError> {
        let tables = self.tables.read().await;
        with_linha(&tables, tables.veiculo(id)?)
    }

    /// The vehicle together with the stops of the line it runs on.
    pub async fn veiculo_with_paradas(&self, id: u64) -> Result<VeiculoWithParadas, StoreError> {
        let tables = self.tables.read().await;
        let veiculo = tables.veiculo(id)?.clone();
        let paradas = tables.paradas_of(veiculo.linha_id);
        Ok(VeiculoWithParadas { veiculo, paradas })
    }

    /// Creates a vehicle and its position record, which starts out at (0, 0).
    #[instrument(skip(self))]
    pub async fn create_veiculo(&self, new_veiculo: NewVeiculo) -> Result<VeiculoWithPosicao, StoreError> {
        let mut tables = self.tables.write().await;
        ensure_unique_nome(
            "veiculos",
            &new_veiculo.nome,
            None,
            tables.veiculos.values().map(|v| (v.id, v.nome.as_str())),
        )?;
        tables.linha(new_veiculo.linha_id)?;

        let now = Utc::now();
        let veiculo = Veiculo {
            id: next_id(&mut tables.sequences.veiculos),
            nome: new_veiculo.nome,
            modelo: new_veiculo.modelo,
            linha_id: new_veiculo.linha_id,
            created_at: now,
            updated_at: now,
        };
        let origin = Coordinate::default();
        let posicao = PosicaoVeiculo {
            id: next_id(&mut tables.sequences.posicoes),
            latitude: origin.latitude,
            longitude: origin.longitude,
            veiculo_id: veiculo.id,
            created_at: now,
            updated_at: now,
        };
        tables.veiculos.insert(veiculo.id, veiculo.clone());
        tables.posicoes.insert(posicao.id, posicao.clone());

        info!(veiculo_id = veiculo.id, "🚌 Created veiculo '{}' on linha {}", veiculo.nome, veiculo.linha_id);
        Ok(VeiculoWithPosicao {
            veiculo,
            posicao_veiculos: Some(posicao),
        })
    }

    #[instrument(skip(self))]
    pub async fn update_veiculo(&self, id: u64, changes: NewVeiculo) -> Result<VeiculoWithLinha, StoreError> {
        let mut tables = self.tables.write().await;
        ensure_unique_nome(
            "veiculos",
            &changes.nome,
            Some(id),
            tables.veiculos.values().map(|v| (v.id, v.nome.as_str())),
        )?;
        tables.linha(changes.linha_id)?;

        let veiculo = tables.veiculos.get_mut(&id).ok_or(StoreError::UnknownVeiculo(id))?;
        veiculo.nome = changes.nome;
        veiculo.modelo = changes.modelo;
        veiculo.linha_id = changes.linha_id;
        veiculo.updated_at = Utc::now();
        let veiculo = veiculo.clone();

        info!(veiculo_id = id, "🚌 Updated veiculo '{}'", veiculo.nome);
        with_linha(&tables, &veiculo)
    }

    #[instrument(skip(self))]
    pub async fn delete_veiculo(&self, id: u64) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let veiculo = tables.delete_veiculo(id).ok_or(StoreError::UnknownVeiculo(id))?;
        info!(veiculo_id = id, "🚌 Deleted veiculo '{}'", veiculo.nome);
        Ok(())
    }
}

fn with_linha(tables: &Tables, veiculo: &Veiculo) -> Result<VeiculoWithLinha, StoreError> {
    let linha = tables.linha(veiculo.linha_id)?;
    Ok(VeiculoWithLinha {
        veiculo: veiculo.clone(),
        linha: linha.nome.clone(),
    })
}
