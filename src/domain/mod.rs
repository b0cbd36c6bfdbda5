mod coordinate;
mod linha;
pub mod nearest;
mod parada;
mod posicao_veiculo;
mod veiculo;

pub use coordinate::{Coordinate, distance};
pub use linha::{Linha, LinhaParada, LinhaWithParadas, LinhaWithVeiculos, NewLinha};
pub use parada::{NewParada, Parada, ParadaWithLinhas};
pub use posicao_veiculo::PosicaoVeiculo;
pub use veiculo::{NewVeiculo, Veiculo, VeiculoWithLinha, VeiculoWithParadas, VeiculoWithPosicao};
