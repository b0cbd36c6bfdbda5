use crate::validation::{FieldRules, Rule};

pub const ID_INVALIDO: &str = "ID inválido";
pub const LINHA_ID_INVALIDO: &str = "ID da linha inválido";
pub const PARADA_ID_INVALIDO: &str = "ID de parada inválido";
pub const NOME_REPETIDO: &str = "O nome não pode ser repetido";
pub const PARADAS_NAO_VETOR: &str = "As paradas devem ser um vetor";
pub const CORPO_INVALIDO: &str = "Corpo da requisição inválido";

const NOME: FieldRules = FieldRules {
    field: "nome",
    checks: &[(Rule::Required, "É preciso informar um nome"), (Rule::Text, "O nome deve ser um texto")],
};

const LATITUDE: FieldRules = FieldRules {
    field: "latitude",
    checks: &[
        (Rule::Required, "É preciso informar a latitude"),
        (Rule::Number, "A latitude deve ser um número"),
    ],
};

const LONGITUDE: FieldRules = FieldRules {
    field: "longitude",
    checks: &[
        (Rule::Required, "É preciso informar a longitude"),
        (Rule::Number, "A longitude deve ser um número"),
    ],
};

pub const PARADA: &[FieldRules] = &[NOME, LONGITUDE, LATITUDE];

pub const LINHA: &[FieldRules] = &[
    NOME,
    FieldRules {
        field: "paradas",
        checks: &[(Rule::Required, "É preciso informar as paradas"), (Rule::Array, PARADAS_NAO_VETOR)],
    },
];

pub const VEICULO: &[FieldRules] = &[
    NOME,
    FieldRules {
        field: "modelo",
        checks: &[(Rule::Required, "É precisa informar um modelo"), (Rule::Text, "O modelo deve ser um texto")],
    },
    FieldRules {
        field: "linha_id",
        checks: &[
            (Rule::Required, "É preciso informar a linha do veículo"),
            (Rule::Number, "Informe o ID da linha do veículo"),
            (Rule::Min(0.0), LINHA_ID_INVALIDO),
        ],
    },
];

pub const POSICAO: &[FieldRules] = &[LONGITUDE, LATITUDE];

pub const PARADA_PROXIMA: &[FieldRules] = &[LONGITUDE, LATITUDE];

pub const PARADA_PROXIMA_LINHA: &[FieldRules] = &[
    FieldRules {
        field: "linha_id",
        checks: &[
            (Rule::Required, "É preciso informar uma linha"),
            (Rule::Number, LINHA_ID_INVALIDO),
        ],
    },
    LONGITUDE,
    LATITUDE,
];
