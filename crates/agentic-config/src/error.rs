use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Falha ao ler configuração em {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Linha {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Valor booleano inválido em [{section}] {key}: '{value}'")]
    InvalidBool {
        section: String,
        key: String,
        value: String,
    },
}
