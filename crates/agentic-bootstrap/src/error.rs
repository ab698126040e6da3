//! Erros fatais do bootstrap: qualquer um deles impede o serviço de iniciar
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Falha ao gravar configuração padrão em {}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Falha ao criar diretório {}", .path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Falha ao executar o serviço '{program}'")]
    ServiceLaunch {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl BootstrapError {
    /// Código de saída do processo (126/127 seguem a convenção dos shells)
    pub fn exit_code(&self) -> u8 {
        match self {
            BootstrapError::ServiceLaunch { source, .. }
                if source.kind() == io::ErrorKind::NotFound =>
            {
                127
            }
            BootstrapError::ServiceLaunch { .. } => 126,
            BootstrapError::ConfigWrite { .. } | BootstrapError::DirectoryCreate { .. } => 1,
        }
    }
}
