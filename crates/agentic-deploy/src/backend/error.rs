//! Erros do ciclo de vida do deploy
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Contexto de build inválido em {}: {reason}", .path.display())]
    InvalidContext { path: PathBuf, reason: String },

    #[error("Falha no build da imagem '{image}' ({})", describe_code(.code))]
    Build { image: String, code: Option<i32> },

    #[error("Comando '{command}' falhou ({}): {stderr}", describe_code(.code))]
    RuntimeCommand {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Runtime recusou iniciar o container '{name}' ({}): {stderr}", describe_code(.code))]
    Launch {
        name: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Falha ao executar '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Saída inesperada de 'inspect' para '{name}'")]
    Inspect {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DeployError {
    /// Código de saída propagado pelo CLI (o do passo que falhou, ou 1)
    pub fn exit_code(&self) -> u8 {
        let code = match self {
            DeployError::Build { code, .. }
            | DeployError::RuntimeCommand { code, .. }
            | DeployError::Launch { code, .. } => *code,
            _ => None,
        };

        code.and_then(|c| u8::try_from(c).ok())
            .filter(|c| *c != 0)
            .unwrap_or(1)
    }

    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            DeployError::InvalidContext { .. } | DeployError::Build { .. }
        )
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("código {code}"),
        None => "encerrado por sinal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_propagation() {
        let err = DeployError::Launch {
            name: "backend".to_string(),
            code: Some(125),
            stderr: "port is already allocated".to_string(),
        };
        assert_eq!(err.exit_code(), 125);

        let err = DeployError::Build {
            image: "x:latest".to_string(),
            code: None,
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.is_build_error());
    }

    #[test]
    fn test_out_of_range_code_falls_back_to_one() {
        let err = DeployError::RuntimeCommand {
            command: "docker stop backend".to_string(),
            code: Some(-1),
            stderr: String::new(),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_message_mentions_signal() {
        let err = DeployError::Build {
            image: "x:latest".to_string(),
            code: None,
        };
        assert!(err.to_string().contains("sinal"));
    }
}
