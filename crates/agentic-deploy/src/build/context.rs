//! Validação do contexto de build antes de chamar o runtime

use crate::backend::error::DeployError;
use crate::descriptor::ImageDescriptor;
use std::path::PathBuf;

/// Contexto de build já validado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Diretório enviado ao runtime como contexto
    pub root: PathBuf,

    /// Dockerfile efetivamente usado
    pub dockerfile: PathBuf,
}

impl BuildContext {
    /// Detecta e valida o contexto declarado na imagem
    pub fn detect(image: &ImageDescriptor) -> Result<Self, DeployError> {
        let root = image.context.clone();

        if !root.is_dir() {
            return Err(DeployError::InvalidContext {
                path: root,
                reason: "diretório de contexto não existe".to_string(),
            });
        }

        let dockerfile = image
            .dockerfile
            .clone()
            .unwrap_or_else(|| root.join("Dockerfile"));

        if !dockerfile.is_file() {
            return Err(DeployError::InvalidContext {
                path: root,
                reason: format!("Dockerfile não encontrado: {}", dockerfile.display()),
            });
        }

        Ok(Self { root, dockerfile })
    }
}
