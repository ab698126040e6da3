use super::error::DeployError;
use crate::build::BuildContext;
use crate::descriptor::{ContainerDescriptor, ImageDescriptor};
use std::fmt;

/// Estado de um container identificado pelo nome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    /// Nenhum container com esse nome
    Absent,
    /// Existe, mas não está rodando (created, exited, dead)
    Stopped,
    /// Rodando, pausado ou reiniciando
    Running,
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerState::Absent => write!(f, "absent"),
            ContainerState::Stopped => write!(f, "stopped"),
            ContainerState::Running => write!(f, "running"),
        }
    }
}

/// Resultado de stop/remove: o alvo pode ter sumido entre a leitura de estado e o comando
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    NotFound,
}

/// Operações do runtime de containers usadas pelo deploy
pub trait ContainerRuntime {
    fn build(&self, image: &ImageDescriptor, context: &BuildContext) -> Result<(), DeployError>;
    fn state(&self, name: &str) -> Result<ContainerState, DeployError>;
    fn stop(&self, name: &str) -> Result<CommandOutcome, DeployError>;
    fn remove(&self, name: &str) -> Result<CommandOutcome, DeployError>;

    /// Inicia o container e retorna o id informado pelo runtime
    fn run(
        &self,
        image: &ImageDescriptor,
        container: &ContainerDescriptor,
    ) -> Result<String, DeployError>;
}
