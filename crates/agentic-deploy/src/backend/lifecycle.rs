//! Ciclo de vida do deploy: build -> stop -> remove -> run

use super::error::DeployError;
use super::runtime::{CommandOutcome, ContainerRuntime, ContainerState};
use crate::build::BuildContext;
use crate::descriptor::{ContainerDescriptor, ImageDescriptor};
use tracing::{info, warn};

/// Resumo de um deploy bem-sucedido
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub image: String,
    pub container_id: String,
    /// Estado em que a instância anterior foi encontrada
    pub previous: ContainerState,
    pub url: String,
}

/// Orquestra a substituição do container do serviço
pub struct Deployer<R> {
    runtime: R,
}

impl<R: ContainerRuntime> Deployer<R> {
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }

    /// Executa o deploy completo. Cada passo depende do sucesso do anterior.
    ///
    /// Ao retornar `Ok`, existe exatamente um container com o nome do
    /// descritor, criado a partir da imagem recém-construída.
    pub fn deploy(
        &self,
        image: &ImageDescriptor,
        container: &ContainerDescriptor,
    ) -> Result<DeployReport, DeployError> {
        let reference = image.reference();

        println!("🔍 Validando contexto de build...");
        let context = BuildContext::detect(image)?;
        println!("✅ Contexto: {}", context.root.display());

        println!("\n🔨 Construindo imagem {reference}...");
        self.runtime.build(image, &context)?;
        println!("✅ Imagem pronta: {reference}");

        println!("\n🛑 Substituindo container '{}'...", container.name);
        let previous = self.retire(&container.name)?;
        println!("✅ Instância anterior: {previous}");

        println!("\n🚀 Iniciando container '{}'...", container.name);
        let container_id = self.runtime.run(image, container)?;
        info!(container = %container.name, id = %container_id, "container iniciado");
        self.check_launched(&container.name);

        let url = container.published_url();
        println!("\n🎉 Deploy concluído! API disponível em {url}");

        Ok(DeployReport {
            image: reference,
            container_id,
            previous,
            url,
        })
    }

    /// Leva o nome ao estado `Absent`, partindo de qualquer estado.
    /// Retorna o estado encontrado inicialmente.
    pub fn retire(&self, name: &str) -> Result<ContainerState, DeployError> {
        let found = self.runtime.state(name)?;
        let mut state = found;

        loop {
            state = match state {
                ContainerState::Running => match self.runtime.stop(name)? {
                    CommandOutcome::Done => ContainerState::Stopped,
                    CommandOutcome::NotFound => ContainerState::Absent,
                },
                ContainerState::Stopped => {
                    self.runtime.remove(name)?;
                    ContainerState::Absent
                }
                ContainerState::Absent => return Ok(found),
            };
        }
    }

    /// A política de restart cuida de falhas depois do launch; aqui só avisamos
    fn check_launched(&self, name: &str) {
        match self.runtime.state(name) {
            Ok(ContainerState::Running) => {}
            Ok(state) => warn!(container = %name, %state, "container não está rodando logo após o start"),
            Err(err) => warn!(container = %name, error = %err, "não foi possível verificar o container"),
        }
    }
}
