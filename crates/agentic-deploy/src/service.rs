//! Definição fixa do serviço de backend implantado por este CLI

use crate::descriptor::{ContainerDescriptor, ImageDescriptor, MountEntry, RestartPolicy};
use std::path::Path;

pub const IMAGE_NAME: &str = "agentic-seek-backend";
pub const IMAGE_TAG: &str = "latest";
pub const BUILD_CONTEXT: &str = ".";
pub const DOCKERFILE: &str = "Dockerfile.backend";

pub const CONTAINER_NAME: &str = "backend";
pub const HOST_PORT: u16 = 7777;
pub const CONTAINER_PORT: u16 = 7777;
pub const PORT_ENV: &str = "BACKEND_PORT";

/// (origem relativa ao diretório de trabalho, destino no container)
const READ_ONLY_MOUNTS: &[(&str, &str)] = &[
    ("sources", "/app/sources"),
    ("prompts", "/app/prompts"),
    ("llm_router", "/app/llm_router"),
    ("config.ini", "/app/config.ini"),
];

pub fn image(workdir: &Path) -> ImageDescriptor {
    let context = workdir.join(BUILD_CONTEXT);

    ImageDescriptor {
        name: IMAGE_NAME.to_string(),
        tag: IMAGE_TAG.to_string(),
        dockerfile: Some(context.join(DOCKERFILE)),
        context,
    }
}

/// Os caminhos do host são apenas referenciados, nunca criados aqui
pub fn container(workdir: &Path) -> ContainerDescriptor {
    let mounts = READ_ONLY_MOUNTS
        .iter()
        .map(|(host, target)| MountEntry::read_only(workdir.join(host), *target))
        .collect();

    ContainerDescriptor {
        name: CONTAINER_NAME.to_string(),
        host_port: HOST_PORT,
        container_port: CONTAINER_PORT,
        mounts,
        env: vec![
            (PORT_ENV.to_string(), CONTAINER_PORT.to_string()),
            ("PYTHONUNBUFFERED".to_string(), "1".to_string()),
            (
                "DOCKER_INTERNAL_URL".to_string(),
                "http://host.docker.internal".to_string(),
            ),
        ],
        restart: RestartPolicy::UnlessStopped,
    }
}
