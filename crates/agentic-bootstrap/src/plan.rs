//! Sequência de bootstrap executada a cada start do container
//!
//! 1. Garantir `config.ini` (padrão gerado uma única vez)
//! 2. Garantir diretórios de trabalho
//! 3. Resolver a porta de escuta
//! 4. Substituir o processo pelo serviço (ação terminal)

use crate::config::{ensure_default_config, ConfigOutcome};
use crate::dirs::ensure_dirs;
use crate::error::BootstrapError;
use crate::launch::{ServiceCommand, ServiceLaunch};
use crate::port::resolve_port;
use agentic_config::Settings;
use std::convert::Infallible;
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "config.ini";
pub const DEFAULT_DIRS: &[&str] = &[".logs", ".screenshots", "/opt/workspace"];
pub const PORT_ENV: &str = "BACKEND_PORT";
pub const DEFAULT_PORT: u16 = 7777;
pub const DEFAULT_BIND: &str = "0.0.0.0";

pub fn default_dirs() -> Vec<PathBuf> {
    DEFAULT_DIRS.iter().map(PathBuf::from).collect()
}

/// Parâmetros do bootstrap
#[derive(Debug, Clone)]
pub struct BootstrapPlan {
    pub config_path: PathBuf,
    pub required_dirs: Vec<PathBuf>,
    pub port_env: String,
    pub default_port: u16,
    pub bind_address: String,
    pub service: ServiceCommand,
}

impl Default for BootstrapPlan {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            required_dirs: default_dirs(),
            port_env: PORT_ENV.to_string(),
            default_port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND.to_string(),
            service: ServiceCommand::default(),
        }
    }
}

impl BootstrapPlan {
    /// Passos 1-3. Qualquer erro aqui é fatal: o serviço não deve iniciar.
    pub fn prepare(&self) -> Result<ServiceLaunch, BootstrapError> {
        println!("📝 Verificando configuração em {}...", self.config_path.display());
        match ensure_default_config(&self.config_path, &Settings::default())? {
            ConfigOutcome::Created => println!("✅ Configuração padrão criada"),
            ConfigOutcome::AlreadyPresent => println!("✅ Configuração existente mantida"),
        }

        println!("\n📁 Preparando diretórios...");
        let created = ensure_dirs(&self.required_dirs)?;
        println!("✅ {} diretórios prontos ({created} criados)", self.required_dirs.len());

        let port = resolve_port(&self.port_env, self.default_port);
        info!(env = %self.port_env, port = %port.to_string_lossy(), "porta resolvida");

        let launch = ServiceLaunch::new(&self.service, &self.bind_address, &port);
        println!(
            "\n🚀 Iniciando serviço em {}:{}: {}",
            self.bind_address,
            port.to_string_lossy(),
            launch.program.to_string_lossy()
        );

        Ok(launch)
    }
}

/// Executa o bootstrap completo. Em caso de sucesso o processo já é o serviço,
/// então esta função nunca retorna `Ok`.
pub fn bootstrap(plan: &BootstrapPlan) -> Result<Infallible, BootstrapError> {
    let launch = plan.prepare()?;
    Err(launch.exec())
}
