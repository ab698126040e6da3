mod config;
mod dirs;
mod error;
mod launch;
mod plan;
mod port;

use crate::error::BootstrapError;
use crate::launch::ServiceCommand;
use crate::plan::{
    bootstrap, default_dirs, BootstrapPlan, DEFAULT_BIND, DEFAULT_CONFIG_PATH, DEFAULT_PORT,
    PORT_ENV,
};
use clap::Parser;
use std::convert::Infallible;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "agentic-bootstrap",
    version,
    about = "Prepara o container do backend AgenticSeek e executa o serviço"
)]
struct Args {
    /// Arquivo de configuração (gerado com os padrões se não existir)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Diretório que deve existir antes do serviço (repetível).
    /// Padrão: .logs, .screenshots, /opt/workspace
    #[arg(long = "dir", value_name = "DIR")]
    dirs: Vec<PathBuf>,

    /// Variável de ambiente com a porta de escuta
    #[arg(long, default_value = PORT_ENV)]
    port_env: String,

    /// Porta usada quando a variável não está definida ou está vazia
    #[arg(long, default_value_t = DEFAULT_PORT)]
    default_port: u16,

    /// Endereço de bind repassado ao serviço
    #[arg(long, default_value = DEFAULT_BIND)]
    bind: String,

    /// Comando do serviço (padrão: uvicorn api:api)
    #[arg(last = true, value_name = "SERVICE")]
    service: Vec<OsString>,
}

impl Args {
    fn into_plan(self) -> BootstrapPlan {
        let required_dirs = if self.dirs.is_empty() {
            default_dirs()
        } else {
            self.dirs
        };

        BootstrapPlan {
            config_path: self.config,
            required_dirs,
            port_env: self.port_env,
            default_port: self.default_port,
            bind_address: self.bind,
            service: ServiceCommand::from_argv(self.service).unwrap_or_default(),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(plan: &BootstrapPlan) -> anyhow::Result<Infallible> {
    Ok(bootstrap(plan)?)
}

/// Código de saída para um erro que chegou ao `main`
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<BootstrapError>()
        .map_or(1, BootstrapError::exit_code)
}

fn main() -> ExitCode {
    let plan = Args::parse().into_plan();
    init_tracing();

    match run(&plan) {
        Ok(never) => match never {},
        Err(err) => {
            eprintln!("❌ {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let plan = Args::parse_from(["agentic-bootstrap"]).into_plan();

        assert_eq!(plan.config_path, PathBuf::from("config.ini"));
        assert_eq!(plan.required_dirs, default_dirs());
        assert_eq!(plan.port_env, "BACKEND_PORT");
        assert_eq!(plan.default_port, 7777);
        assert_eq!(plan.bind_address, "0.0.0.0");
        assert_eq!(plan.service, ServiceCommand::default());
    }

    #[test]
    fn test_args_override_service_and_dirs() {
        let plan = Args::parse_from([
            "agentic-bootstrap",
            "--dir",
            "/tmp/a",
            "--dir",
            "/tmp/b",
            "--default-port",
            "8000",
            "--",
            "python3",
            "api.py",
        ])
        .into_plan();

        assert_eq!(plan.required_dirs, vec![PathBuf::from("/tmp/a"), PathBuf::from("/tmp/b")]);
        assert_eq!(plan.default_port, 8000);
        assert_eq!(plan.service.program, OsString::from("python3"));
        assert_eq!(plan.service.args, vec![OsString::from("api.py")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_error_keeps_cause_and_exit_code() {
        let root = tempfile::tempdir().unwrap();
        let plan = BootstrapPlan {
            config_path: root.path().join("config.ini"),
            required_dirs: vec![root.path().join(".logs")],
            service: ServiceCommand {
                program: "agentic-bootstrap-no-such-service".into(),
                args: Vec::new(),
            },
            ..BootstrapPlan::default()
        };

        let err = run(&plan).unwrap_err();
        let message = format!("{err:#}");
        let head = "Falha ao executar o serviço 'agentic-bootstrap-no-such-service': ";

        // A causa (io::Error) vem depois do contexto
        assert!(message.starts_with(head), "{message}");
        assert!(message.len() > head.len());
        assert_eq!(exit_code(&err), 127);
    }

    #[test]
    fn test_exit_code_for_foreign_error() {
        assert_eq!(exit_code(&anyhow::anyhow!("outro erro")), 1);
    }
}
