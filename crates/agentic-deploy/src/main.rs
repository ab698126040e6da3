mod backend;
mod build;
mod descriptor;
mod service;

use crate::backend::docker::DockerCli;
use crate::backend::error::DeployError;
use crate::backend::lifecycle::{DeployReport, Deployer};
use anyhow::Context;
use clap::Parser;
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "agentic-deploy",
    version,
    about = "Reconstrói a imagem do backend AgenticSeek e substitui o container em execução"
)]
struct Args {}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> anyhow::Result<DeployReport> {
    let workdir = env::current_dir().context("Falha ao obter diretório de trabalho")?;

    let image = service::image(&workdir);
    let container = service::container(&workdir);

    let deployer = Deployer::new(DockerCli::new());
    Ok(deployer.deploy(&image, &container)?)
}

fn main() -> ExitCode {
    let _args = Args::parse();
    init_tracing();

    match run() {
        Ok(report) => {
            tracing::debug!(?report, "deploy finalizado");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("\n❌ {err:#}");

            let Some(deploy_err) = err.downcast_ref::<DeployError>() else {
                return ExitCode::FAILURE;
            };
            if deploy_err.is_build_error() {
                eprintln!(
                    "   Nenhum container foi alterado. Corrija o build e execute novamente."
                );
            }
            ExitCode::from(deploy_err.exit_code())
        }
    }
}
