//! Runtime de containers via CLI do docker

use super::error::DeployError;
use super::runtime::{CommandOutcome, ContainerRuntime, ContainerState};
use crate::build::BuildContext;
use crate::descriptor::{ContainerDescriptor, ImageDescriptor};
use serde::Deserialize;
use std::ffi::{OsStr, OsString};
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Executor de comandos `docker`
pub struct DockerCli {
    program: OsString,
}

impl DockerCli {
    pub fn new() -> Self {
        Self::with_program("docker")
    }

    /// Usa outro binário compatível (ex.: `podman`)
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    fn describe<I, S>(&self, args: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut line = self.program_name();
        for arg in args {
            line.push(' ');
            line.push_str(&arg.as_ref().to_string_lossy());
        }
        line
    }

    /// Executa capturando stdout/stderr
    fn capture<I, S>(&self, args: I) -> Result<Output, DeployError>
    where
        I: IntoIterator<Item = S> + Clone,
        S: AsRef<OsStr>,
    {
        debug!(command = %self.describe(args.clone()), "executando");

        Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| DeployError::Spawn {
                program: self.program_name(),
                source,
            })
    }

    /// stop/rm: "não encontrado" vira `NotFound`, qualquer outra falha é fatal
    fn tolerant(&self, args: &[&str]) -> Result<CommandOutcome, DeployError> {
        let output = self.capture(args)?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if output.status.success() {
            return Ok(CommandOutcome::Done);
        }

        if is_not_found(&stderr) {
            debug!(command = %self.describe(args), "alvo não existe");
            return Ok(CommandOutcome::NotFound);
        }

        Err(DeployError::RuntimeCommand {
            command: self.describe(args),
            code: output.status.code(),
            stderr: stderr.trim().to_string(),
        })
    }
}

impl ContainerRuntime for DockerCli {
    fn build(&self, image: &ImageDescriptor, context: &BuildContext) -> Result<(), DeployError> {
        let reference = image.reference();
        let args: Vec<&OsStr> = vec![
            OsStr::new("build"),
            OsStr::new("-t"),
            OsStr::new(&reference),
            OsStr::new("-f"),
            context.dockerfile.as_os_str(),
            context.root.as_os_str(),
        ];
        debug!(command = %self.describe(&args), "executando");

        // Saída do build vai direto para o terminal do operador
        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| DeployError::Spawn {
                program: self.program_name(),
                source,
            })?;

        if !status.success() {
            return Err(DeployError::Build {
                image: reference,
                code: status.code(),
            });
        }

        Ok(())
    }

    fn state(&self, name: &str) -> Result<ContainerState, DeployError> {
        let args = ["inspect", "--type", "container", name];
        let output = self.capture(args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_not_found(&stderr) {
                return Ok(ContainerState::Absent);
            }
            return Err(DeployError::RuntimeCommand {
                command: self.describe(args),
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        parse_inspect(&output.stdout).map_err(|source| DeployError::Inspect {
            name: name.to_string(),
            source,
        })
    }

    fn stop(&self, name: &str) -> Result<CommandOutcome, DeployError> {
        self.tolerant(&["stop", name])
    }

    fn remove(&self, name: &str) -> Result<CommandOutcome, DeployError> {
        self.tolerant(&["rm", name])
    }

    fn run(
        &self,
        image: &ImageDescriptor,
        container: &ContainerDescriptor,
    ) -> Result<String, DeployError> {
        let output = self.capture(container.run_args(image))?;

        if !output.status.success() {
            return Err(DeployError::Launch {
                name: container.name.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectEntry {
    state: InspectState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectState {
    #[serde(default)]
    status: String,
    #[serde(default)]
    running: bool,
}

/// Interpreta o JSON de `docker inspect`
fn parse_inspect(stdout: &[u8]) -> Result<ContainerState, serde_json::Error> {
    let entries: Vec<InspectEntry> = serde_json::from_slice(stdout)?;

    let Some(entry) = entries.first() else {
        return Ok(ContainerState::Absent);
    };

    let state = &entry.state;
    let live = state.running || matches!(state.status.as_str(), "running" | "restarting" | "paused");

    Ok(if live {
        ContainerState::Running
    } else {
        ContainerState::Stopped
    })
}

fn is_not_found(stderr: &str) -> bool {
    let stderr = stderr.to_ascii_lowercase();
    stderr.contains("no such container")
        || stderr.contains("no such object")
        || stderr.contains("no container with name or id")
}
