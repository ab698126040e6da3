//! Transferência de controle para o processo do serviço

use crate::error::BootstrapError;
use std::ffi::{OsStr, OsString};
use std::io::{self, Write};

/// Programa do serviço e seus argumentos fixos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Default for ServiceCommand {
    fn default() -> Self {
        Self {
            program: "uvicorn".into(),
            args: vec!["api:api".into()],
        }
    }
}

impl ServiceCommand {
    /// Primeiro item é o programa; `None` se a lista estiver vazia
    pub fn from_argv(argv: Vec<OsString>) -> Option<Self> {
        let mut argv = argv.into_iter();
        let program = argv.next()?;
        Some(Self {
            program,
            args: argv.collect(),
        })
    }
}

/// Processo pronto para substituir o bootstrap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLaunch {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ServiceLaunch {
    pub fn new(service: &ServiceCommand, bind: &str, port: &OsStr) -> Self {
        let mut args = service.args.clone();
        args.extend(["--host".into(), bind.into(), "--port".into(), port.to_os_string()]);

        Self {
            program: service.program.clone(),
            args,
        }
    }

    /// Substitui o processo atual pelo serviço (mesmo PID, sinais e código de saída).
    /// Só retorna se o exec falhar.
    pub fn exec(self) -> BootstrapError {
        let _ = io::stdout().flush();
        let source = self.replace_process();

        BootstrapError::ServiceLaunch {
            program: self.program.to_string_lossy().into_owned(),
            source,
        }
    }

    #[cfg(unix)]
    fn replace_process(&self) -> io::Error {
        use std::os::unix::process::CommandExt;
        use std::process::Command;

        Command::new(&self.program).args(&self.args).exec()
    }

    #[cfg(not(unix))]
    fn replace_process(&self) -> io::Error {
        io::Error::new(
            io::ErrorKind::Unsupported,
            "substituição de processo só é suportada em Unix",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_appends_host_and_port() {
        let launch =
            ServiceLaunch::new(&ServiceCommand::default(), "0.0.0.0", OsStr::new("7777"));

        assert_eq!(launch.program, OsString::from("uvicorn"));
        assert_eq!(
            launch.args,
            vec!["api:api", "--host", "0.0.0.0", "--port", "7777"]
                .into_iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_from_argv() {
        let cmd = ServiceCommand::from_argv(vec!["python3".into(), "api.py".into()]).unwrap();
        assert_eq!(cmd.program, OsString::from("python3"));
        assert_eq!(cmd.args, vec![OsString::from("api.py")]);

        assert!(ServiceCommand::from_argv(Vec::new()).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_missing_program_returns_error() {
        let service = ServiceCommand {
            program: "agentic-bootstrap-no-such-service".into(),
            args: Vec::new(),
        };

        let err = ServiceLaunch::new(&service, "0.0.0.0", OsStr::new("7777")).exec();

        assert!(matches!(err, BootstrapError::ServiceLaunch { .. }));
        assert_eq!(err.exit_code(), 127);
    }
}
