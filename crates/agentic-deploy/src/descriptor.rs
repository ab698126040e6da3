use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// Imagem a ser construída em um deploy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub name: String,
    pub tag: String,

    /// Diretório de contexto do build
    pub context: PathBuf,

    /// Dockerfile (padrão: `<context>/Dockerfile`)
    pub dockerfile: Option<PathBuf>,
}

impl ImageDescriptor {
    /// Referência no formato `nome:tag`
    pub fn reference(&self) -> String {
        format!("{}:{}", self.name, self.tag)
    }
}

/// Bind mount host -> container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub host_path: PathBuf,
    pub container_path: PathBuf,
    pub read_only: bool,
}

impl MountEntry {
    pub fn read_only(host_path: impl Into<PathBuf>, container_path: impl Into<PathBuf>) -> Self {
        Self {
            host_path: host_path.into(),
            container_path: container_path.into(),
            read_only: true,
        }
    }

    /// Valor para `--mount`: `type=bind,source=<host>,target=<container>[,readonly]`.
    /// Uma origem inexistente é recusada pelo runtime; nada é criado no host.
    pub fn mount_arg(&self) -> OsString {
        let mut arg = OsString::from("type=bind,source=");
        arg.push(self.host_path.as_os_str());
        arg.push(",target=");
        arg.push(self.container_path.as_os_str());
        if self.read_only {
            arg.push(",readonly");
        }
        arg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartPolicy {
    No,
    Always,
    UnlessStopped,
    OnFailure(Option<u32>),
}

impl fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartPolicy::No => write!(f, "no"),
            RestartPolicy::Always => write!(f, "always"),
            RestartPolicy::UnlessStopped => write!(f, "unless-stopped"),
            RestartPolicy::OnFailure(None) => write!(f, "on-failure"),
            RestartPolicy::OnFailure(Some(max)) => write!(f, "on-failure:{max}"),
        }
    }
}

/// Container que substitui a instância anterior de mesmo nome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDescriptor {
    /// Nome único no runtime (uma instância viva por nome)
    pub name: String,
    pub host_port: u16,
    pub container_port: u16,
    pub mounts: Vec<MountEntry>,
    pub env: Vec<(String, String)>,
    pub restart: RestartPolicy,
}

impl ContainerDescriptor {
    /// Argumentos de `docker run` para iniciar este container em background
    pub fn run_args(&self, image: &ImageDescriptor) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "run".into(),
            "-d".into(),
            "--name".into(),
            self.name.clone().into(),
            "--restart".into(),
            self.restart.to_string().into(),
            "-p".into(),
            format!("{}:{}", self.host_port, self.container_port).into(),
        ];

        for (key, value) in &self.env {
            args.push("-e".into());
            args.push(format!("{key}={value}").into());
        }

        for mount in &self.mounts {
            args.push("--mount".into());
            args.push(mount.mount_arg());
        }

        args.push(image.reference().into());
        args
    }

    /// URL publicada no host
    pub fn published_url(&self) -> String {
        format!("http://localhost:{}", self.host_port)
    }
}
