//! Geração única do `config.ini` padrão

use crate::error::BootstrapError;
use agentic_config::Settings;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Modo do arquivo gerado (ainda sujeito à umask)
#[cfg(unix)]
const CONFIG_MODE: u32 = 0o644;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOutcome {
    /// O arquivo não existia e foi criado com os padrões
    Created,
    /// Já existia (ou outro bootstrap criou antes); nada foi alterado
    AlreadyPresent,
}

/// Garante que `path` exista. Um arquivo existente nunca é reescrito.
///
/// O conteúdo é gravado em um arquivo temporário no mesmo diretório e
/// ligado ao destino sem sobrescrita, então nenhum leitor vê um arquivo
/// parcial e bootstraps concorrentes não se corrompem.
pub fn ensure_default_config(
    path: &Path,
    settings: &Settings,
) -> Result<ConfigOutcome, BootstrapError> {
    let write_err = |source: io::Error| BootstrapError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };

    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => return Ok(ConfigOutcome::AlreadyPresent),
        Ok(_) => {
            return Err(write_err(io::Error::new(
                io::ErrorKind::Other,
                "o caminho existe, mas não é um arquivo",
            )))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(write_err(err)),
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(".config.").suffix(".tmp");
    // O serviço e o operador no host também leem o arquivo (0600 é o padrão do tempfile)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(CONFIG_MODE));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(write_err)?;

    tmp.write_all(settings.render().as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    match tmp.persist_noclobber(path) {
        Ok(_) => Ok(ConfigOutcome::Created),
        Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "configuração criada por outro processo");
            Ok(ConfigOutcome::AlreadyPresent)
        }
        Err(err) => Err(write_err(err.error)),
    }
}
