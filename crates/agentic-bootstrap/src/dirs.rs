use crate::error::BootstrapError;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Cria cada diretório (e os pais) se necessário. Diretórios existentes não são erro.
/// Retorna quantos foram criados nesta chamada.
pub fn ensure_dirs(dirs: &[PathBuf]) -> Result<usize, BootstrapError> {
    let mut created = 0;

    for dir in dirs {
        let existed = dir.is_dir();

        fs::create_dir_all(dir).map_err(|source| BootstrapError::DirectoryCreate {
            path: dir.clone(),
            source,
        })?;

        // create_dir_all aceita um arquivo no caminho final em algumas plataformas
        if !dir.is_dir() {
            return Err(BootstrapError::DirectoryCreate {
                path: dir.clone(),
                source: io::Error::new(io::ErrorKind::AlreadyExists, "existe e não é um diretório"),
            });
        }

        if !existed {
            created += 1;
        }
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dirs_is_repeatable() {
        let root = tempdir().unwrap();
        let dirs = vec![
            root.path().join(".logs"),
            root.path().join(".screenshots"),
            root.path().join("opt").join("workspace"),
        ];

        assert_eq!(ensure_dirs(&dirs).unwrap(), 3);
        assert_eq!(ensure_dirs(&dirs).unwrap(), 0);

        assert!(dirs.iter().all(|d| d.is_dir()));
        // .logs, .screenshots, opt
        assert_eq!(fs::read_dir(root.path()).unwrap().count(), 3);
    }

    #[test]
    fn test_file_in_the_way_is_error() {
        let root = tempdir().unwrap();
        let blocked = root.path().join(".logs");
        fs::write(&blocked, "não sou diretório").unwrap();

        let err = ensure_dirs(&[blocked]).unwrap_err();
        assert!(matches!(err, BootstrapError::DirectoryCreate { .. }));
    }
}
