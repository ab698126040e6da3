use std::env;
use std::ffi::OsString;

/// Porta de escuta: variável de ambiente ou padrão.
/// Não valida o valor (nem exige UTF-8); quem valida é o próprio serviço.
pub fn resolve_port(var: &str, default: u16) -> OsString {
    port_or_default(env::var_os(var), default)
}

pub fn port_or_default(value: Option<OsString>, default: u16) -> OsString {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => default.to_string().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_uses_default() {
        assert_eq!(port_or_default(None, 7777), "7777");
        assert_eq!(resolve_port("AGENTIC_BOOTSTRAP_TEST_UNSET_PORT", 7777), "7777");
    }

    #[test]
    fn test_empty_uses_default() {
        assert_eq!(port_or_default(Some(OsString::new()), 7777), "7777");
    }

    #[test]
    fn test_override() {
        assert_eq!(port_or_default(Some("9000".into()), 7777), "9000");
    }

    #[test]
    fn test_value_is_not_validated() {
        assert_eq!(port_or_default(Some("not-a-port".into()), 7777), "not-a-port");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_value_is_passed_verbatim() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"90\xff0".to_vec());
        assert_eq!(port_or_default(Some(raw.clone()), 7777), raw);
    }
}
