//! Gramática do arquivo de configuração
//!
//! - cabeçalhos de seção entre colchetes: `[MAIN]`
//! - um par `chave = valor` por linha (separado no primeiro `=`)
//! - linhas em branco e comentários (`#` ou `;`) são ignorados

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Uma seção do arquivo, com as chaves na ordem em que apareceram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Define o valor de uma chave. Chave repetida: o último valor vence.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Documento completo: lista ordenada de seções
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Faz o parse do texto completo do arquivo
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut doc = Document::new();
        let mut current: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header
                    .strip_suffix(']')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| ConfigError::Parse {
                        line: line_no,
                        message: format!("cabeçalho de seção inválido: '{line}'"),
                    })?;

                doc.section_mut(name);
                current = Some(name.to_string());
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::Parse {
                line: line_no,
                message: format!("esperado 'chave = valor', encontrado '{line}'"),
            })?;

            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::Parse {
                    line: line_no,
                    message: "chave vazia".to_string(),
                });
            }

            let section = current.as_deref().ok_or_else(|| ConfigError::Parse {
                line: line_no,
                message: format!("chave '{key}' fora de qualquer seção"),
            })?;

            doc.section_mut(section).set(key, value.trim());
        }

        Ok(doc)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Retorna a seção, criando-a no fim do documento se ainda não existir
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };

        &mut self.sections[index]
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Lê um booleano. `Ok(None)` se a chave não existe.
    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, ConfigError> {
        match self.get(section, key) {
            None => Ok(None),
            Some(value) => parse_bool(value).map(Some).ok_or_else(|| ConfigError::InvalidBool {
                section: section.to_string(),
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Document {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Document::parse(s)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", section.name)?;
            for (key, value) in section.entries() {
                writeln!(f, "{key} = {value}")?;
            }
        }
        Ok(())
    }
}

/// Aceita os mesmos literais que o leitor do serviço
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

pub fn format_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections_and_pairs() {
        let text = "\
[MAIN]
provider_name = together
languages = en zh

# comentário
[BROWSER]
headless_browser=True
";
        let doc = Document::parse(text).unwrap();

        assert_eq!(doc.get("MAIN", "provider_name"), Some("together"));
        assert_eq!(doc.get("MAIN", "languages"), Some("en zh"));
        assert_eq!(doc.get_bool("BROWSER", "headless_browser").unwrap(), Some(true));
        assert_eq!(doc.sections().count(), 2);
    }

    #[test]
    fn test_value_keeps_everything_after_first_equals() {
        let doc = Document::parse("[MAIN]\nprovider_server_address = http://host:1234/?a=b\n").unwrap();
        assert_eq!(
            doc.get("MAIN", "provider_server_address"),
            Some("http://host:1234/?a=b")
        );
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let doc = Document::parse("[MAIN]\nspeak = True\nspeak = False\n").unwrap();
        assert_eq!(doc.get_bool("MAIN", "speak").unwrap(), Some(false));
        assert_eq!(doc.section("MAIN").unwrap().len(), 1);
    }

    #[test]
    fn test_key_outside_section_is_error() {
        let err = Document::parse("provider_name = together\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_line_without_equals_is_error() {
        let err = Document::parse("[MAIN]\n\nprovider_name together\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_malformed_header_is_error() {
        assert!(Document::parse("[MAIN\nkey = value\n").is_err());
        assert!(Document::parse("[ ]\n").is_err());
    }

    #[test]
    fn test_invalid_bool() {
        let doc = Document::parse("[BROWSER]\nstealth_mode = maybe\n").unwrap();
        assert!(matches!(
            doc.get_bool("BROWSER", "stealth_mode"),
            Err(ConfigError::InvalidBool { .. })
        ));
        assert_eq!(doc.get_bool("BROWSER", "missing").unwrap(), None);
    }

    #[test]
    fn test_render_is_parseable() {
        let mut doc = Document::new();
        doc.section_mut("MAIN").set("agent_name", "Jarvis");
        doc.section_mut("BROWSER").set("stealth_mode", format_bool(true));

        let text = doc.render();
        assert_eq!(text, "[MAIN]\nagent_name = Jarvis\n\n[BROWSER]\nstealth_mode = True\n");
        assert_eq!(Document::parse(&text).unwrap(), doc);
    }

    #[test]
    fn test_parse_bool_literals() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool(""), None);
    }
}
