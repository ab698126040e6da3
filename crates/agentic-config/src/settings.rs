//! Configuração tipada do backend (seções MAIN e BROWSER)

use crate::defaults::{self, BROWSER_SECTION, MAIN_SECTION};
use crate::error::ConfigError;
use crate::ini::{format_bool, Document};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainSettings {
    pub is_local: bool,
    pub provider_name: String,
    pub provider_model: String,
    pub provider_server_address: String,
    pub agent_name: String,
    pub recover_last_session: bool,
    pub save_session: bool,
    pub speak: bool,
    pub listen: bool,
    pub jarvis_personality: bool,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    pub headless_browser: bool,
    pub stealth_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub main: MainSettings,
    pub browser: BrowserSettings,
}

impl Default for MainSettings {
    fn default() -> Self {
        Self {
            is_local: defaults::IS_LOCAL,
            provider_name: defaults::PROVIDER_NAME.to_string(),
            provider_model: defaults::PROVIDER_MODEL.to_string(),
            provider_server_address: defaults::PROVIDER_SERVER_ADDRESS.to_string(),
            agent_name: defaults::AGENT_NAME.to_string(),
            recover_last_session: defaults::RECOVER_LAST_SESSION,
            save_session: defaults::SAVE_SESSION,
            speak: defaults::SPEAK,
            listen: defaults::LISTEN,
            jarvis_personality: defaults::JARVIS_PERSONALITY,
            languages: defaults::LANGUAGES.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless_browser: defaults::HEADLESS_BROWSER,
            stealth_mode: defaults::STEALTH_MODE,
        }
    }
}

impl Settings {
    /// Converte para o documento que será gravado em disco
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();

        let main = doc.section_mut(MAIN_SECTION);
        main.set("is_local", format_bool(self.main.is_local));
        main.set("provider_name", self.main.provider_name.as_str());
        main.set("provider_model", self.main.provider_model.as_str());
        main.set("provider_server_address", self.main.provider_server_address.as_str());
        main.set("agent_name", self.main.agent_name.as_str());
        main.set("recover_last_session", format_bool(self.main.recover_last_session));
        main.set("save_session", format_bool(self.main.save_session));
        main.set("speak", format_bool(self.main.speak));
        main.set("listen", format_bool(self.main.listen));
        main.set("jarvis_personality", format_bool(self.main.jarvis_personality));
        main.set("languages", self.main.languages.join(" "));

        let browser = doc.section_mut(BROWSER_SECTION);
        browser.set("headless_browser", format_bool(self.browser.headless_browser));
        browser.set("stealth_mode", format_bool(self.browser.stealth_mode));

        doc
    }

    pub fn render(&self) -> String {
        self.to_document().render()
    }

    /// Aplica o documento sobre os valores padrão.
    /// Chaves ausentes ficam com o padrão; chaves desconhecidas são ignoradas.
    pub fn from_document(doc: &Document) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();
        let main = &mut settings.main;

        overlay_bool(doc, MAIN_SECTION, "is_local", &mut main.is_local)?;
        overlay_str(doc, MAIN_SECTION, "provider_name", &mut main.provider_name);
        overlay_str(doc, MAIN_SECTION, "provider_model", &mut main.provider_model);
        overlay_str(
            doc,
            MAIN_SECTION,
            "provider_server_address",
            &mut main.provider_server_address,
        );
        overlay_str(doc, MAIN_SECTION, "agent_name", &mut main.agent_name);
        overlay_bool(doc, MAIN_SECTION, "recover_last_session", &mut main.recover_last_session)?;
        overlay_bool(doc, MAIN_SECTION, "save_session", &mut main.save_session)?;
        overlay_bool(doc, MAIN_SECTION, "speak", &mut main.speak)?;
        overlay_bool(doc, MAIN_SECTION, "listen", &mut main.listen)?;
        overlay_bool(doc, MAIN_SECTION, "jarvis_personality", &mut main.jarvis_personality)?;
        if let Some(languages) = doc.get(MAIN_SECTION, "languages") {
            main.languages = languages.split_whitespace().map(str::to_string).collect();
        }

        let browser = &mut settings.browser;
        overlay_bool(doc, BROWSER_SECTION, "headless_browser", &mut browser.headless_browser)?;
        overlay_bool(doc, BROWSER_SECTION, "stealth_mode", &mut browser.stealth_mode)?;

        Ok(settings)
    }

    /// Carrega o arquivo usado pelo serviço
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_document(&Document::parse(&text)?)
    }

    /// Como [`Settings::load`], mas arquivo inexistente resulta nos padrões
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Settings::default())
            }
            other => other,
        }
    }
}

fn overlay_str(doc: &Document, section: &str, key: &str, target: &mut String) {
    if let Some(value) = doc.get(section, key) {
        *target = value.to_string();
    }
}

fn overlay_bool(
    doc: &Document,
    section: &str,
    key: &str,
    target: &mut bool,
) -> Result<(), ConfigError> {
    if let Some(value) = doc.get_bool(section, key)? {
        *target = value;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_document_shape() {
        let doc = Document::parse(&Settings::default().render()).unwrap();

        let provider = doc.get(MAIN_SECTION, "provider_name").unwrap();
        assert_eq!(provider, "together");
        assert!(!provider.is_empty());

        assert_eq!(doc.get_bool(BROWSER_SECTION, "headless_browser").unwrap(), Some(true));
        assert_eq!(doc.get_bool(BROWSER_SECTION, "stealth_mode").unwrap(), Some(true));
        assert_eq!(doc.section(MAIN_SECTION).unwrap().len(), 11);
        assert_eq!(doc.section(BROWSER_SECTION).unwrap().len(), 2);
    }

    #[test]
    fn test_generated_defaults_load_back_unchanged() {
        let settings = Settings::default();
        let doc = Document::parse(&settings.render()).unwrap();
        assert_eq!(Settings::from_document(&doc).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_is_completed_with_defaults() {
        let doc = Document::parse("[MAIN]\nprovider_name = ollama\nlanguages = en zh\n").unwrap();
        let settings = Settings::from_document(&doc).unwrap();

        assert_eq!(settings.main.provider_name, "ollama");
        assert_eq!(settings.main.languages, vec!["en", "zh"]);
        assert_eq!(settings.main.agent_name, defaults::AGENT_NAME);
        assert_eq!(settings.browser, BrowserSettings::default());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_or_default(&dir.path().join("config.ini")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_rejects_bad_bool() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "[BROWSER]\nheadless_browser = sometimes\n").unwrap();

        assert!(matches!(
            Settings::load(&path),
            Err(ConfigError::InvalidBool { .. })
        ));
    }
}
