//! Valores padrão do `config.ini`.
//!
//! Tanto o gerador do bootstrap quanto o carregador do serviço partem
//! destas constantes (via [`crate::Settings::default`]). Não duplique
//! esses valores em outro lugar.

pub const MAIN_SECTION: &str = "MAIN";
pub const BROWSER_SECTION: &str = "BROWSER";

pub const IS_LOCAL: bool = false;
pub const PROVIDER_NAME: &str = "together";
pub const PROVIDER_MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo";
pub const PROVIDER_SERVER_ADDRESS: &str = "https://api.together.xyz";
pub const AGENT_NAME: &str = "Jarvis";
pub const RECOVER_LAST_SESSION: bool = false;
pub const SAVE_SESSION: bool = false;
pub const SPEAK: bool = false;
pub const LISTEN: bool = false;
pub const JARVIS_PERSONALITY: bool = false;
pub const LANGUAGES: &[&str] = &["en"];

pub const HEADLESS_BROWSER: bool = true;
pub const STEALTH_MODE: bool = true;
