//! Configuração compartilhada do backend AgenticSeek.
//!
//! Este crate é usado pelos dois lados do arquivo `config.ini`:
//! o bootstrap do container (que gera o arquivo padrão na primeira
//! execução) e o carregador do serviço (que lê o arquivo e completa
//! as chaves ausentes). Os valores padrão existem em um único lugar,
//! o módulo [`defaults`].

pub mod defaults;
mod error;
pub mod ini;
mod settings;

pub use error::ConfigError;
pub use ini::{Document, Section};
pub use settings::{BrowserSettings, MainSettings, Settings};
