//! Build da imagem do backend
//!
//! O build em si é delegado ao runtime de containers; aqui fica apenas
//! a detecção e validação do contexto.

mod context;

pub use context::BuildContext;
