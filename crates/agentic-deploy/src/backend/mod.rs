//! Backend do deploy: runtime de containers e ciclo de vida do serviço.
//! O ciclo de vida depende apenas do trait [`runtime::ContainerRuntime`];
//! a implementação real usa a CLI do docker.

pub mod docker;
pub mod error;
pub mod lifecycle;
pub mod runtime;
