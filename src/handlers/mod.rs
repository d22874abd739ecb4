//! Handler builders and associated traits.
//!
//! Provides a builder API for constructing handlers in a type-safe manner.
//! Each builder implements [`HandlerBuilderTrait`], which can return either
//! the concrete handler or a boxed [`LogHandler`] ready to hand to an
//! adapter.

use thiserror::Error;

use crate::handler::LogHandler;

pub mod discord_builder;

pub use discord_builder::DiscordHandlerBuilder;

/// Errors that may occur while building a handler.
#[derive(Debug, Error)]
pub enum HandlerBuildError {
    /// Invalid user supplied configuration.
    #[error("invalid handler configuration: {0}")]
    InvalidConfig(String),
    /// The TLS connector could not be initialised.
    #[error("failed to initialise TLS: {0}")]
    Tls(#[from] native_tls::Error),
}

/// Trait implemented by all handler builders.
pub trait HandlerBuilderTrait: Send + Sync {
    type Handler: LogHandler + 'static;

    /// Build the concrete handler.
    fn build_inner(&self) -> Result<Self::Handler, HandlerBuildError>;

    /// Build the handler behind a trait object.
    fn build(&self) -> Result<Box<dyn LogHandler>, HandlerBuildError> {
        Ok(Box::new(self.build_inner()?))
    }
}
