//! # relay-mutation
//!
//! Adapts a plain mutation resolver to the Relay "Input Object Mutation"
//! convention: the field takes a single `input` argument carrying a client
//! mutation id, and the payload echoes that id back (or a generated one when
//! the caller omitted it).
//!
//! See: https://relay.dev/docs/guides/graphql-server-specification/#mutations

pub mod adapter;
pub mod config;
pub mod defaults;
#[cfg(feature = "dynamic")]
pub mod dynamic;
pub mod envelope;
pub mod id;

pub use adapter::RelayMutation;
pub use config::{KeyConvention, MutationConfig};
pub use envelope::{InnerInput, InputEnvelope, Mapping, MutationArguments, MutationPayload};
pub use id::{ClientMutationId, ClientMutationIdGenerator, EntropySource, OsEntropy};

use thiserror::Error;

pub type MutationResult<T> = Result<T, MutationError>;

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),
    #[error("Client mutation id length must be greater than zero, got {0}")]
    InvalidIdLength(usize),
    #[error("Error processing config file: {0:?}")]
    ConfigFileError(#[from] std::io::Error),
    #[error("Error processing YAML config: {0:?}")]
    SerdeYamlError(#[from] serde_yaml::Error),
    #[error("Invalid value for env variable {0}: {1:?}")]
    EnvVarParseError(String, String),
    #[error("Unrecognized key convention: {0:?}")]
    UnrecognizedKeyConvention(String),
    #[error("Could not convert value: {0:?}")]
    JsonError(#[from] serde_json::Error),
}
