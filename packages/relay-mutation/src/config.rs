use crate::{defaults, MutationError, MutationResult};
use serde::Deserialize;
use std::{fs::File, path::Path, str::FromStr};
use strum::{AsRefStr, EnumString};

/// Environment variables that override file or default configuration.
#[derive(Debug, EnumString, AsRefStr)]
pub enum EnvVar {
    #[strum(serialize = "RELAY_MUTATION_ID_LENGTH")]
    IdLength,
    #[strum(serialize = "RELAY_MUTATION_KEY_CONVENTION")]
    KeyConvention,
}

/// Spelling of the client mutation id key in the input envelope and payload.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum KeyConvention {
    /// `client_mutation_id`
    #[default]
    Underscore,

    /// `clientMutationId`, as exposed by a GraphQL schema.
    Camel,
}

impl KeyConvention {
    pub fn client_mutation_id_key(&self) -> &'static str {
        match self {
            Self::Underscore => "client_mutation_id",
            Self::Camel => "clientMutationId",
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct MutationConfig {
    /// Length of generated client mutation ids.
    #[serde(default = "default_client_mutation_id_length")]
    pub client_mutation_id_length: usize,

    /// Key under which the client mutation id is read and echoed.
    #[serde(default)]
    pub key_convention: KeyConvention,
}

fn default_client_mutation_id_length() -> usize {
    defaults::CLIENT_MUTATION_ID_LENGTH
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            client_mutation_id_length: defaults::CLIENT_MUTATION_ID_LENGTH,
            key_convention: KeyConvention::from_str(defaults::KEY_CONVENTION)
                .unwrap_or_default(),
        }
    }
}

impl MutationConfig {
    /// Configuration for fields exposed through a GraphQL schema, where the id
    /// travels as `clientMutationId`.
    pub fn graphql() -> Self {
        Self {
            key_convention: KeyConvention::Camel,
            ..Self::default()
        }
    }

    pub fn with_client_mutation_id_length(self, length: usize) -> Self {
        Self {
            client_mutation_id_length: length,
            ..self
        }
    }

    pub fn client_mutation_id_key(&self) -> &'static str {
        self.key_convention.client_mutation_id_key()
    }

    // Any setting missing from the file keeps its default value.
    pub fn from_file(path: impl AsRef<Path>) -> MutationResult<Self> {
        let file = File::open(path)?;
        let content: serde_yaml::Value = serde_yaml::from_reader(file)?;

        let mut config = MutationConfig::default();

        if let Some(length) = content.get("client_mutation_id_length") {
            config.client_mutation_id_length = serde_yaml::from_value(length.clone())?;
        }

        if let Some(convention) = content.get("key_convention") {
            config.key_convention = serde_yaml::from_value(convention.clone())?;
        }

        config.validate()?;

        Ok(config)
    }

    /// Apply `RELAY_MUTATION_*` environment overrides on top of this config.
    pub fn inject_opt_env_vars(&mut self) -> MutationResult<()> {
        if let Ok(length) = std::env::var(EnvVar::IdLength.as_ref()) {
            self.client_mutation_id_length = length.trim().parse().map_err(|_| {
                MutationError::EnvVarParseError(
                    EnvVar::IdLength.as_ref().to_string(),
                    length.clone(),
                )
            })?;
        }

        if let Ok(convention) = std::env::var(EnvVar::KeyConvention.as_ref()) {
            self.key_convention = KeyConvention::from_str(convention.trim())
                .map_err(|_| MutationError::UnrecognizedKeyConvention(convention))?;
        }

        self.validate()
    }

    pub fn validate(&self) -> MutationResult<()> {
        if self.client_mutation_id_length == 0 {
            return Err(MutationError::InvalidIdLength(0));
        }
        Ok(())
    }
}
