//! Argument and payload shapes of a Relay input object mutation.

use crate::{config::KeyConvention, defaults, id::ClientMutationId, MutationResult};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;
use std::ops::Deref;
use tracing::warn;

pub type Mapping = serde_json::Map<String, JsonValue>;

/// Raw arguments handed to a mutation field by the execution engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutationArguments(Mapping);

impl MutationArguments {
    pub fn new(args: Mapping) -> Self {
        Self(args)
    }

    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.0.get(name)
    }

    /// Split off the `input` envelope.
    ///
    /// Returns `None` when there is no `input` argument, or when it is not an
    /// object. A malformed `input` is dropped rather than reported.
    pub fn into_envelope(mut self, convention: KeyConvention) -> Option<InputEnvelope> {
        match self.0.remove(defaults::INPUT_ARGUMENT) {
            Some(JsonValue::Object(envelope)) => {
                Some(InputEnvelope::from_mapping(envelope, convention))
            }
            Some(other) => {
                warn!("Discarding non-object mutation input: {other}");
                None
            }
            None => None,
        }
    }
}

impl From<Mapping> for MutationArguments {
    fn from(args: Mapping) -> Self {
        Self(args)
    }
}

impl FromIterator<(String, JsonValue)> for MutationArguments {
    fn from_iter<T: IntoIterator<Item = (String, JsonValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The value of the `input` argument, with the client mutation id lifted out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputEnvelope {
    pub client_mutation_id: Option<ClientMutationId>,
    pub input: InnerInput,
}

impl InputEnvelope {
    pub fn from_mapping(mut envelope: Mapping, convention: KeyConvention) -> Self {
        let client_mutation_id = envelope
            .remove(convention.client_mutation_id_key())
            .and_then(|id| match id {
                JsonValue::Null => None,
                JsonValue::String(id) => Some(ClientMutationId::from(id)),
                other => Some(ClientMutationId::from(other.to_string())),
            });

        Self {
            client_mutation_id,
            input: InnerInput(envelope),
        }
    }
}

/// Business payload passed to the designer resolver. Never contains the client
/// mutation id.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InnerInput(Mapping);

impl InnerInput {
    pub fn into_inner(self) -> Mapping {
        self.0
    }

    /// Deserialize the input into a typed value.
    pub fn deserialize<T: DeserializeOwned>(&self) -> MutationResult<T> {
        Ok(serde_json::from_value(JsonValue::Object(self.0.clone()))?)
    }
}

impl Deref for InnerInput {
    type Target = Mapping;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Mapping> for InnerInput {
    fn from(input: Mapping) -> Self {
        Self(input)
    }
}

/// Successful result of a mutation resolver.
///
/// Only `Mapping` payloads can carry a client mutation id. `Opaque` payloads
/// pass through the adapter untouched.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MutationPayload {
    Mapping(Mapping),
    Opaque(JsonValue),
}

impl MutationPayload {
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            Self::Mapping(mapping) => mapping.get(key),
            Self::Opaque(_) => None,
        }
    }

    pub fn client_mutation_id(&self, convention: KeyConvention) -> Option<&str> {
        self.get(convention.client_mutation_id_key())
            .and_then(JsonValue::as_str)
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    pub fn into_json(self) -> JsonValue {
        match self {
            Self::Mapping(mapping) => JsonValue::Object(mapping),
            Self::Opaque(value) => value,
        }
    }
}

impl From<JsonValue> for MutationPayload {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(mapping) => Self::Mapping(mapping),
            other => Self::Opaque(other),
        }
    }
}

impl From<Mapping> for MutationPayload {
    fn from(mapping: Mapping) -> Self {
        Self::Mapping(mapping)
    }
}
