//! Wraps a designer resolver so it satisfies the Relay input object mutation
//! convention.
//!
//! The wrapped resolver receives only the business fields of the `input`
//! argument. The adapter takes care of the client mutation id on both sides:
//! it reads (or generates) the id before the call and writes it into the
//! payload afterwards.

use crate::{
    config::MutationConfig,
    envelope::{InnerInput, MutationArguments, MutationPayload},
    id::{ClientMutationId, ClientMutationIdGenerator, EntropySource, OsEntropy},
    MutationError, MutationResult,
};
use serde_json::Value as JsonValue;
use std::{fmt, future::Future};
use tracing::{debug, trace};

#[derive(Clone)]
pub struct RelayMutation<R> {
    resolver: R,
    ids: ClientMutationIdGenerator,
    config: MutationConfig,
}

impl<R> fmt::Debug for RelayMutation<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayMutation")
            .field("ids", &self.ids)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<R> RelayMutation<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_config(resolver, MutationConfig::default())
    }

    pub fn with_config(resolver: R, config: MutationConfig) -> Self {
        Self {
            resolver,
            ids: ClientMutationIdGenerator::from_config(OsEntropy, &config),
            config,
        }
    }

    /// Replace the randomness used for fallback ids.
    pub fn with_entropy(self, entropy: impl EntropySource + 'static) -> Self {
        let ids = ClientMutationIdGenerator::from_config(entropy, &self.config);
        Self { ids, ..self }
    }

    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Run the wrapped asynchronous resolver against raw field arguments.
    pub async fn resolve<I, Fut, P, E>(
        &self,
        args: MutationArguments,
        info: I,
    ) -> Result<MutationPayload, E>
    where
        R: Fn(InnerInput, I) -> Fut,
        Fut: Future<Output = Result<P, E>>,
        P: Into<MutationPayload>,
        E: From<MutationError>,
    {
        let (client_mutation_id, input) = self.unwrap_input(args)?;
        let result: Result<MutationPayload, E> =
            (self.resolver)(input, info).await.map(Into::into);
        Ok(self.attach_client_mutation_id(result?, client_mutation_id))
    }

    /// Run the wrapped synchronous resolver against raw field arguments.
    pub fn resolve_sync<I, P, E>(
        &self,
        args: MutationArguments,
        info: I,
    ) -> Result<MutationPayload, E>
    where
        R: Fn(InnerInput, I) -> Result<P, E>,
        P: Into<MutationPayload>,
        E: From<MutationError>,
    {
        let (client_mutation_id, input) = self.unwrap_input(args)?;
        let result: Result<MutationPayload, E> =
            (self.resolver)(input, info).map(Into::into);
        Ok(self.attach_client_mutation_id(result?, client_mutation_id))
    }

    // Without an input envelope there is no id to extract and none is attached.
    fn unwrap_input(
        &self,
        args: MutationArguments,
    ) -> MutationResult<(Option<ClientMutationId>, InnerInput)> {
        let Some(envelope) = args.into_envelope(self.config.key_convention) else {
            return Ok((None, InnerInput::default()));
        };

        let client_mutation_id = match envelope.client_mutation_id {
            Some(id) => id,
            None => {
                let id = self.ids.generate()?;
                debug!("Generated client mutation id {id}");
                id
            }
        };

        Ok((Some(client_mutation_id), envelope.input))
    }

    fn attach_client_mutation_id(
        &self,
        payload: MutationPayload,
        client_mutation_id: Option<ClientMutationId>,
    ) -> MutationPayload {
        match (payload, client_mutation_id) {
            (MutationPayload::Mapping(mut mapping), Some(id)) => {
                mapping.insert(
                    self.config.client_mutation_id_key().to_string(),
                    JsonValue::String(id.into_inner()),
                );
                MutationPayload::Mapping(mapping)
            }
            (MutationPayload::Opaque(value), Some(id)) => {
                trace!("Payload is not an object, dropping client mutation id {id}");
                MutationPayload::Opaque(value)
            }
            (payload, None) => payload,
        }
    }
}
