//! Client mutation ids and their fallback generation.

use crate::{config::MutationConfig, defaults, MutationError, MutationResult};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use tracing::error;

/// Opaque identifier round-tripped through a mutation so a client can
/// correlate its request with the response.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientMutationId(String);

impl ClientMutationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ClientMutationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientMutationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ClientMutationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ClientMutationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<ClientMutationId> for String {
    fn from(id: ClientMutationId) -> Self {
        id.0
    }
}

/// Source of cryptographically secure random bytes.
///
/// Implementations must be safe to share between concurrently running
/// resolvers.
pub trait EntropySource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]) -> MutationResult<()>;
}

/// The operating system's random number generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) -> MutationResult<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| MutationError::EntropyUnavailable(e.to_string()))
    }
}

/// Generates fallback client mutation ids for callers that did not supply one.
#[derive(Clone)]
pub struct ClientMutationIdGenerator {
    entropy: Arc<dyn EntropySource>,
    length: usize,
}

impl fmt::Debug for ClientMutationIdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientMutationIdGenerator")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

impl Default for ClientMutationIdGenerator {
    fn default() -> Self {
        Self::new(OsEntropy, defaults::CLIENT_MUTATION_ID_LENGTH)
    }
}

impl ClientMutationIdGenerator {
    pub fn new(entropy: impl EntropySource + 'static, length: usize) -> Self {
        Self {
            entropy: Arc::new(entropy),
            length,
        }
    }

    pub fn from_config(
        entropy: impl EntropySource + 'static,
        config: &MutationConfig,
    ) -> Self {
        Self::new(entropy, config.client_mutation_id_length)
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn generate(&self) -> MutationResult<ClientMutationId> {
        self.generate_with_length(self.length)
    }

    /// Draw `length` random bytes, URL-safe encode them without padding and
    /// keep the first `length` characters.
    pub fn generate_with_length(&self, length: usize) -> MutationResult<ClientMutationId> {
        if length == 0 {
            return Err(MutationError::InvalidIdLength(length));
        }

        let mut bytes = vec![0u8; length];
        if let Err(e) = self.entropy.fill_bytes(&mut bytes) {
            error!("Failed to generate client mutation id: {e}");
            return Err(e);
        }

        // Base64 output is always longer than its input, and ASCII, so this
        // truncation lands on a char boundary.
        let mut id = URL_SAFE_NO_PAD.encode(&bytes);
        id.truncate(length);

        Ok(ClientMutationId(id))
    }
}
