#![allow(dead_code)]

pub mod prelude {
    pub use super::util::*;
    pub use assert_matches::*;
    pub use insta::*;
    pub use relay_mutation::*;
    pub use serde_json::{json, Value as JsonValue};
}

pub mod util {
    use relay_mutation::{EntropySource, MutationArguments, MutationResult};
    use serde_json::Value as JsonValue;
    use std::sync::atomic::{AtomicU8, Ordering};
    use tracing_subscriber::filter::EnvFilter;

    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    pub fn arguments(value: JsonValue) -> MutationArguments {
        match value {
            JsonValue::Object(args) => MutationArguments::new(args),
            _ => panic!("Mutation arguments must be an object"),
        }
    }

    /// Fills every requested byte with the same value.
    pub struct ConstantEntropy(pub u8);

    impl EntropySource for ConstantEntropy {
        fn fill_bytes(&self, dest: &mut [u8]) -> MutationResult<()> {
            dest.fill(self.0);
            Ok(())
        }
    }

    /// Fills each request with the next byte value, starting at zero.
    #[derive(Default)]
    pub struct CountingEntropy(AtomicU8);

    impl EntropySource for CountingEntropy {
        fn fill_bytes(&self, dest: &mut [u8]) -> MutationResult<()> {
            dest.fill(self.0.fetch_add(1, Ordering::SeqCst));
            Ok(())
        }
    }
}
