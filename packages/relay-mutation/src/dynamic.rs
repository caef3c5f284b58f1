//! `async_graphql::dynamic` bridge for [`RelayMutation`].
//!
//! Declaring the mutation field and its `Input`/`Payload` types is left to the
//! schema; this module only adapts the resolvers.

use crate::{
    adapter::RelayMutation,
    envelope::{InnerInput, Mapping, MutationArguments, MutationPayload},
    MutationResult,
};
use async_graphql::{
    dynamic::{FieldFuture, FieldValue, ResolverContext},
    Value,
};
use extension_trait::extension_trait;
use serde_json::Value as JsonValue;
use std::{future::Future, sync::Arc};

/// Resolution info handed to designer resolvers mounted on a dynamic schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    pub field_name: String,
}

#[extension_trait]
pub impl<'a> ResolverContextMutationExt<'a> for ResolverContext<'a> {
    fn mutation_arguments(&self) -> MutationResult<MutationArguments> {
        self.args
            .iter()
            .map(|(name, value)| -> MutationResult<(String, JsonValue)> {
                Ok((name.to_string(), value.as_value().clone().into_json()?))
            })
            .collect::<MutationResult<Mapping>>()
            .map(MutationArguments::from)
    }

    fn field_info(&self) -> FieldInfo {
        FieldInfo {
            field_name: self.field().name().to_string(),
        }
    }
}

impl<R> RelayMutation<R> {
    /// Resolve a dynamic mutation field.
    ///
    /// ```ignore
    /// let double = Arc::new(RelayMutation::with_config(double, MutationConfig::graphql()));
    /// Field::new("double", TypeRef::named_nn("DoublePayload"), move |ctx| {
    ///     double.resolve_field(ctx)
    /// })
    /// .argument(InputValue::new("input", TypeRef::named_nn("DoubleInput")));
    /// ```
    pub fn resolve_field<'a, Fut, P>(
        self: &Arc<Self>,
        ctx: ResolverContext<'a>,
    ) -> FieldFuture<'a>
    where
        R: Fn(InnerInput, FieldInfo) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = async_graphql::Result<P>> + Send + 'static,
        P: Into<MutationPayload> + Send + 'static,
    {
        let mutation = Arc::clone(self);
        FieldFuture::new(async move {
            let args = ctx.mutation_arguments()?;
            let info = ctx.field_info();
            let payload = mutation.resolve(args, info).await?;
            let value = Value::from_json(payload.into_json())?;
            Ok(Some(FieldValue::value(value)))
        })
    }
}

/// Resolve a payload field by reading the same-named entry of the parent
/// object value.
pub fn resolve_payload_field(ctx: ResolverContext) -> FieldFuture {
    FieldFuture::new(async move {
        let parent = ctx.parent_value.try_to_value()?;
        match parent {
            Value::Object(object) => Ok(object
                .get(ctx.field().name())
                .cloned()
                .map(FieldValue::value)),
            _ => Ok(None),
        }
    })
}
