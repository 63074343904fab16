use std::{future::Future, sync::Arc};

use futures::TryFutureExt;
use serde_json::Value;

use crate::{Outcome, Resolution, ResolutionContext, ResolveInfo, ResolverResult};

/// Everything a resolver receives for one field invocation.
///
/// Clones are cheap enough to hand one to every stage of a combined resolver.
#[derive(Debug, Clone)]
pub struct ResolveParams {
    /// The value of the parent field, or the output of the previous stage in a [`pipe`](crate::pipe).
    pub root: Value,
    pub args: Value,
    pub context: ResolutionContext,
    pub info: ResolveInfo,
}

impl ResolveParams {
    #[must_use]
    pub fn with_root(self, root: Value) -> Self {
        Self { root, ..self }
    }
}

pub trait Resolver: Send + Sync {
    fn resolve(&self, params: ResolveParams) -> Resolution;
}

pub type ResolverRef = Arc<dyn Resolver>;

impl<F> Resolver for F
where
    F: Fn(ResolveParams) -> Resolution + Send + Sync,
{
    fn resolve(&self, params: ResolveParams) -> Resolution {
        self(params)
    }
}

/// Synchronous resolver returning a plain value.
pub fn from_fn<F>(f: F) -> impl Resolver
where
    F: Fn(ResolveParams) -> ResolverResult<Value> + Send + Sync,
{
    move |params: ResolveParams| Resolution::Ready(f(params).map(Outcome::Value))
}

/// Asynchronous resolver. Its invocations are the ones a [`Dependee`](crate::Dependee) memoizes.
pub fn from_async_fn<F, Fut>(f: F) -> impl Resolver
where
    F: Fn(ResolveParams) -> Fut + Send + Sync,
    Fut: Future<Output = ResolverResult<Value>> + Send + 'static,
{
    move |params: ResolveParams| Resolution::pending(f(params).map_ok(Outcome::Value))
}

/// Resolves a field without a resolver of its own: the property of the same name on `root`.
pub fn default_field_resolver(params: ResolveParams) -> Resolution {
    let value = params
        .root
        .get(params.info.field_name.as_str())
        .cloned()
        .unwrap_or(Value::Null);

    Resolution::value(value)
}
