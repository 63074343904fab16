//! Resolvers reusing the values published by sibling dependees.

use std::sync::Arc;

use futures::FutureExt;
use tracing::Instrument;

use crate::{
    all, combine, context_must_be_mutable, dependee_exists,
    lookup::{LookupDependee, ResolveDeclaredDependee},
    Combine, Resolution, ResolveParams, Resolver, ResolverRef,
};

/// Resolves to the value of the sibling field `dependee`.
///
/// The value published by the sibling is reused when there is one after the
/// [`scheduling_barrier`](crate::scheduling_barrier). Otherwise the resolver
/// declared on the `dependee` field is called directly with the parameters of
/// the current field. That call bypasses any memoization unless the declared
/// resolver is itself a [`Dependee`](crate::Dependee).
///
/// Fails right away if the context is read-only or if the parent type has no
/// `dependee` field.
pub fn resolve_dependee(dependee: impl Into<String>) -> DependentResolver {
    let dependee = dependee.into();

    let stages: [ResolverRef; 4] = [
        Arc::new(context_must_be_mutable),
        Arc::new(dependee_exists(dependee.clone())),
        Arc::new(LookupDependee {
            dependee: dependee.clone(),
        }),
        Arc::new(ResolveDeclaredDependee {
            dependee: dependee.clone(),
        }),
    ];

    DependentResolver {
        dependee,
        inner: combine(stages),
    }
}

#[derive(Clone)]
pub struct DependentResolver {
    dependee: String,
    inner: Combine,
}

impl DependentResolver {
    pub fn dependee(&self) -> &str {
        &self.dependee
    }
}

impl Resolver for DependentResolver {
    fn resolve(&self, params: ResolveParams) -> Resolution {
        let span = tracing::debug_span!("resolve_dependee", dependee = %self.dependee, path = %params.info.path);

        match span.in_scope(|| self.inner.resolve(params)) {
            Resolution::Pending(future) => Resolution::Pending(future.instrument(span).boxed()),
            ready => ready,
        }
    }
}

/// Resolves to the list of the values of the sibling fields `dependees`, in order.
///
/// Every dependee is resolved independently as with [`resolve_dependee`], and
/// the whole resolution fails if any of them fails.
pub fn resolve_dependees<I>(dependees: I) -> DependentsResolver
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let dependents = dependees
        .into_iter()
        .map(|dependee| Arc::new(resolve_dependee(dependee)) as ResolverRef)
        .collect::<Vec<_>>();

    DependentsResolver {
        inner: combine([Arc::new(context_must_be_mutable) as ResolverRef, Arc::new(all(dependents))]),
    }
}

#[derive(Clone)]
pub struct DependentsResolver {
    inner: Combine,
}

impl Resolver for DependentsResolver {
    fn resolve(&self, params: ResolveParams) -> Resolution {
        self.inner.resolve(params)
    }
}
