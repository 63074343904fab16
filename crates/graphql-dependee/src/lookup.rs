//! Stages used by dependents to find the value published by a sibling.

use serde_json::Value;

use crate::{Outcome, Resolution, ResolveParams, Resolver, ResolverError};

/// Yields exactly one turn to the executor.
///
/// Sibling fields are started by the engine in the same turn. Giving up the
/// current one lets dependees which are already running, typically ones
/// finishing on their first poll, publish their record before a dependent
/// reads the log.
///
/// This is an ordering heuristic, not a synchronization point: a dependee that
/// is still waiting on I/O after one turn will not have published anything.
pub async fn scheduling_barrier() {
    futures_lite::future::yield_now().await;
}

/// Fails unless `dependee` is a field of the parent type of the field being resolved.
pub fn dependee_exists(dependee: impl Into<String>) -> DependeeExists {
    DependeeExists {
        dependee: dependee.into(),
    }
}

pub struct DependeeExists {
    dependee: String,
}

impl Resolver for DependeeExists {
    fn resolve(&self, params: ResolveParams) -> Resolution {
        let info = &params.info;

        if info.parent_type.field_by_name(&self.dependee).is_some() {
            return Resolution::skip();
        }

        Resolution::error(ResolverError::UnknownDependee {
            dependee: self.dependee.clone(),
            field: info.field_name.clone(),
            parent_type: info.parent_type.name().to_string(),
        })
    }
}

/// After the [`scheduling_barrier`], the value published by `dependee` among
/// the siblings of the current field, or a skip.
pub(crate) struct LookupDependee {
    pub(crate) dependee: String,
}

impl Resolver for LookupDependee {
    fn resolve(&self, params: ResolveParams) -> Resolution {
        let dependee = self.dependee.clone();

        Resolution::pending(async move {
            scheduling_barrier().await;

            let Some(log) = params.context.dependees() else {
                return Err(ResolverError::ImmutableContext);
            };

            let path = &params.info.path;
            match log.find(path, &dependee, params.context.config().lookup_order) {
                Some(value) => {
                    tracing::debug!(%path, dependee = %dependee, "found published dependee value");
                    Ok(Outcome::Value(value))
                }
                None => {
                    tracing::debug!(%path, dependee = %dependee, "no published dependee value");
                    Ok(Outcome::Skip)
                }
            }
        })
    }
}

/// Resolves `dependee` by calling the resolver declared on its field with the
/// current parameters. Fields without a resolver read the property from `root`.
pub(crate) struct ResolveDeclaredDependee {
    pub(crate) dependee: String,
}

impl Resolver for ResolveDeclaredDependee {
    fn resolve(&self, params: ResolveParams) -> Resolution {
        if !params.context.config().fallback {
            return Resolution::skip();
        }

        let resolver = match params.info.parent_type.field_by_name(&self.dependee) {
            Some(field) => field.resolver().cloned(),
            None => return Resolution::skip(),
        };

        tracing::debug!(path = %params.info.path, dependee = %self.dependee, "resolving dependee directly");

        match resolver {
            Some(resolver) => resolver.resolve(params),
            None => Resolution::value(params.root.get(&self.dependee).cloned().unwrap_or(Value::Null)),
        }
    }
}
