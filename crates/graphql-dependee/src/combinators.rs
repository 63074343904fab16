//! Building blocks to assemble resolvers out of smaller stages.
//!
//! Stages that finish synchronously are chained synchronously, so a failing
//! precondition is reported without ever yielding to the executor.

use std::sync::Arc;

use futures::TryFutureExt;
use serde_json::Value;

use crate::{Outcome, Resolution, ResolveParams, Resolver, ResolverRef};

/// Runs stages in order with the same parameters. The first stage that does
/// not [`Skip`](Outcome::Skip) decides the outcome, errors included.
#[derive(Clone)]
pub struct Combine {
    stages: Arc<[ResolverRef]>,
}

pub fn combine(stages: impl IntoIterator<Item = ResolverRef>) -> Combine {
    Combine {
        stages: stages.into_iter().collect(),
    }
}

impl Resolver for Combine {
    fn resolve(&self, params: ResolveParams) -> Resolution {
        run_combined(Arc::clone(&self.stages), 0, params)
    }
}

fn run_combined(stages: Arc<[ResolverRef]>, start: usize, params: ResolveParams) -> Resolution {
    for (idx, stage) in stages.iter().enumerate().skip(start) {
        match stage.resolve(params.clone()) {
            Resolution::Ready(Ok(Outcome::Skip)) => continue,
            Resolution::Ready(result) => return Resolution::Ready(result),
            Resolution::Pending(future) => {
                let stages = Arc::clone(&stages);
                return Resolution::pending(async move {
                    match future.await? {
                        Outcome::Skip => run_combined(stages, idx + 1, params).await,
                        outcome => Ok(outcome),
                    }
                });
            }
        }
    }

    Resolution::skip()
}

/// Runs stages in order, each one receiving the previous value as its `root`.
/// A skip or an error stops the pipe.
#[derive(Clone)]
pub struct Pipe {
    stages: Arc<[ResolverRef]>,
}

pub fn pipe(stages: impl IntoIterator<Item = ResolverRef>) -> Pipe {
    Pipe {
        stages: stages.into_iter().collect(),
    }
}

impl Resolver for Pipe {
    fn resolve(&self, params: ResolveParams) -> Resolution {
        run_piped(Arc::clone(&self.stages), 0, params)
    }
}

fn run_piped(stages: Arc<[ResolverRef]>, start: usize, mut params: ResolveParams) -> Resolution {
    for (idx, stage) in stages.iter().enumerate().skip(start) {
        match stage.resolve(params.clone()) {
            Resolution::Ready(Ok(Outcome::Value(value))) => params = params.with_root(value),
            Resolution::Ready(result) => return Resolution::Ready(result),
            Resolution::Pending(future) => {
                let stages = Arc::clone(&stages);
                return Resolution::pending(async move {
                    match future.await? {
                        Outcome::Value(value) => run_piped(stages, idx + 1, params.with_root(value)).await,
                        Outcome::Skip => Ok(Outcome::Skip),
                    }
                });
            }
        }
    }

    Resolution::value(params.root)
}

/// Runs every resolver independently and collects their values in a list.
/// Fails with the first error, in declaration order for synchronous failures.
#[derive(Clone)]
pub struct All {
    resolvers: Arc<[ResolverRef]>,
}

pub fn all(resolvers: impl IntoIterator<Item = ResolverRef>) -> All {
    All {
        resolvers: resolvers.into_iter().collect(),
    }
}

impl Resolver for All {
    fn resolve(&self, params: ResolveParams) -> Resolution {
        let mut values = Vec::with_capacity(self.resolvers.len());
        let mut pending = Vec::new();

        for (idx, resolver) in self.resolvers.iter().enumerate() {
            match resolver.resolve(params.clone()) {
                Resolution::Ready(Ok(outcome)) => values.push(outcome.into_value()),
                Resolution::Ready(Err(error)) => return Resolution::error(error),
                Resolution::Pending(future) => {
                    values.push(Value::Null);
                    pending.push(future.map_ok(move |outcome| (idx, outcome)));
                }
            }
        }

        if pending.is_empty() {
            return Resolution::value(values);
        }

        Resolution::pending(async move {
            for (idx, outcome) in futures::future::try_join_all(pending).await? {
                values[idx] = outcome.into_value();
            }

            Ok(Outcome::Value(Value::Array(values)))
        })
    }
}
