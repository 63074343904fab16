use std::{fmt, future::IntoFuture};

use futures::{future::BoxFuture, FutureExt};
use serde_json::Value;

use crate::ResolverResult;

/// What a resolver stage decided.
///
/// `Skip` has no opinion and hands over to whatever comes next, a missing
/// dependee record or a passing precondition for instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Value(Value),
    Skip,
}

impl Outcome {
    pub fn is_skip(&self) -> bool {
        matches!(self, Outcome::Skip)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Outcome::Value(value) => Some(value),
            Outcome::Skip => None,
        }
    }

    /// A field that nobody resolved ends up as `null` in the response.
    pub fn into_value(self) -> Value {
        match self {
            Outcome::Value(value) => value,
            Outcome::Skip => Value::Null,
        }
    }
}

impl From<Value> for Outcome {
    fn from(value: Value) -> Self {
        Outcome::Value(value)
    }
}

pub type ResolverFuture = BoxFuture<'static, ResolverResult<Outcome>>;

/// The result of invoking a resolver: either already known, or still running.
///
/// Only `Pending` resolutions are memoized by a [`Dependee`](crate::Dependee).
pub enum Resolution {
    Ready(ResolverResult<Outcome>),
    Pending(ResolverFuture),
}

impl Resolution {
    pub fn value(value: impl Into<Value>) -> Self {
        Resolution::Ready(Ok(Outcome::Value(value.into())))
    }

    pub fn skip() -> Self {
        Resolution::Ready(Ok(Outcome::Skip))
    }

    pub fn error(error: crate::ResolverError) -> Self {
        Resolution::Ready(Err(error))
    }

    pub fn pending<F>(future: F) -> Self
    where
        F: std::future::Future<Output = ResolverResult<Outcome>> + Send + 'static,
    {
        Resolution::Pending(future.boxed())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Resolution::Pending(_))
    }
}

impl IntoFuture for Resolution {
    type Output = ResolverResult<Outcome>;
    type IntoFuture = ResolverFuture;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Resolution::Ready(result) => futures::future::ready(result).boxed(),
            Resolution::Pending(future) => future,
        }
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Resolution::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}
