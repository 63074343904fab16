use std::sync::Arc;

/// Errors surfaced by dependee-aware resolvers.
///
/// Cloneable so a single failure can be handed to every caller awaiting the
/// same in-flight resolution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolverError {
    #[error("Resolution context must be mutable to hold dependee records")]
    ImmutableContext,
    #[error("Cannot get dependee \"{dependee}\" from field \"{field}\" on type \"{parent_type}\"")]
    UnknownDependee {
        dependee: String,
        field: String,
        parent_type: String,
    },
    #[error("Context key \"{0}\" is reserved")]
    ReservedKey(String),
    #[error("{message}")]
    Resolver { message: Arc<str> },
    #[error("Invalid dependee configuration: {0}")]
    Config(String),
}

impl ResolverError {
    /// Error raised by a user resolver. Passed through untouched by every combinator.
    pub fn new(message: impl Into<Arc<str>>) -> Self {
        Self::Resolver {
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for ResolverError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

pub type ResolverResult<T> = Result<T, ResolverError>;
