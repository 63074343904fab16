use crate::{Resolution, ResolveParams, ResolverError};

/// Precondition stage: the context must be able to hold dependee records.
///
/// Skips when it can, fails with [`ResolverError::ImmutableContext`] otherwise.
pub fn context_must_be_mutable(params: ResolveParams) -> Resolution {
    if params.context.is_mutable() {
        Resolution::skip()
    } else {
        Resolution::error(ResolverError::ImmutableContext)
    }
}
