//! Sibling field dependencies for GraphQL resolvers.
//!
//! A field whose resolver is wrapped with [`is_dependee`] publishes every value
//! it resolves into the [`ResolutionContext`] of the request, at the position
//! of the field in the response. A sibling field resolved with
//! [`resolve_dependee`] waits one executor turn, then reuses that value instead
//! of computing it again:
//!
//! ```ignore
//! let product = ObjectType::new("Product")
//!     .field("grossPrice", is_dependee(from_async_fn(|params| fetch_price(params))))
//!     .field("tax", pipe([
//!         Arc::new(resolve_dependee("grossPrice")) as ResolverRef,
//!         Arc::new(from_fn(|params| Ok(json!(params.root.as_f64().unwrap_or_default() * 0.1)))),
//!     ]));
//! ```
//!
//! When the sibling did not run, because the operation did not select it for
//! instance, the dependent calls the resolver declared on the sibling field
//! directly.

mod combinators;
mod config;
mod context;
mod dependee;
mod dependent;
mod error;
mod guard;
mod lookup;
mod outcome;
mod path;
mod resolver;
mod schema;

pub use combinators::{all, combine, pipe, All, Combine, Pipe};
pub use config::{DependeeConfig, LookupOrder};
pub use context::{DependeeLog, DependeeRecord, ResolutionContext, DEPENDEES_KEY};
pub use dependee::{is_dependee, Dependee};
pub use dependent::{resolve_dependee, resolve_dependees, DependentResolver, DependentsResolver};
pub use error::{ResolverError, ResolverResult};
pub use guard::context_must_be_mutable;
pub use lookup::{dependee_exists, scheduling_barrier, DependeeExists};
pub use outcome::{Outcome, Resolution, ResolverFuture};
pub use path::{Ancestors, FieldPath, PathKey};
pub use resolver::{default_field_resolver, from_async_fn, from_fn, ResolveParams, Resolver, ResolverRef};
pub use schema::{FieldDefinition, ObjectType, ResolveInfo};
