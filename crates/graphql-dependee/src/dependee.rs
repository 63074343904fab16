//! Resolvers publishing their value for siblings to reuse.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{FutureExt, Shared, WeakShared};

use crate::{
    combine, context_must_be_mutable, pipe, DependeeRecord, Pipe, Resolution, ResolveParams, Resolver, ResolverError,
    ResolverFuture, ResolverRef,
};

/// Marks `resolver` as a dependee.
///
/// The returned resolver behaves like `resolver`, but every value it produces
/// is appended to the context's dependee log, at the path of the field being
/// resolved. Asynchronous invocations are memoized while they are in flight.
pub fn is_dependee(resolver: impl Resolver + 'static) -> Dependee {
    let in_flight = Arc::new(InFlight {
        resolver: Box::new(resolver),
        slot: Arc::default(),
    });

    let publish: ResolverRef = Arc::new(combine([
        Arc::new(context_must_be_mutable) as ResolverRef,
        Arc::new(publish_record),
    ]));

    Dependee {
        pipeline: pipe([Arc::clone(&in_flight) as ResolverRef, publish]),
        in_flight,
    }
}

#[derive(Clone)]
pub struct Dependee {
    pipeline: Pipe,
    in_flight: Arc<InFlight>,
}

impl Dependee {
    /// Whether an asynchronous invocation is currently running.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.current().is_some()
    }
}

impl Resolver for Dependee {
    fn resolve(&self, params: ResolveParams) -> Resolution {
        self.pipeline.resolve(params)
    }
}

type SharedResolution = Shared<ResolverFuture>;
type WeakResolution = WeakShared<ResolverFuture>;

/// Shares a pending invocation with every caller arriving before it settles.
///
/// The slot is emptied as soon as the invocation settles, successfully or not,
/// so a later invocation runs the resolver again. It only holds a weak handle:
/// once every caller dropped its future, the invocation is cancelled and can
/// no longer be joined.
struct InFlight {
    resolver: Box<dyn Resolver>,
    slot: Arc<Mutex<Option<WeakResolution>>>,
}

impl InFlight {
    /// The invocation still running, if any. Forgets a cancelled one.
    fn current(&self) -> Option<SharedResolution> {
        upgrade(&mut lock(&self.slot))
    }
}

impl Resolver for InFlight {
    fn resolve(&self, params: ResolveParams) -> Resolution {
        if let Some(shared) = self.current() {
            tracing::debug!(path = %params.info.path, "joining in-flight dependee resolution");
            return Resolution::Pending(shared.boxed());
        }

        // The lock is not held while user code runs.
        let future = match self.resolver.resolve(params) {
            Resolution::Pending(future) => future,
            ready => return ready,
        };

        let mut slot = lock(&self.slot);

        // Someone else installed a resolution in the meantime. Futures are lazy,
        // ours never ran and is dropped.
        if let Some(shared) = upgrade(&mut slot) {
            return Resolution::Pending(shared.boxed());
        }

        let cleared = Arc::clone(&self.slot);
        let shared = future
            .inspect(move |_| {
                lock(&cleared).take();
            })
            .boxed()
            .shared();

        *slot = shared.downgrade();

        Resolution::Pending(shared.boxed())
    }
}

fn lock(slot: &Mutex<Option<WeakResolution>>) -> MutexGuard<'_, Option<WeakResolution>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn upgrade(slot: &mut Option<WeakResolution>) -> Option<SharedResolution> {
    let shared = slot.as_ref().and_then(WeakShared::upgrade);

    if shared.is_none() {
        slot.take();
    }

    shared
}

/// Appends `root`, the value produced by the previous stage, to the dependee log.
fn publish_record(params: ResolveParams) -> Resolution {
    let Some(log) = params.context.dependees() else {
        return Resolution::error(ResolverError::ImmutableContext);
    };

    tracing::debug!(path = %params.info.path, "publishing dependee value");

    log.append(DependeeRecord {
        path: params.info.path.clone(),
        value: params.root.clone(),
    });

    Resolution::value(params.root)
}
