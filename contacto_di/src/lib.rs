//! Minimal compile time dependency injection.
//!
//! A [`Provider`] owns the leaf dependencies (connections, configuration
//! structs). Every other service derives [`Build`] and is assembled from the
//! provider on demand. Built services are cached per provider, so a service
//! that is requested twice is only constructed once.

extern crate self as contacto_di;

use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

pub use contacto_di_derive::Build;

mod macros;

pub trait Provider: Sized {
    fn cache(&mut self) -> &mut BuildCache;
}

/// Services already built by a provider, at most one per type.
#[derive(Debug, Default)]
pub struct BuildCache {
    built: HashMap<TypeId, Box<dyn Any>>,
}

impl BuildCache {
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.built.get(&TypeId::of::<T>())?.downcast_ref()
    }

    pub fn insert<T: 'static>(&mut self, service: T) {
        self.built.insert(TypeId::of::<T>(), Box::new(service));
    }
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provide: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provide for P {}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    #[derive(Debug, Clone)]
    struct Counter(Arc<AtomicUsize>);

    #[derive(Debug, Clone, Build)]
    struct Service {
        counter: Counter,
        #[state]
        state: Arc<AtomicUsize>,
    }

    #[derive(Debug, Clone, Build)]
    struct Outer<S> {
        first: S,
        second: S,
    }

    crate::provider! {
        TestProvider {
            counter: Counter,
        }
    }

    #[test]
    fn build_is_cached() {
        let mut provider = TestProvider {
            built: Default::default(),
            counter: Counter(Default::default()),
        };

        let outer: Outer<Service> = provider.provide();
        outer.first.state.fetch_add(1, Ordering::Relaxed);

        assert!(Arc::ptr_eq(&outer.first.state, &outer.second.state));
        assert_eq!(outer.second.state.load(Ordering::Relaxed), 1);
        assert!(Arc::ptr_eq(&outer.first.counter.0, &provider.counter.0));
    }
}
