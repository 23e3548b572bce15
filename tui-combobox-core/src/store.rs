//! Centralized state store with reducer pattern
//!
//! The combobox never owns form data. When it is bound to a form field, the
//! caller keeps the form record in a `Store` and dispatches the replacement
//! actions the widget emits.

use crate::Action;
use std::marker::PhantomData;

/// A reducer function that handles actions and mutates state
///
/// Returns `true` if the state changed and a re-render is needed.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// Reducer-driven store holding the caller's form record
///
/// Widgets never write to it directly: they return replacement actions
/// from `handle_event`, and the caller feeds them to [`Store::dispatch`] or
/// [`Store::dispatch_all`].
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// enum FormAction {
///     Replace(FormData),
/// }
///
/// fn reducer(state: &mut FormData, action: FormAction) -> bool {
///     match action {
///         FormAction::Replace(next) => apply_form_change(state, next),
///     }
/// }
///
/// let mut store = Store::new(form_data([("country", "")]), reducer);
/// store.dispatch(FormAction::Replace(form_data([("country", "ca")])));
/// ```
pub struct Store<S, A: Action> {
    state: S,
    reducer: Reducer<S, A>,
    _marker: PhantomData<A>,
}

impl<S, A: Action> Store<S, A> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Dispatch an action to the store
    ///
    /// Returns `true` if the state changed and a re-render is needed.
    pub fn dispatch(&mut self, action: A) -> bool {
        (self.reducer)(&mut self.state, action)
    }

    /// Dispatch every action a component returned from `handle_event`
    ///
    /// Returns `true` if any of them changed the state.
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = A>) -> bool {
        actions
            .into_iter()
            .fold(false, |changed, action| self.dispatch(action) | changed)
    }

    /// The record widgets read their bound fields from
    pub fn state(&self) -> &S {
        &self.state
    }
}

/// Form store whose dispatches pass through a [`Middleware`]
///
/// The demo pairs it with [`LoggingMiddleware`] so every committed field
/// shows up in the trace log.
pub struct StoreWithMiddleware<S, A: Action, M: Middleware<A>> {
    store: Store<S, A>,
    middleware: M,
}

impl<S, A: Action, M: Middleware<A>> StoreWithMiddleware<S, A, M> {
    /// Create a new store with middleware
    pub fn new(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    /// Dispatch an action through middleware and store
    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action);
        let changed = self.store.dispatch(action.clone());
        self.middleware.after(&action, changed);
        changed
    }

    /// Dispatch a batch of actions through middleware and store
    pub fn dispatch_all(&mut self, actions: impl IntoIterator<Item = A>) -> bool {
        actions
            .into_iter()
            .fold(false, |changed, action| self.dispatch(action) | changed)
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }
}

/// Middleware trait for intercepting actions
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, state_changed: bool);
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::debug!(action = %action.name(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                state_changed = state_changed,
                "Action processed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{apply_form_change, form_data, FormData};

    #[derive(Clone, Debug)]
    enum TestAction {
        Replace(FormData),
        NoOp,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Replace(_) => "Replace",
                TestAction::NoOp => "NoOp",
            }
        }
    }

    fn test_reducer(state: &mut FormData, action: TestAction) -> bool {
        match action {
            TestAction::Replace(next) => apply_form_change(state, next),
            TestAction::NoOp => false,
        }
    }

    #[test]
    fn test_store_dispatch() {
        let mut store = Store::new(form_data([("country", ""), ("size", "m")]), test_reducer);

        assert!(store.dispatch(TestAction::Replace(form_data([
            ("country", "ca"),
            ("size", "m"),
        ]))));
        assert_eq!(store.state()["country"], "ca");
        assert_eq!(store.state()["size"], "m");
    }

    #[test]
    fn test_store_noop() {
        let mut store = Store::new(form_data([("country", "us")]), test_reducer);

        assert!(!store.dispatch(TestAction::NoOp));
        assert!(!store.dispatch(TestAction::Replace(form_data([("country", "us")]))));
        assert_eq!(store.state()["country"], "us");
    }

    #[test]
    fn test_store_dispatch_all() {
        let mut store = Store::new(form_data([("country", "")]), test_reducer);

        assert!(!store.dispatch_all(Vec::new()));
        assert!(!store.dispatch_all(None));
        assert!(store.dispatch_all(vec![
            TestAction::Replace(form_data([("country", "ca")])),
            TestAction::NoOp,
        ]));
        assert_eq!(store.state()["country"], "ca");
    }

    #[derive(Default)]
    struct CountingMiddleware {
        before_count: usize,
        changed_count: usize,
    }

    impl<A: Action> Middleware<A> for CountingMiddleware {
        fn before(&mut self, _action: &A) {
            self.before_count += 1;
        }

        fn after(&mut self, _action: &A, state_changed: bool) {
            if state_changed {
                self.changed_count += 1;
            }
        }
    }

    #[test]
    fn test_store_with_middleware() {
        let mut store = StoreWithMiddleware::new(
            FormData::new(),
            test_reducer,
            CountingMiddleware::default(),
        );

        store.dispatch(TestAction::Replace(form_data([("size", "xl")])));
        store.dispatch(TestAction::NoOp);

        assert_eq!(store.middleware().before_count, 2);
        assert_eq!(store.middleware().changed_count, 1);
        assert_eq!(store.state()["size"], "xl");
    }
}
