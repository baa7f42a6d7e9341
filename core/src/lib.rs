//! # FreshCart Core
//!
//! Core traits and types for the FreshCart store architecture.
//!
//! This crate provides the fundamental abstractions shared by every store in
//! the storefront: the cart, the order book with its delivery timeline, and
//! the user profile.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a store (cart contents, placed orders, ...)
//! - **Action**: All possible inputs to a reducer, as a tagged enum
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Unidirectional data flow: UI events become actions, actions become
//!   state transitions, transitions may schedule effects
//! - Explicit effects (no hidden I/O inside reducers)
//! - Stores are constructed once at session start and passed by reference;
//!   there are no ambient singletons
//! - Stores never raise domain errors: unknown ids and other not-found
//!   conditions are silent no-ops, documented on each action variant
//!
//! ## Example
//!
//! ```
//! use freshcart_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct TallyState {
//!     count: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum TallyAction {
//!     Bump,
//! }
//!
//! struct TallyReducer;
//!
//! impl Reducer for TallyReducer {
//!     type State = TallyState;
//!     type Action = TallyAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut TallyState,
//!         action: TallyAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<TallyAction>; 4]> {
//!         match action {
//!             TallyAction::Bump => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - The core trait for store business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They contain all state-transition logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for store logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Contract
    ///
    /// `reduce` must not perform I/O and must not panic. Anything that has to
    /// happen outside the state transition is returned as an [`Effect`]
    /// description for the runtime to execute. Invalid inputs are accepted
    /// as-is or ignored; reducers never return errors.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effect descriptions to be executed by the runtime. Pure
        /// transitions return an empty vector or `[Effect::None]`.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime. They are
/// values (not execution) and are composable and cancellable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// Identifier for a cancellation scope covering one or more effects.
    ///
    /// Every effect wrapped in [`Effect::Cancellable`] under the same group
    /// is torn down together by a single [`Effect::Cancel`] — there is no
    /// partial cancellation of individual members. The delivery status
    /// timeline relies on this: one group covers all of an order's pending
    /// transitions, and discarding the tracking context cancels them as a
    /// unit.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct EffectGroup(String);

    impl EffectGroup {
        /// Creates a group identifier from any string-like key
        pub fn new(id: impl Into<String>) -> Self {
            Self(id.into())
        }

        /// Returns the group key
        #[must_use]
        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl std::fmt::Display for EffectGroup {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store
    /// runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (timers, simulated pipelines)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after the delay elapses
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into
        /// the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),

        /// Scope the inner effect under a cancellation group
        ///
        /// All pending work produced by the inner effect is registered under
        /// `group` and torn down together by [`Effect::Cancel`].
        Cancellable {
            /// Cancellation scope the inner effect joins
            group: EffectGroup,
            /// The effect to execute under that scope
            effect: Box<Effect<Action>>,
        },

        /// Cancel every pending effect registered under the group
        ///
        /// Unknown groups are a silent no-op.
        Cancel(EffectGroup),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
                Effect::Cancellable { group, effect } => f
                    .debug_struct("Effect::Cancellable")
                    .field("group", group)
                    .field("effect", effect)
                    .finish(),
                Effect::Cancel(group) => {
                    f.debug_tuple("Effect::Cancel").field(group).finish()
                },
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Scope an effect under a cancellation group
        #[must_use]
        pub fn cancellable(group: EffectGroup, effect: Effect<Action>) -> Effect<Action> {
            Effect::Cancellable {
                group,
                effect: Box::new(effect),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected via
/// the Environment parameter, keeping reducers deterministic under test.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// Production code uses [`SystemClock`]; tests inject a fixed clock so
    /// timestamps are reproducible.
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// System clock - returns the actual current time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
        fn now(&self) -> DateTime<Utc> {
            self.as_ref().now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::{Effect, EffectGroup};
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Tick,
    }

    #[test]
    fn effect_group_display_matches_key() {
        let group = EffectGroup::new("order-tracking/ORD-1");
        assert_eq!(group.as_str(), "order-tracking/ORD-1");
        assert_eq!(format!("{group}"), "order-tracking/ORD-1");
    }

    #[test]
    fn effect_groups_compare_by_key() {
        assert_eq!(EffectGroup::new("a"), EffectGroup::new("a"));
        assert_ne!(EffectGroup::new("a"), EffectGroup::new("b"));
    }

    #[test]
    fn merge_builds_parallel() {
        let effect: Effect<TestAction> = Effect::merge(vec![Effect::None, Effect::None]);
        assert!(matches!(effect, Effect::Parallel(ref inner) if inner.len() == 2));
    }

    #[test]
    fn chain_builds_sequential() {
        let effect: Effect<TestAction> = Effect::chain(vec![Effect::None]);
        assert!(matches!(effect, Effect::Sequential(ref inner) if inner.len() == 1));
    }

    #[test]
    fn cancellable_debug_includes_group() {
        let effect = Effect::cancellable(
            EffectGroup::new("g"),
            Effect::Delay {
                duration: Duration::from_secs(5),
                action: Box::new(TestAction::Tick),
            },
        );
        let debug = format!("{effect:?}");
        assert!(debug.contains("Effect::Cancellable"));
        assert!(debug.contains('g'));
    }
}
