//! # FreshCart Testing
//!
//! Testing utilities and helpers for the FreshCart store architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - The [`ReducerTest`] Given-When-Then harness
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use freshcart_testing::{ReducerTest, assertions, test_clock};
//!
//! ReducerTest::new(CartReducer::new())
//!     .with_env(CartEnvironment::new())
//!     .given_state(CartState::default())
//!     .when_action(CartAction::ClearCart)
//!     .then_state(|state| assert!(state.items.is_empty()))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

/// Mock implementations of Environment traits
pub mod mocks {
    use chrono::{DateTime, Utc};
    use freshcart_core::environment::Clock;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use freshcart_testing::mocks::FixedClock;
    /// use freshcart_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Fluent Given-When-Then harness for reducers
pub mod reducer_test {
    use freshcart_core::effect::Effect;
    use freshcart_core::reducer::Reducer;

    /// Type alias for state assertion functions
    type StateAssertion<S> = Box<dyn FnOnce(&S)>;

    /// Type alias for effect assertion functions
    type EffectAssertion<A> = Box<dyn FnOnce(&[Effect<A>])>;

    /// Fluent API for testing reducers with Given-When-Then syntax
    ///
    /// Multiple `when_action` calls apply in order against the same state;
    /// effect assertions see the effects of the *last* action, which is the
    /// one under test.
    pub struct ReducerTest<R, S, A, E>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        reducer: R,
        environment: Option<E>,
        initial_state: Option<S>,
        actions: Vec<A>,
        state_assertions: Vec<StateAssertion<S>>,
        effect_assertions: Vec<EffectAssertion<A>>,
    }

    impl<R, S, A, E> ReducerTest<R, S, A, E>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new reducer test with the given reducer
        #[must_use]
        pub const fn new(reducer: R) -> Self {
            Self {
                reducer,
                environment: None,
                initial_state: None,
                actions: Vec::new(),
                state_assertions: Vec::new(),
                effect_assertions: Vec::new(),
            }
        }

        /// Set the environment for the test
        #[must_use]
        pub fn with_env(mut self, env: E) -> Self {
            self.environment = Some(env);
            self
        }

        /// Set the initial state (Given)
        #[must_use]
        pub fn given_state(mut self, state: S) -> Self {
            self.initial_state = Some(state);
            self
        }

        /// Queue an action to apply (When); may be called multiple times
        #[must_use]
        pub fn when_action(mut self, action: A) -> Self {
            self.actions.push(action);
            self
        }

        /// Add an assertion about the resulting state (Then)
        #[must_use]
        pub fn then_state<F>(mut self, assertion: F) -> Self
        where
            F: FnOnce(&S) + 'static,
        {
            self.state_assertions.push(Box::new(assertion));
            self
        }

        /// Add an assertion about the last action's effects (Then)
        #[must_use]
        pub fn then_effects<F>(mut self, assertion: F) -> Self
        where
            F: FnOnce(&[Effect<A>]) + 'static,
        {
            self.effect_assertions.push(Box::new(assertion));
            self
        }

        /// Run the test and execute all assertions
        ///
        /// # Panics
        ///
        /// Panics if initial state, at least one action, or the environment
        /// is not set, or if any assertion fails.
        #[allow(clippy::panic)] // Test code can panic
        #[allow(clippy::expect_used)] // Test code can use expect
        pub fn run(self) {
            let mut state = self
                .initial_state
                .expect("Initial state must be set with given_state()");

            assert!(
                !self.actions.is_empty(),
                "At least one action must be set with when_action()"
            );

            let env = self
                .environment
                .expect("Environment must be set with with_env()");

            let mut last_effects = smallvec::SmallVec::new();
            for action in self.actions {
                last_effects = self.reducer.reduce(&mut state, action, &env);
            }

            for assertion in self.state_assertions {
                assertion(&state);
            }

            for assertion in self.effect_assertions {
                assertion(&last_effects);
            }
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use freshcart_core::effect::Effect;

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if effects is not empty.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.is_empty() || matches!(effects, [Effect::None]),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count<A>(effects: &[Effect<A>], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that effects contain at least one Delay, at any nesting depth
    ///
    /// # Panics
    ///
    /// Panics if no Delay effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_delay_effect<A>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().any(contains_delay),
            "Expected at least one Delay effect, but none found"
        );
    }

    /// Assert that effects contain a Cancel for the given group key
    ///
    /// # Panics
    ///
    /// Panics if no matching Cancel effect is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_cancels_group<A>(effects: &[Effect<A>], group: &str) {
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, Effect::Cancel(g) if g.as_str() == group)),
            "Expected a Cancel effect for group {group:?}, but none found"
        );
    }

    fn contains_delay<A>(effect: &Effect<A>) -> bool {
        match effect {
            Effect::Delay { .. } => true,
            Effect::Parallel(effects) | Effect::Sequential(effects) => {
                effects.iter().any(contains_delay)
            },
            Effect::Cancellable { effect, .. } => contains_delay(effect),
            Effect::None | Effect::Future(_) | Effect::Cancel(_) => false,
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::ReducerTest;
