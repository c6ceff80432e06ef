//! Named states with a single current state

use crate::error::{RuntimeError, RuntimeResult};
use crate::state::{State, Tick};
use fsmgen_artifact::Identifier;
use indexmap::IndexMap;

/// Registry of named states and the transition between them
///
/// States are registered once, in the order a generated construction
/// method builds them. Lookups normalize the requested name the same way
/// the generator normalizes spec names.
#[derive(Default)]
pub struct StateMachine {
    states: IndexMap<Identifier, Box<dyn State>>,
    default_state: Option<Identifier>,
    current: Option<Identifier>,
}

impl StateMachine {
    /// Create empty machine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `state` under `name`
    ///
    /// # Errors
    /// - [`RuntimeError::InvalidName`] if `name` is blank
    /// - [`RuntimeError::DuplicateState`] if `name` is taken
    pub fn register(&mut self, name: &str, state: impl State + 'static) -> RuntimeResult<()> {
        let name = Identifier::parse(name)?;
        if self.states.contains_key(&name) {
            return Err(RuntimeError::DuplicateState(name));
        }
        tracing::debug!("Registered state {}", name);
        self.states.insert(name, Box::new(state));
        Ok(())
    }

    /// Builder form of [`register`](Self::register)
    ///
    /// # Errors
    /// As [`register`](Self::register)
    pub fn with_state(mut self, name: &str, state: impl State + 'static) -> RuntimeResult<Self> {
        self.register(name, state)?;
        Ok(self)
    }

    /// State entered by [`start`](Self::start)
    ///
    /// # Errors
    /// [`RuntimeError::UnknownState`] if nothing is registered under `name`
    pub fn set_default(&mut self, name: &str) -> RuntimeResult<()> {
        let key = self.resolve(name)?;
        self.default_state = Some(key);
        Ok(())
    }

    /// Enter the default state, if one is set
    ///
    /// # Errors
    /// Never fails for a default set through [`set_default`](Self::set_default)
    pub fn start(&mut self) -> RuntimeResult<()> {
        match self.default_state.clone() {
            Some(default) => self.change_state(default.as_str()),
            None => {
                tracing::warn!("Started without a default state");
                Ok(())
            }
        }
    }

    /// Exit the current state and enter `name`
    ///
    /// # Errors
    /// [`RuntimeError::UnknownState`] if `name` is not registered; the
    /// current state is left as it was and no hook runs.
    pub fn change_state(&mut self, name: &str) -> RuntimeResult<()> {
        let next = self.resolve(name)?;

        if let Some(previous) = self.current.take() {
            if let Some(state) = self.states.get_mut(&previous) {
                state.exit();
            }
            tracing::debug!("Exited {}", previous);
        }
        if let Some(state) = self.states.get_mut(&next) {
            state.enter();
        }
        tracing::debug!("Entered {}", next);
        self.current = Some(next);
        Ok(())
    }

    /// Dispatch one tick to the current state; no-op before [`start`](Self::start)
    pub fn tick(&mut self, tick: Tick) {
        let Some(current) = &self.current else {
            return;
        };
        if let Some(state) = self.states.get_mut(current) {
            tick.dispatch(state.as_mut());
        }
    }

    /// Dispatch the three ticks of one frame in order
    pub fn run_frame(&mut self) {
        for tick in Tick::FRAME {
            self.tick(tick);
        }
    }

    /// Name of the current state
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&Identifier> {
        self.current.as_ref()
    }

    /// Name of the default state
    #[inline]
    #[must_use]
    pub fn default_state(&self) -> Option<&Identifier> {
        self.default_state.as_ref()
    }

    /// Registered names in registration order
    pub fn state_names(&self) -> impl Iterator<Item = &Identifier> {
        self.states.keys()
    }

    /// Number of registered states
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no state is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn resolve(&self, name: &str) -> RuntimeResult<Identifier> {
        Identifier::normalized(name)
            .filter(|key| self.states.contains_key(key))
            .ok_or_else(|| RuntimeError::UnknownState(name.to_string()))
    }
}

impl std::fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .field("default_state", &self.default_state)
            .field("current", &self.current)
            .finish()
    }
}
