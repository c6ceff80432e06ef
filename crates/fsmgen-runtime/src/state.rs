//! State hooks and frame ticks

/// One state of a [`StateMachine`](crate::StateMachine).
///
/// Every hook has an empty default, so a state only implements what it
/// reacts to. The update hooks run on the state that is current when the
/// tick fires.
///
/// # Example
///
/// ```rust
/// use fsmgen_runtime::State;
///
/// struct Idle {
///     frames: u32,
/// }
///
/// impl State for Idle {
///     fn on_update(&mut self) {
///         self.frames += 1;
///     }
/// }
/// ```
pub trait State: Send {
    /// Called when the machine switches to this state
    fn enter(&mut self) {}

    /// Called when the machine switches away from this state
    fn exit(&mut self) {}

    /// Called once per frame on the update tick
    fn on_update(&mut self) {}

    /// Called once per frame on the late-update tick
    fn on_late_update(&mut self) {}

    /// Called once per frame on the fixed-update tick
    fn on_fixed_update(&mut self) {}
}

/// The per-frame callbacks a host drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tick {
    /// Regular update
    Update,
    /// Fixed-step update
    FixedUpdate,
    /// After all regular updates
    LateUpdate,
}

impl Tick {
    /// Ticks in the order one frame dispatches them
    pub const FRAME: [Tick; 3] = [Tick::Update, Tick::FixedUpdate, Tick::LateUpdate];

    /// Invoke the hook matching this tick
    pub fn dispatch(self, state: &mut dyn State) {
        match self {
            Tick::Update => state.on_update(),
            Tick::FixedUpdate => state.on_fixed_update(),
            Tick::LateUpdate => state.on_late_update(),
        }
    }
}
