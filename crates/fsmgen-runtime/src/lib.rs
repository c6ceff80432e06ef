//! fsmgen Runtime
//!
//! The base every generated aggregator builds on: a set of named
//! [`State`]s, one of them current, driven once per frame by a host.
//!
//! # Example
//!
//! ```rust
//! use fsmgen_runtime::{State, StateMachine};
//!
//! struct Idle;
//! impl State for Idle {}
//!
//! struct Walk;
//! impl State for Walk {}
//!
//! let mut machine = StateMachine::new()
//!     .with_state("Idle", Idle)?
//!     .with_state("Walk", Walk)?;
//! machine.set_default("Idle")?;
//! machine.start()?;
//! machine.change_state("Walk")?;
//! machine.run_frame();
//! assert_eq!(machine.current().map(|n| n.as_str()), Some("Walk"));
//! # Ok::<(), fsmgen_runtime::RuntimeError>(())
//! ```

#![warn(unreachable_pub)]

mod error;
mod frame_loop;
mod machine;
mod state;

pub use error::{RuntimeError, RuntimeResult};
pub use frame_loop::{FrameLoop, SharedMachine};
pub use machine::StateMachine;
pub use state::{State, Tick};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
