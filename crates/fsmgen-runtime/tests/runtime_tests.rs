//! Machine driven by the frame loop while its owner changes state

use fsmgen_runtime::{FrameLoop, State, StateMachine};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct Tally {
    enters: u32,
    exits: u32,
    updates: u32,
    fixed: u32,
    late: u32,
}

struct Tracked(Arc<Mutex<Tally>>);

impl State for Tracked {
    fn enter(&mut self) {
        self.0.lock().enters += 1;
    }
    fn exit(&mut self) {
        self.0.lock().exits += 1;
    }
    fn on_update(&mut self) {
        self.0.lock().updates += 1;
    }
    fn on_fixed_update(&mut self) {
        self.0.lock().fixed += 1;
    }
    fn on_late_update(&mut self) {
        self.0.lock().late += 1;
    }
}

#[tokio::test]
async fn state_change_mid_loop_moves_ticks() {
    let idle = Arc::new(Mutex::new(Tally::default()));
    let walk = Arc::new(Mutex::new(Tally::default()));

    let mut machine = StateMachine::new()
        .with_state("Idle", Tracked(idle.clone()))
        .unwrap()
        .with_state("Walk", Tracked(walk.clone()))
        .unwrap();
    machine.set_default("Idle").unwrap();
    machine.start().unwrap();
    let machine = Arc::new(Mutex::new(machine));

    let frame_loop = FrameLoop::spawn(machine.clone(), Duration::from_millis(1));
    tokio::time::sleep(Duration::from_millis(20)).await;
    machine.lock().change_state("Walk").unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    let frames = frame_loop.shutdown().await.unwrap();

    let idle = idle.lock();
    let walk = walk.lock();
    assert_eq!((idle.enters, idle.exits), (1, 1));
    assert_eq!((walk.enters, walk.exits), (1, 0));
    assert!(idle.updates > 0);
    assert!(walk.updates > 0);
    assert_eq!(u64::from(idle.updates + walk.updates), frames);
    // every frame runs all three ticks on the same state
    assert_eq!((idle.updates, walk.updates), (idle.fixed, walk.fixed));
    assert_eq!((idle.updates, walk.updates), (idle.late, walk.late));
}
