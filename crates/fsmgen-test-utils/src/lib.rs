//! Testing utilities for fsmgen workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use fsmgen_artifact::StateMachineSpec;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fresh aggregator for `Char` with states `Idle`, `Walk` and default `Idle`
pub const TWO_STATE_AGGREGATOR: &str = "\
public class Char : BaseStateMachine
{
    public IState Idle;
    public IState Walk;

    public override void ChangeState(IState newState)
    {
        base.ChangeState(newState);
    }

    protected override void GenerateStates()
    {
        this.Idle = new Idle(this);
        this.Walk = new Walk(this);
        this.defaultState = Idle;
    }
}
";

/// Spec named `Char` writing to `out`
pub fn spec(states: &[&str], default_index: usize) -> StateMachineSpec {
    StateMachineSpec::new("Char", "out", states, default_index).unwrap()
}

/// Temporary output directory that is removed on drop
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the (possibly not yet created) output directory `name`
    pub fn out_dir(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn read(&self, relative: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.dir.path().join(relative)).unwrap()
    }

    pub fn write(&self, relative: impl AsRef<Path>, contents: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    /// Sorted file names directly inside `relative`
    pub fn file_names(&self, relative: impl AsRef<Path>) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path().join(relative))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
