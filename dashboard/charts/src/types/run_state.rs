use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of the load test as reported by the stats endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    #[display("ready")]
    Ready,
    #[display("spawning")]
    Spawning,
    #[display("running")]
    Running,
    #[display("stopping")]
    Stopping,
    #[display("stopped")]
    Stopped,
    #[display("cleanup")]
    Cleanup,
    #[display("missing")]
    Missing,
    #[display("unknown")]
    #[serde(other)]
    Unknown,
}

impl RunState {
    /// Whether stats should be polled and appended while in this state.
    pub fn is_active(&self) -> bool {
        matches!(self, RunState::Spawning | RunState::Running)
    }

    /// A new run starts only on a direct `stopped` → `running` change.
    pub fn starts_new_run(previous: RunState, current: RunState) -> bool {
        previous == RunState::Stopped && current == RunState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_spawning_and_running_should_be_active() {
        assert!(RunState::Spawning.is_active());
        assert!(RunState::Running.is_active());
        assert!(!RunState::Stopped.is_active());
        assert!(!RunState::Ready.is_active());
        assert!(!RunState::Unknown.is_active());
    }

    #[test]
    fn only_stopped_to_running_should_start_new_run() {
        assert!(RunState::starts_new_run(RunState::Stopped, RunState::Running));
        assert!(!RunState::starts_new_run(RunState::Stopped, RunState::Spawning));
        assert!(!RunState::starts_new_run(RunState::Spawning, RunState::Running));
        assert!(!RunState::starts_new_run(RunState::Running, RunState::Running));
    }

    #[test]
    fn unknown_state_names_should_deserialize_as_unknown() {
        let state: RunState = serde_json::from_str("\"running\"").unwrap();
        assert_eq!(state, RunState::Running);
        let state: RunState = serde_json::from_str("\"rebalancing\"").unwrap();
        assert_eq!(state, RunState::Unknown);
    }
}
