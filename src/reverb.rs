//! Environment reverb state: one current snapshot index, timed transitions.

use crate::events::SoundStageEvent;
use crossbeam_channel::Sender;

/// Host-supplied reverb snapshot device: a fixed list of named environment
/// presets that can be blended to over a duration.
pub trait ReverbDevice {
    /// Number of snapshots the device exposes.
    fn snapshot_count(&self) -> usize;
    /// Begins blending to `snapshot` over `secs`. Overlapping transitions
    /// are the device's business; the controller never queues.
    fn transition_to(&mut self, snapshot: usize, secs: f32);
}

/// Tracks the current environment snapshot and issues transitions,
/// ignoring no-op requests.
pub struct ReverbController {
    device: Box<dyn ReverbDevice>,
    current: usize,
    transition_secs: f32,
    events: Sender<SoundStageEvent>,
}

impl ReverbController {
    /// Starts at snapshot 0 without issuing a transition; the device is
    /// assumed to begin there.
    pub fn new(
        device: Box<dyn ReverbDevice>,
        transition_secs: f32,
        events: Sender<SoundStageEvent>,
    ) -> Self {
        Self {
            device,
            current: 0,
            transition_secs,
            events,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Transitions to the snapshot at `index` unless it is already current.
    /// An out-of-range index is a logged no-op.
    pub fn set_state(&mut self, index: usize) {
        if index == self.current {
            return;
        }
        if index >= self.device.snapshot_count() {
            log::warn!(
                "reverb snapshot {index} is not valid ({} snapshots)",
                self.device.snapshot_count()
            );
            return;
        }

        log::debug!("transitioning to reverb snapshot {index}");
        let from = self.current;
        self.current = index;
        self.device.transition_to(index, self.transition_secs);
        let _ = self
            .events
            .send(SoundStageEvent::ReverbTransition { from, to: index });
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MockReverbDevice;
    use super::*;
    use crossbeam_channel::unbounded;

    fn controller(snapshots: usize) -> (ReverbController, std::rc::Rc<std::cell::RefCell<Vec<(usize, f32)>>>) {
        let (device, transitions) = MockReverbDevice::new(snapshots);
        // The controller ignores send failures, so the receiver can drop.
        let (sender, _receiver) = unbounded();
        (
            ReverbController::new(Box::new(device), 3.0, sender),
            transitions,
        )
    }

    #[test]
    fn test_repeated_request_issues_one_transition() {
        let (mut reverb, transitions) = controller(5);
        reverb.set_state(3);
        reverb.set_state(3);

        assert_eq!(transitions.borrow().as_slice(), &[(3, 3.0)]);
        assert_eq!(reverb.current(), 3);
    }

    #[test]
    fn test_initial_state_issues_nothing() {
        let (mut reverb, transitions) = controller(5);
        // Snapshot 0 is already current from construction.
        reverb.set_state(0);
        assert!(transitions.borrow().is_empty());
    }

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let (mut reverb, transitions) = controller(2);
        reverb.set_state(7);

        assert!(transitions.borrow().is_empty());
        assert_eq!(reverb.current(), 0);
    }

    #[test]
    fn test_transitions_between_states() {
        let (mut reverb, transitions) = controller(4);
        reverb.set_state(2);
        reverb.set_state(1);
        reverb.set_state(2);

        assert_eq!(
            transitions.borrow().as_slice(),
            &[(2, 3.0), (1, 3.0), (2, 3.0)]
        );
    }
}
