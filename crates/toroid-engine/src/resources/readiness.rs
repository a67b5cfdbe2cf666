use std::sync::atomic::{AtomicU8, Ordering};

/// Independent steps of device-resource creation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResourceTask {
    VertexShader,
    SceneFragment,
    ScreenFragment,
    /// Meshes, uniform buffer, render targets, bind groups and pipelines.
    Buffers,
}

impl ResourceTask {
    pub const ALL: [ResourceTask; 4] = [
        ResourceTask::VertexShader,
        ResourceTask::SceneFragment,
        ResourceTask::ScreenFragment,
        ResourceTask::Buffers,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

const ALL_DONE: u8 = 0b1111;
const FAILED: u8 = 0b1000_0000;

/// Single flag gating rendering on resource creation.
///
/// Becomes ready exactly once, after every `ResourceTask` has completed. A
/// failure before that point poisons the gate; it never becomes ready. A
/// fresh gate is created for each creation attempt.
#[derive(Debug, Default)]
pub struct ReadinessGate {
    state: AtomicU8,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `task` done. Returns `true` only for the call that made the gate
    /// ready.
    pub fn complete(&self, task: ResourceTask) -> bool {
        let prev = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |s| {
                (s & FAILED == 0).then_some(s | task.bit())
            });

        match prev {
            Ok(prev) => {
                let flipped = prev != ALL_DONE && prev | task.bit() == ALL_DONE;
                if flipped {
                    log::info!("device resources ready");
                }
                flipped
            }
            Err(_) => false,
        }
    }

    /// Poisons the gate unless it is already ready.
    pub fn fail(&self, task: ResourceTask) {
        let result = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |s| {
                (s != ALL_DONE).then_some(s | FAILED)
            });
        if result.is_ok() {
            log::warn!("resource task {task:?} failed; renderer stays not ready");
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state.load(Ordering::Acquire) == ALL_DONE
    }

    #[inline]
    pub fn has_failed(&self) -> bool {
        self.state.load(Ordering::Acquire) & FAILED != 0
    }

    /// Tasks not yet completed.
    pub fn pending(&self) -> Vec<ResourceTask> {
        let s = self.state.load(Ordering::Acquire);
        ResourceTask::ALL
            .into_iter()
            .filter(|t| s & t.bit() == 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn ready_only_after_all_tasks() {
        let gate = ReadinessGate::new();
        assert!(!gate.complete(ResourceTask::VertexShader));
        assert!(!gate.complete(ResourceTask::SceneFragment));
        assert!(!gate.complete(ResourceTask::Buffers));
        assert!(!gate.is_ready());
        assert_eq!(gate.pending(), vec![ResourceTask::ScreenFragment]);

        assert!(gate.complete(ResourceTask::ScreenFragment));
        assert!(gate.is_ready());
    }

    #[test]
    fn flips_exactly_once() {
        let gate = ReadinessGate::new();
        let flips: usize = ResourceTask::ALL
            .into_iter()
            .chain(ResourceTask::ALL)
            .filter(|t| gate.complete(*t))
            .count();
        assert_eq!(flips, 1);
        assert!(gate.is_ready());
    }

    #[test]
    fn failure_blocks_readiness() {
        let gate = ReadinessGate::new();
        gate.complete(ResourceTask::VertexShader);
        gate.fail(ResourceTask::SceneFragment);
        for t in ResourceTask::ALL {
            assert!(!gate.complete(t));
        }
        assert!(!gate.is_ready());
        assert!(gate.has_failed());
    }

    #[test]
    fn failure_after_ready_is_ignored() {
        let gate = ReadinessGate::new();
        for t in ResourceTask::ALL {
            gate.complete(t);
        }
        gate.fail(ResourceTask::Buffers);
        assert!(gate.is_ready());
        assert!(!gate.has_failed());
    }

    #[test]
    fn concurrent_completion_flips_once() {
        let gate = Arc::new(ReadinessGate::new());
        let handles: Vec<_> = ResourceTask::ALL
            .into_iter()
            .map(|t| {
                let gate = Arc::clone(&gate);
                thread::spawn(move || gate.complete(t))
            })
            .collect();

        let flips = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|flipped| *flipped)
            .count();
        assert_eq!(flips, 1);
        assert!(gate.is_ready());
    }
}
