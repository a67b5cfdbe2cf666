use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Shared {
    tracking: AtomicBool,
    has_pointer: AtomicBool,
    /// `f32` bits of the latest pointer x.
    pointer_x: AtomicU32,
}

/// Thread-safe handle for pointer-driven rotation.
///
/// An input thread posts pointer positions; the render thread reads the latest
/// one during `TransformState::update`. Intermediate positions are dropped.
#[derive(Debug, Clone, Default)]
pub struct TrackingHandle {
    shared: Arc<Shared>,
}

impl TrackingHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters tracking mode. The model keeps its current rotation until the
    /// first pointer position arrives.
    pub fn start(&self) {
        self.shared.has_pointer.store(false, Ordering::Relaxed);
        self.shared.tracking.store(true, Ordering::Release);
    }

    pub fn stop(&self) {
        self.shared.tracking.store(false, Ordering::Release);
    }

    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.shared.tracking.load(Ordering::Acquire)
    }

    /// Records a pointer x position in pixels. Ignored when not tracking.
    pub fn post(&self, pointer_x: f32) {
        if !self.is_tracking() {
            return;
        }
        self.shared
            .pointer_x
            .store(pointer_x.to_bits(), Ordering::Relaxed);
        self.shared.has_pointer.store(true, Ordering::Release);
    }

    /// Latest posted position, if any since tracking started.
    pub fn latest(&self) -> Option<f32> {
        if !self.shared.has_pointer.load(Ordering::Acquire) {
            return None;
        }
        Some(f32::from_bits(self.shared.pointer_x.load(Ordering::Relaxed)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn posts_are_ignored_while_idle() {
        let handle = TrackingHandle::new();
        handle.post(10.0);
        assert_eq!(handle.latest(), None);
    }

    #[test]
    fn latest_post_wins() {
        let handle = TrackingHandle::new();
        handle.start();
        handle.post(10.0);
        handle.post(42.5);
        assert_eq!(handle.latest(), Some(42.5));
    }

    #[test]
    fn restart_forgets_previous_pointer() {
        let handle = TrackingHandle::new();
        handle.start();
        handle.post(10.0);
        handle.stop();
        handle.start();
        assert_eq!(handle.latest(), None);
    }

    #[test]
    fn posts_from_another_thread_are_visible() {
        let handle = TrackingHandle::new();
        handle.start();

        let remote = handle.clone();
        thread::spawn(move || {
            for x in 0..100 {
                remote.post(x as f32);
            }
        })
        .join()
        .unwrap();

        assert_eq!(handle.latest(), Some(99.0));
    }
}
