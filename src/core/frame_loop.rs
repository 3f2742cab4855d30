//! Owned frame-loop lifecycle
//!
//! The particle canvas is driven by display-frame callbacks. Instead of
//! leaving the callback registered for the lifetime of the page, the loop is
//! an owned value: it remembers the one pending registration, re-arms it
//! after each frame and cancels it on `stop` or drop. The actual host (the
//! browser's `requestAnimationFrame`, or a counting fake in tests) sits
//! behind [`FrameScheduler`].

/// Opaque id of one registered frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Something that can register and cancel a single next-frame callback
pub trait FrameScheduler {
    /// Register the frame callback for the next display frame
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Cancel a previously registered callback
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A start/stop frame loop holding at most one pending registration
#[derive(Debug)]
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameHandle>,
    running: bool,
    frames: u64,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            running: false,
            frames: 0,
        }
    }

    /// Start the loop. Starting a running loop is a no-op.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.pending = self.scheduler.request_frame();
    }

    /// Stop the loop and cancel the pending frame, if any
    pub fn stop(&mut self) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    /// Stop and start again, e.g. after the viewport was resized
    pub fn restart(&mut self) {
        self.stop();
        self.start();
    }

    /// Called from the frame callback.
    ///
    /// The registration that fired is consumed; a running loop registers the
    /// next frame. Returns whether the caller should update and draw.
    pub fn on_frame(&mut self) -> bool {
        self.pending = None;
        if !self.running {
            return false;
        }
        self.frames += 1;
        self.pending = self.scheduler.request_frame();
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Number of frames delivered since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}


#[cfg(test)]
mod tests {
    use super::testing::CountingScheduler;
    use super::*;

    fn run_frame(frame_loop: &mut FrameLoop<CountingScheduler>) -> bool {
        if let Some(handle) = frame_loop.pending() {
            frame_loop.scheduler().fire(handle);
        }
        frame_loop.on_frame()
    }

    #[test]
    fn test_start_registers_one_frame() {
        let scheduler = CountingScheduler::default();
        let mut frame_loop = FrameLoop::new(scheduler.clone());

        frame_loop.start();
        assert!(frame_loop.is_running());
        assert_eq!(scheduler.active(), 1);

        // Starting twice must not register a second callback
        frame_loop.start();
        assert_eq!(scheduler.active(), 1);
        assert_eq!(scheduler.requested(), 1);
    }

    #[test]
    fn test_frames_rearm_single_registration() {
        let scheduler = CountingScheduler::default();
        let mut frame_loop = FrameLoop::new(scheduler.clone());
        frame_loop.start();

        for _ in 0..10 {
            assert!(run_frame(&mut frame_loop));
            assert_eq!(scheduler.active(), 1);
        }
        assert_eq!(frame_loop.frames(), 10);
    }

    #[test]
    fn test_stop_cancels_pending() {
        let scheduler = CountingScheduler::default();
        let mut frame_loop = FrameLoop::new(scheduler.clone());
        frame_loop.start();
        frame_loop.stop();

        assert!(!frame_loop.is_running());
        assert_eq!(scheduler.active(), 0);
        assert_eq!(scheduler.cancelled(), 1);
    }

    #[test]
    fn test_frame_after_stop_does_not_rearm() {
        let scheduler = CountingScheduler::default();
        let mut frame_loop = FrameLoop::new(scheduler.clone());
        frame_loop.start();
        frame_loop.stop();

        // A callback already queued by the host still arrives once
        assert!(!frame_loop.on_frame());
        assert_eq!(scheduler.active(), 0);
    }

    #[test]
    fn test_restart_keeps_one_registration() {
        let scheduler = CountingScheduler::default();
        let mut frame_loop = FrameLoop::new(scheduler.clone());
        frame_loop.start();

        for _ in 0..5 {
            frame_loop.restart();
            assert_eq!(scheduler.active(), 1);
        }
        assert_eq!(scheduler.cancelled(), 5);
    }

    #[test]
    fn test_drop_cancels_pending() {
        let scheduler = CountingScheduler::default();
        {
            let mut frame_loop = FrameLoop::new(scheduler.clone());
            frame_loop.start();
            assert_eq!(scheduler.active(), 1);
        }
        assert_eq!(scheduler.active(), 0);
    }
}
