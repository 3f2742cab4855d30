//! `requestAnimationFrame` driver
//!
//! Browser side of [`crate::core::frame_loop`]: a [`FrameScheduler`] backed
//! by `window.requestAnimationFrame` and a [`FrameDriver`] that owns the JS
//! callback together with the loop state.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::core::frame_loop::{FrameHandle, FrameLoop, FrameScheduler};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Schedules the shared frame callback on the window
pub struct AnimationFrameScheduler {
    callback: FrameCallback,
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let window = web_sys::window()?;
        let callback = self.callback.borrow();
        let callback = callback.as_ref()?;
        window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()
            .map(FrameHandle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(handle.0);
        }
    }
}

/// Calls `on_frame(timestamp_ms)` once per display frame while running.
///
/// Dropping the driver cancels the pending frame and releases the callback.
pub struct FrameDriver {
    frame_loop: Rc<RefCell<FrameLoop<AnimationFrameScheduler>>>,
    callback: FrameCallback,
}

impl FrameDriver {
    pub fn new(mut on_frame: impl FnMut(f64) + 'static) -> Self {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let frame_loop = Rc::new(RefCell::new(FrameLoop::new(AnimationFrameScheduler {
            callback: callback.clone(),
        })));

        let loop_for_frame = frame_loop.clone();
        let closure = Closure::new(move |timestamp: f64| {
            // Release the loop before running the frame body
            let proceed = loop_for_frame.borrow_mut().on_frame();
            if proceed {
                on_frame(timestamp);
            }
        });
        *callback.borrow_mut() = Some(closure);

        Self {
            frame_loop,
            callback,
        }
    }

    pub fn start(&self) {
        self.frame_loop.borrow_mut().start();
    }

    pub fn stop(&self) {
        self.frame_loop.borrow_mut().stop();
    }

    pub fn restart(&self) {
        self.frame_loop.borrow_mut().restart();
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.borrow().is_running()
    }
}

impl Drop for FrameDriver {
    fn drop(&mut self) {
        self.stop();
        // The closure holds the loop, which holds the callback slot
        self.callback.borrow_mut().take();
    }
}
