//! Target-independent logic for the launch site: countdown, particle field,
//! cursor spring, frame loop lifecycle and waitlist rules

#[cfg(feature = "ssr")]
pub mod config;
pub mod countdown;
pub mod frame_loop;
pub mod particles;
pub mod spring;
pub mod waitlist;

pub use countdown::{Countdown, CountdownSample, CountdownStatus, CountdownUnit, TimeRemaining};
pub use frame_loop::{FrameHandle, FrameLoop, FrameScheduler};
pub use particles::{FieldConfig, FieldPreset, ParticleField};
pub use spring::{Spring2, SpringParams};
pub use waitlist::{FormState, FormStatus, JoinRequest, JoinResponse, WaitlistError, WaitlistStats};
