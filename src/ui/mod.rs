#[cfg(not(feature = "ssr"))]
pub mod animation_frame;
pub mod countdown_timer;
pub mod cursor_effect;
pub mod icon;
pub mod pages;
pub mod particle_canvas;
pub mod waitlist_form;

pub use countdown_timer::CountdownTimer;
pub use cursor_effect::CursorEffect;
pub use icon::{Icon, icons};
pub use particle_canvas::ParticleCanvas;
pub use waitlist_form::WaitlistForm;
