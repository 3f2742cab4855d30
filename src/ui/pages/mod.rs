//! Application pages module
//!
//! - Launch page, served with a different particle background per route
//! - Not found page

mod launch;
mod not_found;

pub use launch::LaunchPage;
pub use not_found::NotFoundPage;
