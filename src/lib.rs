pub mod challenge;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod palette;
pub mod remote;
pub mod session;
pub mod state;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
