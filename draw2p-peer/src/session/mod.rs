mod session;
mod session_command;
mod session_config;
mod session_loop;
mod session_observer;

pub use session::*;
pub use session_config::*;
pub use session_observer::*;
