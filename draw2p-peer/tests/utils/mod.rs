pub mod recording_observer;
pub mod signal_helpers;

pub use recording_observer::*;
pub use scripted_link::*;
pub use signal_helpers::*;
