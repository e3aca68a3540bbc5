mod error;
mod session;
mod transport;

pub use error::*;
pub use session::*;
pub use transport::*;
