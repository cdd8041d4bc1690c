pub mod fanout;
pub mod transport;

pub use fanout::{DispatchOutcome, send_push_notification};
