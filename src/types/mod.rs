//! Response envelopes shared by every handler.

mod response;

pub use response::{ApiResponse, Created};
