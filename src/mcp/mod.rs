pub mod contracts;
pub mod errors;
pub mod router;

pub use router::{ToolContext, ToolRouter};
