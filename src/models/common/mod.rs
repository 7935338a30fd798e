pub mod response;
pub mod scope;

pub use response::{AppStartTime, MessageResponse};
pub use scope::RowScope;
