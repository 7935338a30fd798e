pub mod assignments;
pub mod auth;
pub mod common;
pub mod groups;
pub mod submissions;
pub mod system;
pub mod users;

pub use common::{AppStartTime, MessageResponse, RowScope};
