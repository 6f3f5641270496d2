#[allow(clippy::module_inception)]
pub mod api;
pub mod botcommand;
pub mod chat;
pub mod message;
pub mod update;
pub mod user;

pub use api::*;
pub use botcommand::*;
pub use chat::*;
pub use message::*;
pub use update::*;
pub use user::*;
