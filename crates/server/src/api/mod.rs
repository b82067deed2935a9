#[cfg(feature = "server")]
pub(crate) mod auth;

mod account;
pub use account::*;

mod chat;
pub use chat::*;

mod document;
pub use document::*;

mod precedent;
pub use precedent::*;
