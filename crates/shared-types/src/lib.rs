pub mod error;
pub mod feature_flags;
pub mod locale;
pub mod models;
pub mod page;

// Feature panel domain types
pub mod chat;
pub mod document;
pub mod precedent;

pub use error::*;
pub use feature_flags::*;
pub use locale::*;
pub use models::*;
pub use page::*;

pub use chat::*;
pub use document::*;
pub use precedent::*;
