pub mod chat;
pub mod document;
pub mod precedent;
pub mod refresh_token;
pub mod user;
