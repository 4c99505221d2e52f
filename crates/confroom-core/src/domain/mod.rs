pub mod access;
pub mod chat;
pub mod identity;
pub mod media;
pub mod session;
