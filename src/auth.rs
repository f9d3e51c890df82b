//! Credential pair, access-token model, and the shared single-flight token store.

pub mod credential;
pub mod secret;
pub mod store;
pub mod token;

pub use credential::*;
pub use secret::*;
pub use store::*;
pub use token::*;
