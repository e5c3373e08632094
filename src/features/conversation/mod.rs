//! # Conversation Feature
//!
//! Session-scoped, append-only message log seeded with a greeting, and the
//! store that keeps one isolated session per user.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod history;
pub mod message;
pub mod session;
pub mod store;

pub use history::{Conversation, ConversationState};
pub use message::{Message, Role};
pub use session::ChatSession;
pub use store::{SessionStore, SharedSession};
