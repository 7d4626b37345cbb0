//! Login state for the document workspace.
//!
//! - [`SessionStore`] persists a single "logged in" flag through an injected
//!   [`KeyValueStore`].
//! - [`CredentialValidator`] flips the flag on a matching username/password.
//! - [`SessionGate`] decides whether a protected view may render.

pub mod credentials;
pub mod gate;
pub mod store;

pub use credentials::{CredentialValidator, LoginOutcome, INVALID_CREDENTIALS, SESSION_UNAVAILABLE};
pub use gate::{GateDecision, SessionGate, LOGIN_ROUTE};
pub use store::{
    KeyValueStore, MemoryKeyValueStore, SessionStore, TauriKeyValueStore, SESSION_KEY,
};
