//! Domain types and ports for the portfolio backend.
//!
//! Types here are transport agnostic: inbound adapters map them onto HTTP
//! payloads and status codes, outbound adapters persist them. Invariants and
//! serialisation contracts are documented on each type.

pub mod comment;
pub mod error;
pub mod ports;
pub mod user;

pub use self::comment::{Comment, CommentText, CommentTextError, CommentView};
pub use self::error::{Error, ErrorCode};
pub use self::user::{
    DisplayName, DisplayNameError, LoginCredentials, LoginValidationError, UserId, UserProfile,
};
