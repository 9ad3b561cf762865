//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! the domain ports and remain testable without real storage.

use std::sync::Arc;

use crate::domain::ports::{CommentRepository, ProfileRepository};
use crate::outbound::{InMemoryComments, InMemoryProfiles};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Guestbook comment store.
    pub comments: Arc<dyn CommentRepository>,
    /// User profile store.
    pub profiles: Arc<dyn ProfileRepository>,
}

impl HttpState {
    /// Wire the process-local in-memory adapters.
    pub fn in_memory() -> Self {
        Self {
            comments: Arc::new(InMemoryComments::new()),
            profiles: Arc::new(InMemoryProfiles::new()),
        }
    }
}
