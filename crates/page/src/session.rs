//! Session resolution with a page-lifetime cache.
//!
//! The resolver asks the backend who is logged in at most once: the first
//! lookup triggers the request, concurrent first lookups share that one
//! in-flight request, and every later lookup answers from the cache. A
//! transport failure leaves the cache unresolved so a later lookup may retry;
//! it is never recorded as "not logged in".

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::gateway::{GatewayError, PortfolioGateway, UserProfile};

/// Resolves and caches the current visitor for the lifetime of one page.
pub struct SessionResolver {
    gateway: Arc<dyn PortfolioGateway>,
    // Unset = unresolved; Some(None) inside = resolved as "not logged in".
    cached: OnceCell<Option<UserProfile>>,
}

impl SessionResolver {
    /// Create an unresolved resolver.
    pub fn new(gateway: Arc<dyn PortfolioGateway>) -> Self {
        Self {
            gateway,
            cached: OnceCell::new(),
        }
    }

    /// The current visitor, fetching on first use.
    ///
    /// Concurrent first calls coalesce into a single backend request; once a
    /// value is cached no further requests are made.
    pub async fn current_user(&self) -> Result<Option<&UserProfile>, GatewayError> {
        let resolved = self
            .cached
            .get_or_try_init(|| self.gateway.fetch_current_user())
            .await?;
        Ok(resolved.as_ref())
    }

    /// Whether the current visitor is logged in.
    pub async fn is_logged_in(&self) -> Result<bool, GatewayError> {
        Ok(self.current_user().await?.is_some())
    }
}
