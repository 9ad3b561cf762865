//! One full page load.
//!
//! A load runs the independent page tasks: pick and write the text and
//! project-link content, fetch and render comments, and reveal the class
//! group matching the login state. The tasks share no ordering; both network
//! fetches run concurrently, and a failure in one task never stops the
//! others.

use std::sync::Arc;

use chrono::FixedOffset;
use rand::Rng;
use thiserror::Error;
use tracing::warn;

use crate::comments::{RenderError, render_comments};
use crate::content::{GREETINGS, PROJECT_LINKS, QUOTES, SelectionError, choose};
use crate::gateway::{GatewayError, PortfolioGateway};
use crate::session::SessionResolver;
use crate::surface::{PageSurface, ids};

/// Which table fills the text container for this load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextChoice {
    /// Show a random greeting.
    #[default]
    Greeting,
    /// Show a random quote.
    Quote,
}

/// Failure of one independent page-load task.
#[derive(Debug, Error)]
pub enum PageLoadError {
    /// A content table was empty.
    #[error(transparent)]
    Selection(#[from] SelectionError),
    /// The backend could not be reached or answered unusably.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// A fetched comment could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Per-task outcomes of one page load.
#[derive(Debug)]
pub struct PageLoadReport {
    /// Text-container write.
    pub text: Result<(), PageLoadError>,
    /// Link-container write.
    pub project: Result<(), PageLoadError>,
    /// Number of comment blocks appended.
    pub comments_rendered: Result<usize, PageLoadError>,
    /// Login state driving the visibility toggle.
    pub logged_in: Result<bool, PageLoadError>,
}

impl PageLoadReport {
    /// Whether every task completed.
    pub fn is_fully_loaded(&self) -> bool {
        self.text.is_ok()
            && self.project.is_ok()
            && self.comments_rendered.is_ok()
            && self.logged_in.is_ok()
    }
}

/// Orchestrates one page load against a gateway.
pub struct PageLoad {
    gateway: Arc<dyn PortfolioGateway>,
    resolver: SessionResolver,
    offset: FixedOffset,
    text_choice: TextChoice,
}

impl PageLoad {
    /// Build a load rendering timestamps in the given UTC offset.
    pub fn new(gateway: Arc<dyn PortfolioGateway>, offset: FixedOffset) -> Self {
        let resolver = SessionResolver::new(Arc::clone(&gateway));
        Self {
            gateway,
            resolver,
            offset,
            text_choice: TextChoice::default(),
        }
    }

    /// Fill the text container from the quote table instead of greetings.
    pub fn with_text_choice(mut self, choice: TextChoice) -> Self {
        self.text_choice = choice;
        self
    }

    /// The session resolver backing this load.
    pub fn resolver(&self) -> &SessionResolver {
        &self.resolver
    }

    /// Run every page task and report per-task outcomes.
    pub async fn run<S, R>(&self, surface: &mut S, rng: &mut R) -> PageLoadReport
    where
        S: PageSurface,
        R: Rng,
    {
        let text = self.write_text(surface, rng);
        let project = Self::write_project(surface, rng);

        // Both round trips run concurrently; writes land afterwards.
        let (comments, user) = tokio::join!(
            self.gateway.fetch_comments(),
            self.resolver.current_user(),
        );

        let comments_rendered = match comments {
            Ok(comments) => render_comments(&comments, surface, self.offset)
                .map_err(PageLoadError::from),
            Err(error) => {
                warn!(%error, "comment load failed");
                Err(error.into())
            }
        };

        let logged_in = match user {
            Ok(user) => {
                let logged_in = user.is_some();
                if logged_in {
                    surface.reveal(ids::SHOW_LOGGED_IN);
                } else {
                    surface.reveal(ids::SHOW_LOGGED_OUT);
                }
                Ok(logged_in)
            }
            Err(error) => {
                // Leave both groups hidden rather than guess the login state.
                warn!(%error, "session resolution failed");
                Err(error.into())
            }
        };

        PageLoadReport {
            text,
            project,
            comments_rendered,
            logged_in,
        }
    }

    fn write_text<S: PageSurface, R: Rng>(
        &self,
        surface: &mut S,
        rng: &mut R,
    ) -> Result<(), PageLoadError> {
        let table = match self.text_choice {
            TextChoice::Greeting => GREETINGS,
            TextChoice::Quote => QUOTES,
        };
        let text = choose(table, rng)?;
        surface.set_text(ids::TEXT_CONTAINER, text);
        Ok(())
    }

    fn write_project<S: PageSurface, R: Rng>(
        surface: &mut S,
        rng: &mut R,
    ) -> Result<(), PageLoadError> {
        let link = choose(PROJECT_LINKS, rng)?;
        surface.set_link(ids::LINK_CONTAINER, link.description, link.url);
        Ok(())
    }
}
