//! Page runtime for the portfolio site.
//!
//! Reimplements the behaviour of the site's page script as a library: random
//! content selection, single-flight session resolution, comment loading and
//! rendering, and login-dependent visibility, all writing into an abstract
//! [`surface::PageSurface`]. Network access goes through
//! [`gateway::PortfolioGateway`], whose HTTP implementation talks to the
//! backend's `/data` and `/userInfo` endpoints.

pub mod comments;
pub mod content;
pub mod gateway;
pub mod load;
pub mod session;
pub mod surface;

pub use comments::{Comment, RenderError};
pub use content::{GREETINGS, PROJECT_LINKS, ProjectLink, QUOTES, SelectionError, choose};
pub use gateway::{GatewayError, HttpGateway, PortfolioGateway, UserProfile};
pub use load::{PageLoad, PageLoadError, PageLoadReport, TextChoice};
pub use session::SessionResolver;
pub use surface::{CommentBlock, PageModel, PageSurface};
