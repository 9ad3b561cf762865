//! Static page content and random selection.
//!
//! The greeting, quote, and project tables are the site's fixed editorial
//! content; a page load picks one entry from each table it displays.

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

/// A linked project with its one-line pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectLink {
    /// Display text for the link.
    pub description: &'static str,
    /// Link target.
    pub url: &'static str,
}

/// Greetings rotated through the text container.
pub const GREETINGS: &[&str] = &[
    "Hello world!",
    "¡Hola Mundo!",
    "你好，世界！",
    "Bonjour le monde!",
];

/// Quotes rotated through the text container.
pub const QUOTES: &[&str] = &[
    "A ship in port is safe, but that's not what ships are built for.",
    "I don't know where we're going, but we're making good time.",
    "Sometimes you never realize the value of a moment until it becomes a memory.",
    "And now that you don't have to be perfect, you can be good.",
    "Holding a grudge is like drinking poison and expecting the other person to die.",
];

/// Projects rotated through the link container.
pub const PROJECT_LINKS: &[ProjectLink] = &[
    ProjectLink {
        description: "A playable pong game! You can't win though",
        url: "https://astrobliss.github.io/pong/",
    },
    ProjectLink {
        description: "An experiment where optical illusions form from monitor refresh rate. Works on mobile too!",
        url: "https://astrobliss.github.io/fall/",
    },
    ProjectLink {
        description: "The repository of a rails project I was on",
        url: "https://github.com/theananthanarayan/unpaid_interns",
    },
    ProjectLink {
        description: "The repository of a react project I was on",
        url: "https://github.com/astrobliss/Cadabra",
    },
];

/// Rejected selection input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The input slice was empty; callers must pass at least one item.
    #[error("cannot choose from an empty list")]
    Empty,
}

/// Choose one element uniformly at random.
///
/// An empty slice is a programming error at the call site and is rejected
/// outright rather than silently skipped.
pub fn choose<'a, T, R>(items: &'a [T], rng: &mut R) -> Result<&'a T, SelectionError>
where
    R: Rng + ?Sized,
{
    items.choose(rng).ok_or(SelectionError::Empty)
}
