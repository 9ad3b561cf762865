//! The rendering surface the page runtime writes into.
//!
//! Region identifiers and class names mirror the page markup, which owns the
//! elements; the runtime only fills them in. Both login-dependent class
//! groups start hidden so the wrong group is never shown before the session
//! resolves.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

/// Region and class identifiers supplied by the page markup.
pub mod ids {
    /// Region receiving the greeting or quote.
    pub const TEXT_CONTAINER: &str = "text-container";
    /// Region receiving the project link.
    pub const LINK_CONTAINER: &str = "link-container";
    /// Region receiving rendered comments.
    pub const COMMENTS: &str = "comments";
    /// Class group revealed for logged-in visitors.
    pub const SHOW_LOGGED_IN: &str = "show-logged-in";
    /// Class group revealed for logged-out visitors.
    pub const SHOW_LOGGED_OUT: &str = "show-logged-out";
    /// Class styling comment metadata lines.
    pub const SMALL_TEXT: &str = "small-text";
}

/// One rendered comment: body plus its metadata line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    /// Comment body text.
    pub body: String,
    /// Formatted `Author: M/D/YYYY H:MM` line, styled via
    /// [`ids::SMALL_TEXT`].
    pub metadata: String,
}

/// Where the page runtime writes.
///
/// Writes are last-wins for text and link regions and append-only for
/// comment blocks; revealing a class group is idempotent.
pub trait PageSurface {
    /// Replace a region's text.
    fn set_text(&mut self, region: &str, text: &str);

    /// Replace a region's link text and target.
    fn set_link(&mut self, region: &str, text: &str, href: &str);

    /// Append one comment block to a region.
    fn append_comment(&mut self, region: &str, block: CommentBlock);

    /// Make every element bearing `class` visible.
    fn reveal(&mut self, class: &str);
}

/// Region content held by [`PageModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum RegionContent {
    Text(String),
    Link { text: String, href: String },
}

/// In-memory page surface.
///
/// Stands in for the real page during tests and powers the CLI snapshot; it
/// records exactly what a browser page would show.
#[derive(Debug, Default)]
pub struct PageModel {
    regions: BTreeMap<String, RegionContent>,
    comments: BTreeMap<String, Vec<CommentBlock>>,
    revealed: BTreeSet<String>,
}

impl PageModel {
    /// Create an empty surface with every class group hidden.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of a region, if set. Links render as `text -> href`.
    pub fn region_text(&self, region: &str) -> Option<String> {
        self.regions.get(region).map(|content| match content {
            RegionContent::Text(text) => text.clone(),
            RegionContent::Link { text, href } => format!("{text} -> {href}"),
        })
    }

    /// Comment blocks appended to a region, in append order.
    pub fn comment_blocks(&self, region: &str) -> &[CommentBlock] {
        self.comments
            .get(region)
            .map_or(&[], |blocks| blocks.as_slice())
    }

    /// Whether a class group has been revealed.
    pub fn is_revealed(&self, class: &str) -> bool {
        self.revealed.contains(class)
    }

    /// Plain-text snapshot of the whole surface.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (region, content) in &self.regions {
            match content {
                RegionContent::Text(text) => {
                    let _ = writeln!(out, "[{region}] {text}");
                }
                RegionContent::Link { text, href } => {
                    let _ = writeln!(out, "[{region}] {text} -> {href}");
                }
            }
        }
        for (region, blocks) in &self.comments {
            let _ = writeln!(out, "[{region}]");
            for block in blocks {
                let _ = writeln!(out, "  {}", block.body);
                let _ = writeln!(out, "  {}", block.metadata);
                let _ = writeln!(out, "  ---");
            }
        }
        if self.revealed.is_empty() {
            let _ = writeln!(out, "visible: (none)");
        } else {
            let classes: Vec<&str> = self.revealed.iter().map(String::as_str).collect();
            let _ = writeln!(out, "visible: {}", classes.join(", "));
        }
        out
    }
}

impl PageSurface for PageModel {
    fn set_text(&mut self, region: &str, text: &str) {
        self.regions
            .insert(region.to_owned(), RegionContent::Text(text.to_owned()));
    }

    fn set_link(&mut self, region: &str, text: &str, href: &str) {
        self.regions.insert(
            region.to_owned(),
            RegionContent::Link {
                text: text.to_owned(),
                href: href.to_owned(),
            },
        );
    }

    fn append_comment(&mut self, region: &str, block: CommentBlock) {
        self.comments.entry(region.to_owned()).or_default().push(block);
    }

    fn reveal(&mut self, class: &str) {
        self.revealed.insert(class.to_owned());
    }
}
