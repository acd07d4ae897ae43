//! HTML parsing into an arena document tree.
//!
//! html5ever parses into [`Dom`], an arena of nodes addressed by [`NodeId`].
//! [`classify`] maps elements onto the closed [`Tag`] set the converter
//! dispatches on.

mod arena;
mod tag;
mod tree_sink;

pub use arena::{Attribute, Children, Descendants, Dom, Node, NodeData, NodeId};
pub use tag::{Tag, classify};

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use tree_sink::DomSink;

/// Parse an HTML document into a [`Dom`].
///
/// Parsing is lenient: malformed markup is recovered the way browsers
/// recover it, and parse errors are ignored.
pub fn parse_html(html: &str) -> Dom {
    let sink = DomSink::new();
    let result = parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes());
    result.into_dom()
}
