//! # steamguide
//!
//! Converts Notion-exported HTML articles into the BBCode dialect used by
//! Steam community guides.
//!
//! Pipeline: raw HTML is parsed into an arena document tree, the converter
//! walks the `<article>` subtree and emits BBCode, and two post-processing
//! passes rewrite the result (image substitution in table cells, merging of
//! adjacent list blocks). Embedded images are resolved against an
//! [`ImageMap`] built from the upload manifest CSV; unmapped images degrade
//! to raw `[img]` embeds rather than failing the conversion.
//!
//! ## Quick Start
//!
//! ```
//! use steamguide::{ImageMap, convert};
//!
//! let mut images = ImageMap::new();
//! images.insert("cat.png", "123");
//!
//! let html = "<article><h1>Guide</h1><p>Hello</p></article>";
//! assert_eq!(convert(html, &images), "[h1]Guide[/h1]\nHello");
//! ```

pub mod bbcode;
pub mod dom;
pub mod error;
pub mod images;
pub(crate) mod util;

pub use bbcode::{MISSING_ARTICLE, post_process, render_article};
pub use dom::{Dom, parse_html};
pub use error::{Error, Result};
pub use images::ImageMap;

/// Convert one HTML document to Steam guide BBCode.
///
/// Never fails: a document without an `<article>` element yields the
/// [`MISSING_ARTICLE`] placeholder, and unresolved images fall back to raw
/// embeds.
pub fn convert(html: &str, images: &ImageMap) -> String {
    let dom = dom::parse_html(html);
    let bbcode = bbcode::render_article(&dom, images);
    bbcode::post_process(&bbcode, images)
}

/// Convert one HTML document given as raw bytes.
///
/// Decodes the bytes first (UTF-8 with a Windows-1252 fallback), then
/// behaves like [`convert`].
pub fn convert_bytes(html: &[u8], images: &ImageMap) -> String {
    convert(&util::decode_text(html), images)
}
