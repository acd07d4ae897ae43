//! BBCode generation and post-processing.
//!
//! [`render_article`] walks the parsed document tree and emits Steam guide
//! BBCode; [`post_process`] then rewrites the text (table-cell image
//! substitution, adjacent-list merging). The two stages are independent:
//! the post-processor accepts any BBCode string with the same tag
//! vocabulary, not just converter output.

mod post;
mod render;

pub use post::post_process;
pub use render::{MISSING_ARTICLE, render_article};
