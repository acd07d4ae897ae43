//! Document tree → BBCode rendering.
//!
//! Walks the subtree rooted at the document's `<article>` element in
//! depth-first pre-order. An element's children are rendered into an inner
//! string first, then wrapped according to the element's [`Tag`]; unknown
//! wrappers contribute their inner content unchanged.

use std::collections::HashSet;

use percent_encoding::percent_decode_str;

use crate::dom::{Dom, NodeData, NodeId, Tag, classify};
use crate::images::ImageMap;

/// Placeholder returned when a document has no `<article>` element.
///
/// This is a content result, not a failure: callers write it out like any
/// other conversion and move on to the next document.
pub const MISSING_ARTICLE: &str = "[Error] article content not found";

/// Render the document's article content as BBCode.
///
/// The article is the first `<article>` element in the document; Notion
/// exports wrap the page body in exactly one.
pub fn render_article(dom: &Dom, images: &ImageMap) -> String {
    let Some(article) = dom.find_by_tag("article") else {
        return MISSING_ARTICLE.to_string();
    };
    RenderContext::new(dom, images).render(article)
}

/// Per-document rendering state.
///
/// `skipped` holds size-directive paragraphs consumed by a preceding
/// figure; they render as nothing when traversal reaches them. Only strict
/// next-siblings of an already-rendered figure ever enter the set, and the
/// context is discarded after one document.
struct RenderContext<'a> {
    dom: &'a Dom,
    images: &'a ImageMap,
    skipped: HashSet<NodeId>,
}

impl<'a> RenderContext<'a> {
    fn new(dom: &'a Dom, images: &'a ImageMap) -> Self {
        Self {
            dom,
            images,
            skipped: HashSet::new(),
        }
    }

    /// Render the article subtree and assemble the final output: trimmed,
    /// non-empty lines joined by newlines. This drops the blank-line
    /// artifacts block wrappers leave behind without collapsing paragraph
    /// boundaries.
    fn render(mut self, article: NodeId) -> String {
        let dom = self.dom;
        let mut raw = String::new();
        for child in dom.children(article) {
            raw.push_str(&self.walk(child));
        }
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn walk(&mut self, id: NodeId) -> String {
        if self.skipped.contains(&id) {
            return String::new();
        }

        let Some(node) = self.dom.get(id) else {
            return String::new();
        };

        let (name, attrs) = match &node.data {
            NodeData::Text(text) => return text.clone(),
            NodeData::Element { name, attrs } => (&name.local, attrs.as_slice()),
            _ => return String::new(),
        };

        match classify(name, attrs) {
            Tag::Paragraph => format!("{}\n", self.inner(id).trim()),
            Tag::Heading(level) => {
                format!("[h{level}]{}[/h{level}]\n", self.inner(id).trim())
            }
            Tag::Bold => format!("[b]{}[/b]", self.inner(id)),
            Tag::Italic => format!("[i]{}[/i]", self.inner(id)),
            Tag::Underline => format!("[u]{}[/u]", self.inner(id)),
            Tag::Strike => format!("[strike]{}[/strike]", self.inner(id)),
            Tag::Spoiler => format!("[spoiler]{}[/spoiler]", self.inner(id)),
            Tag::BlockQuote => format!("[quote]{}[/quote]\n", self.inner(id)),
            Tag::Rule => "[hr]\n".to_string(),
            Tag::CodeBlock => format!("[code]{}[/code]\n", self.inner(id)),
            Tag::Link => self.render_link(id),
            Tag::UnorderedList => format!("[list]{}[/list]\n", self.render_items(id)),
            Tag::OrderedList => format!("[olist]{}[/olist]\n", self.render_items(id)),
            Tag::Table => self.render_table(id),
            Tag::Figure => self.render_figure(id),
            Tag::InlineCode
            | Tag::ListItem
            | Tag::TableRow
            | Tag::HeaderCell
            | Tag::DataCell
            | Tag::Image
            | Tag::Passthrough => self.inner(id),
        }
    }

    /// Render and concatenate all children, in order.
    fn inner(&mut self, id: NodeId) -> String {
        let dom = self.dom;
        let mut out = String::new();
        for child in dom.children(id) {
            out.push_str(&self.walk(child));
        }
        out
    }

    /// Links wrapping an image drop their `[url]` wrapper; the figure
    /// handling takes precedence.
    fn render_link(&mut self, id: NodeId) -> String {
        if self.find_descendant_tag(id, "img").is_some() {
            return self.inner(id);
        }
        let href = self.dom.attr(id, "href").unwrap_or("#").to_string();
        format!("[url={href}]{}[/url]", self.inner(id))
    }

    /// Each direct `li` child becomes a `[*]` item.
    fn render_items(&mut self, id: NodeId) -> String {
        let dom = self.dom;
        let mut out = String::new();
        for item in dom.children(id).filter(|&c| dom.is_element_named(c, "li")) {
            out.push_str("[*]");
            out.push_str(&self.walk(item));
        }
        out
    }

    /// Rows are the `tr` descendants of the table; cells are the `th`/`td`
    /// descendants of each row, wrapped per cell kind.
    fn render_table(&mut self, id: NodeId) -> String {
        let dom = self.dom;
        let mut rows = String::new();
        for row in dom
            .descendants(id)
            .filter(|&n| dom.is_element_named(n, "tr"))
        {
            let mut cells = String::new();
            for cell in dom
                .descendants(row)
                .filter(|&n| dom.is_element_named(n, "th") || dom.is_element_named(n, "td"))
            {
                let kind = if dom.is_element_named(cell, "th") {
                    "th"
                } else {
                    "td"
                };
                let content = self.walk(cell);
                cells.push_str(&format!("[{kind}]{content}[/{kind}]"));
            }
            rows.push_str(&format!("[tr]{cells}[/tr]"));
        }
        format!("[table]{rows}[/table]\n")
    }

    /// Figures resolve their image against the map and may consume a
    /// following `M`/`L` size-directive paragraph.
    fn render_figure(&mut self, figure: NodeId) -> String {
        let dom = self.dom;
        let images = self.images;

        let Some(img) = self.find_descendant_tag(figure, "img") else {
            return String::new();
        };

        let src = dom.attr(img, "src").unwrap_or("");
        let filename = image_filename(src);
        let Some(image_id) = images.get(&filename) else {
            // Unmapped image: raw embed with the original, undecoded src
            return format!("[img]{src}[/img]");
        };

        let mut size = "sizeOriginal";
        if let Some(sibling) = self.following_content_sibling(figure)
            && dom.is_element_named(sibling, "p")
        {
            match dom.collected_text(sibling).trim().to_uppercase().as_str() {
                "M" => {
                    self.skipped.insert(sibling);
                    size = "sizeThumb";
                }
                "L" => {
                    self.skipped.insert(sibling);
                    size = "sizeFull";
                }
                _ => {}
            }
        }

        format!("[previewimg={image_id};{size},inline;{filename}][/previewimg]\n")
    }

    /// First element in the subtree (root included) with the given tag.
    fn find_descendant_tag(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        self.dom
            .descendants(root)
            .find(|&n| self.dom.is_element_named(n, tag))
    }

    /// First sibling after `id` that carries content: whitespace-only text
    /// nodes, comments, and paragraphs with no text are skipped over.
    fn following_content_sibling(&self, id: NodeId) -> Option<NodeId> {
        let dom = self.dom;
        let mut cursor = dom.next_sibling(id);
        while let Some(sibling) = cursor {
            let transparent = match dom.get(sibling).map(|n| &n.data) {
                Some(NodeData::Text(text)) => text.trim().is_empty(),
                Some(NodeData::Comment(_)) => true,
                Some(NodeData::Element { name, .. }) => {
                    name.local.as_ref() == "p" && dom.collected_text(sibling).trim().is_empty()
                }
                _ => true,
            };
            if !transparent {
                return Some(sibling);
            }
            cursor = dom.next_sibling(sibling);
        }
        None
    }
}

/// Percent-decode an image `src` and take the final path segment.
fn image_filename(src: &str) -> String {
    let decoded = percent_decode_str(src).decode_utf8_lossy();
    decoded.rsplit('/').next().unwrap_or(&decoded).to_string()
}
