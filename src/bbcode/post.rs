//! Textual post-processing of rendered BBCode.
//!
//! Two passes in fixed order: bare image filenames inside `[td]` cells are
//! replaced with resolved preview images, then runs of adjacent same-kind
//! list blocks are merged into a single block. Both passes treat the BBCode
//! as text; regions they do not match are copied through verbatim.

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::{Captures, Regex};

use crate::images::ImageMap;

static TD_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[td\]([^\]]+?)\[/td\]").expect("td regex"));

static OLIST_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[olist\]((?:\[\*\].*?)+)\[/olist\]").expect("olist regex"));

static LIST_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[list\]((?:\[\*\].*?)+)\[/list\]").expect("list regex"));

/// Run both rewrite passes over converter output.
pub fn post_process(bbcode: &str, images: &ImageMap) -> String {
    let substituted = substitute_cell_images(bbcode, images);
    let merged = merge_adjacent_lists(&substituted, &OLIST_BLOCK, "olist");
    merge_adjacent_lists(&merged, &LIST_BLOCK, "list")
}

/// Replace bare image filenames inside table cells with preview images.
///
/// Source tables may carry a filename as plain cell text instead of a
/// resolved figure. The cell text is percent-decoded and looked up in the
/// map; unmapped cells are left byte-identical.
fn substitute_cell_images(bbcode: &str, images: &ImageMap) -> String {
    TD_FILENAME
        .replace_all(bbcode, |caps: &Captures| {
            let filename = percent_decode_str(&caps[1]).decode_utf8_lossy().into_owned();
            match images.get(&filename) {
                Some(id) => {
                    format!("[td][previewimg={id};sizeThumb,inline;{filename}][/previewimg][/td]")
                }
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// A matched `[kind]...[/kind]` block with its span in the source text.
struct ListBlock<'t> {
    start: usize,
    end: usize,
    items: &'t str,
}

/// Merge runs of adjacent list blocks of one kind into a single block.
///
/// Blocks count as adjacent only when the next one starts exactly one
/// character past the previous one's end, i.e. separated by a single
/// newline and nothing else. Merged items are re-emitted one per line with
/// four spaces of indent; isolated blocks pass through unmodified, which
/// also makes the pass idempotent (a merged block no longer opens with
/// `[*]` and stops matching).
fn merge_adjacent_lists(bbcode: &str, block: &Regex, kind: &str) -> String {
    let mut blocks: Vec<ListBlock> = Vec::new();
    for caps in block.captures_iter(bbcode) {
        let (Some(whole), Some(items)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        blocks.push(ListBlock {
            start: whole.start(),
            end: whole.end(),
            items: items.as_str(),
        });
    }
    if blocks.is_empty() {
        return bbcode.to_string();
    }

    let mut result = String::with_capacity(bbcode.len());
    let mut last_end = 0;
    let mut i = 0;
    while i < blocks.len() {
        let mut j = i + 1;
        while j < blocks.len() && blocks[j].start == blocks[j - 1].end + 1 {
            j += 1;
        }

        result.push_str(&bbcode[last_end..blocks[i].start]);
        if j - i == 1 {
            // Isolated block: copied verbatim
            result.push_str(&bbcode[blocks[i].start..blocks[i].end]);
        } else {
            let mut items = String::new();
            for b in &blocks[i..j] {
                items.push_str(b.items);
            }
            let indented = items.replace("[*]", "\n    [*]");
            result.push_str(&format!("[{kind}]{indented}\n[/{kind}]"));
        }
        last_end = blocks[j - 1].end;
        i = j;
    }
    result.push_str(&bbcode[last_end..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat_map() -> ImageMap {
        let mut images = ImageMap::new();
        images.insert("cat.png", "123");
        images
    }

    #[test]
    fn test_cell_substitution() {
        let out = post_process("[table][tr][td]cat.png[/td][/tr][/table]", &cat_map());
        assert_eq!(
            out,
            "[table][tr][td][previewimg=123;sizeThumb,inline;cat.png][/previewimg][/td][/tr][/table]"
        );
    }

    #[test]
    fn test_cell_substitution_miss_is_byte_identical() {
        let input = "[table][tr][td]dog.png[/td][/tr][/table]";
        assert_eq!(post_process(input, &cat_map()), input);
    }

    #[test]
    fn test_cell_substitution_percent_decodes() {
        let mut images = ImageMap::new();
        images.insert("shot 1.png", "77");
        let out = post_process("[td]shot%201.png[/td]", &images);
        assert_eq!(
            out,
            "[td][previewimg=77;sizeThumb,inline;shot 1.png][/previewimg][/td]"
        );
    }

    #[test]
    fn test_cell_substitution_is_case_insensitive() {
        let out = post_process("[TD]cat.png[/TD]", &cat_map());
        assert_eq!(
            out,
            "[td][previewimg=123;sizeThumb,inline;cat.png][/previewimg][/td]"
        );
    }

    #[test]
    fn test_cell_with_markup_is_not_touched() {
        // A nested ']' means the cell holds markup, not a bare filename
        let input = "[td][b]cat.png[/b][/td]";
        assert_eq!(post_process(input, &cat_map()), input);
    }

    #[test]
    fn test_adjacent_lists_merge() {
        let out = post_process("[list][*]A[/list]\n[list][*]B[/list]", &ImageMap::new());
        assert_eq!(out, "[list]\n    [*]A\n    [*]B\n[/list]");
    }

    #[test]
    fn test_separated_lists_do_not_merge() {
        let input = "[list][*]A[/list]\nsome paragraph\n[list][*]B[/list]";
        assert_eq!(post_process(input, &ImageMap::new()), input);
    }

    #[test]
    fn test_isolated_list_is_unmodified() {
        let input = "intro\n[list][*]A[*]B[/list]\noutro";
        assert_eq!(post_process(input, &ImageMap::new()), input);
    }

    #[test]
    fn test_three_way_merge() {
        let out = post_process(
            "[olist][*]1[/olist]\n[olist][*]2[/olist]\n[olist][*]3[/olist]",
            &ImageMap::new(),
        );
        assert_eq!(out, "[olist]\n    [*]1\n    [*]2\n    [*]3\n[/olist]");
    }

    #[test]
    fn test_list_kinds_merge_independently() {
        // An [olist] between two [list] blocks breaks the [list] run
        let input = "[list][*]A[/list]\n[olist][*]1[/olist]\n[list][*]B[/list]";
        assert_eq!(post_process(input, &ImageMap::new()), input);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let once = post_process("[list][*]A[/list]\n[list][*]B[/list]", &ImageMap::new());
        let twice = post_process(&once, &ImageMap::new());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_surrounding_text_is_preserved() {
        let out = post_process(
            "before\n[list][*]A[/list]\n[list][*]B[/list]\nafter",
            &ImageMap::new(),
        );
        assert_eq!(out, "before\n[list]\n    [*]A\n    [*]B\n[/list]\nafter");
    }
}
