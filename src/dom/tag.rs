//! Maps HTML elements to the converter's recognized tag kinds.

use html5ever::LocalName;

use super::arena::Attribute;

/// Closed set of element kinds the converter recognizes.
///
/// Anything not listed classifies as [`Tag::Passthrough`]: its children
/// render normally and the wrapper itself contributes nothing, so content
/// inside unknown markup is never dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Paragraph,
    /// Headings levels 1-3; deeper levels are not part of the Steam tag set
    /// and classify as passthrough.
    Heading(u8),
    Bold,
    Italic,
    Underline,
    Strike,
    Spoiler,
    BlockQuote,
    Rule,
    /// Inline `<code>`: emitted bare, Steam has no inline-code tag.
    InlineCode,
    CodeBlock,
    Link,
    UnorderedList,
    OrderedList,
    ListItem,
    Table,
    TableRow,
    HeaderCell,
    DataCell,
    Figure,
    Image,
    Passthrough,
}

/// Classify an element by name and attributes.
///
/// Notion expresses underline as an inline `span` with a `border-bottom`
/// marker in its `style` attribute; plain spans pass through.
pub fn classify(name: &LocalName, attrs: &[Attribute]) -> Tag {
    match name.as_ref() {
        "p" => Tag::Paragraph,
        "h1" => Tag::Heading(1),
        "h2" => Tag::Heading(2),
        "h3" => Tag::Heading(3),
        "strong" | "b" => Tag::Bold,
        "em" | "i" => Tag::Italic,
        "span" if style_attr(attrs).is_some_and(|s| s.contains("border-bottom")) => Tag::Underline,
        "del" | "s" | "strike" => Tag::Strike,
        "mark" => Tag::Spoiler,
        "blockquote" => Tag::BlockQuote,
        "hr" => Tag::Rule,
        "code" => Tag::InlineCode,
        "pre" => Tag::CodeBlock,
        "a" => Tag::Link,
        "ul" => Tag::UnorderedList,
        "ol" => Tag::OrderedList,
        "li" => Tag::ListItem,
        "table" => Tag::Table,
        "tr" => Tag::TableRow,
        "th" => Tag::HeaderCell,
        "td" => Tag::DataCell,
        "figure" => Tag::Figure,
        "img" => Tag::Image,
        _ => Tag::Passthrough,
    }
}

fn style_attr(attrs: &[Attribute]) -> Option<&str> {
    attrs
        .iter()
        .find(|a| a.name.local.as_ref() == "style")
        .map(|a| a.value.as_str())
}

#[cfg(test)]
mod tests {
    use html5ever::{QualName, ns};

    use super::*;

    fn attr(name: &str, value: &str) -> Attribute {
        Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_basic_classification() {
        assert_eq!(classify(&LocalName::from("p"), &[]), Tag::Paragraph);
        assert_eq!(classify(&LocalName::from("h2"), &[]), Tag::Heading(2));
        assert_eq!(classify(&LocalName::from("strong"), &[]), Tag::Bold);
        assert_eq!(classify(&LocalName::from("em"), &[]), Tag::Italic);
        assert_eq!(classify(&LocalName::from("ol"), &[]), Tag::OrderedList);
        assert_eq!(classify(&LocalName::from("figure"), &[]), Tag::Figure);
    }

    #[test]
    fn test_deep_headings_pass_through() {
        assert_eq!(classify(&LocalName::from("h4"), &[]), Tag::Passthrough);
        assert_eq!(classify(&LocalName::from("h6"), &[]), Tag::Passthrough);
    }

    #[test]
    fn test_underline_span_needs_style_marker() {
        let underlined = [attr("style", "border-bottom: 0.05em solid")];
        assert_eq!(
            classify(&LocalName::from("span"), &underlined),
            Tag::Underline
        );

        let plain = [attr("style", "color: red")];
        assert_eq!(classify(&LocalName::from("span"), &plain), Tag::Passthrough);
        assert_eq!(classify(&LocalName::from("span"), &[]), Tag::Passthrough);
    }

    #[test]
    fn test_unknown_elements_pass_through() {
        assert_eq!(classify(&LocalName::from("div"), &[]), Tag::Passthrough);
        assert_eq!(classify(&LocalName::from("header"), &[]), Tag::Passthrough);
        assert_eq!(classify(&LocalName::from("video"), &[]), Tag::Passthrough);
    }
}
