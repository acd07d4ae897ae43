//! End-to-end conversion tests: full HTML documents through the whole
//! pipeline (parse → render → post-process).

use steamguide::{ImageMap, MISSING_ARTICLE, convert};

fn guide_map() -> ImageMap {
    let mut images = ImageMap::new();
    images.insert("cat.png", "123");
    images.insert("map overview.png", "456");
    images
}

// ============================================================================
// Whole-document conversion
// ============================================================================

#[test]
fn test_full_document() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>My Guide</title></head>
<body>
<article>
  <h1>My Guide</h1>
  <p>Welcome to the <b>guide</b>.</p>
  <h2>Setup</h2>
  <p>Follow <a href="https://example.com/docs">the docs</a>.</p>
  <ul>
    <li>step one</li>
    <li>step two</li>
  </ul>
</article>
</body>
</html>"#;

    let bbcode = convert(html, &guide_map());
    assert_eq!(
        bbcode,
        "[h1]My Guide[/h1]\n\
         Welcome to the [b]guide[/b].\n\
         [h2]Setup[/h2]\n\
         Follow [url=https://example.com/docs]the docs[/url].\n\
         [list][*]step one[*]step two[/list]"
    );
}

#[test]
fn test_document_without_article() {
    let html = "<html><body><div><p>Loose content</p></div></body></html>";
    assert_eq!(convert(html, &ImageMap::new()), MISSING_ARTICLE);
}

#[test]
fn test_content_outside_article_is_ignored() {
    let html = "<body><nav>menu</nav><article><p>body</p></article><footer>foot</footer></body>";
    assert_eq!(convert(html, &ImageMap::new()), "body");
}

// ============================================================================
// Figures and the image map
// ============================================================================

#[test]
fn test_figure_with_size_directive_and_caption_flow() {
    let html = r#"<article>
<figure><a href="images/cat.png"><img src="images/cat.png"></a></figure>
<p>M</p>
<p>Regular text continues here.</p>
</article>"#;

    let bbcode = convert(html, &guide_map());
    assert_eq!(
        bbcode,
        "[previewimg=123;sizeThumb,inline;cat.png][/previewimg]\n\
         Regular text continues here."
    );
}

#[test]
fn test_percent_encoded_src_resolves() {
    let html = r#"<article><figure><img src="images/map%20overview.png"></figure></article>"#;
    assert_eq!(
        convert(html, &guide_map()),
        "[previewimg=456;sizeOriginal,inline;map overview.png][/previewimg]"
    );
}

#[test]
fn test_unmapped_image_keeps_raw_embed() {
    let html = r#"<article><figure><img src="images/dog.png"></figure></article>"#;
    assert_eq!(convert(html, &guide_map()), "[img]images/dog.png[/img]");
}

// ============================================================================
// Post-processing through the pipeline
// ============================================================================

#[test]
fn test_split_lists_are_rejoined() {
    // Notion sometimes splits one logical list into several DOM lists
    let html = r#"<article>
<ul><li>alpha</li></ul>
<ul><li>beta</li></ul>
<ul><li>gamma</li></ul>
</article>"#;

    let bbcode = convert(html, &ImageMap::new());
    assert_eq!(
        bbcode,
        "[list]\n    [*]alpha\n    [*]beta\n    [*]gamma\n[/list]"
    );
}

#[test]
fn test_lists_split_by_paragraph_stay_apart() {
    let html = r#"<article>
<ul><li>alpha</li></ul>
<p>interlude</p>
<ul><li>beta</li></ul>
</article>"#;

    let bbcode = convert(html, &ImageMap::new());
    assert_eq!(
        bbcode,
        "[list][*]alpha[/list]\ninterlude\n[list][*]beta[/list]"
    );
}

#[test]
fn test_table_cell_filenames_resolve() {
    let html = r#"<article>
<table>
<tr><th>Screenshot</th><th>Notes</th></tr>
<tr><td>cat.png</td><td>the cat</td></tr>
</table>
</article>"#;

    let bbcode = convert(html, &guide_map());
    assert_eq!(
        bbcode,
        "[table][tr][th]Screenshot[/th][th]Notes[/th][/tr]\
         [tr][td][previewimg=123;sizeThumb,inline;cat.png][/previewimg][/td]\
         [td]the cat[/td][/tr][/table]"
    );
}

#[test]
fn test_mixed_document_with_everything() {
    let html = r#"<article>
<h1>Full Tour</h1>
<blockquote>Read this first.</blockquote>
<hr>
<figure><img src="images/cat.png"></figure>
<p>L</p>
<ol><li>first</li></ol>
<ol><li>second</li></ol>
<pre><code>cargo run</code></pre>
</article>"#;

    let bbcode = convert(html, &guide_map());
    assert_eq!(
        bbcode,
        "[h1]Full Tour[/h1]\n\
         [quote]Read this first.[/quote]\n\
         [hr]\n\
         [previewimg=123;sizeFull,inline;cat.png][/previewimg]\n\
         [olist]\n    [*]first\n    [*]second\n[/olist]\n\
         [code]cargo run[/code]"
    );
}
