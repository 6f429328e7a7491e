//! Fixture HTML shaped like the mix database's pages.

use super::constants::*;

/// A category listing page. `next` is the href of the "next page" link.
pub fn category_page(mixes: &[(&str, &str)], next: Option<&str>) -> String {
    let items: String = mixes
        .iter()
        .map(|(href, title)| format!(r#"<li><a href="{href}" title="{title}">{title}</a></li>"#))
        .collect();
    let nav = match next {
        Some(href) => format!(r#"(previous page) (<a href="{href}#mw-pages">next page</a>)"#),
        None => "(previous page) (next page)".to_string(),
    };
    format!(
        r#"<!DOCTYPE html>
<html><head><title>Category:Ben UFO</title></head>
<body><div id="content"><div id="mw-content-text">
<div class="mw-category-generated"><div id="mw-pages">
<h2>Pages in category "Ben UFO"</h2>
{nav}
<div class="mw-content-ltr"><div class="mw-category"><div class="mw-category-group">
<ul>{items}</ul>
</div></div></div>
{nav}
</div></div>
<div id="catlinks"><a href="/w/Special:Categories">Categories</a>: <a href="/w/Category:DJ">DJ</a></div>
</div></div></body></html>"#
    )
}

/// A mix page with a "Tracklist" section in the newer heading markup.
pub fn labeled_mix_page(tracks: &[&str]) -> String {
    let items: String = tracks.iter().map(|t| format!("<li>{t}</li>")).collect();
    format!(
        r#"<html><body><div id="mw-content-text"><div class="mw-parser-output">
<p>Broadcast on FACT.</p>
<div class="mw-heading mw-heading2"><h2 id="Tracklist">Tracklist</h2></div>
<div class="list"><ol>{items}</ol></div>
<div class="mw-heading mw-heading2"><h2 id="Links">Links</h2></div>
<ul><li><a href="https://example.org">Source</a></li></ul>
</div></div></body></html>"#
    )
}

/// A mix page whose tracklist only exists in the page config script.
pub fn embedded_mix_page(tracks: &[&str]) -> String {
    let items: String = tracks.iter().map(|t| format!("<li>{t}</li>")).collect();
    let config = serde_json::json!({
        "wgPageName": "Mix",
        "pageAffTl": { "tl": format!("<ol>{items}</ol>") },
    });
    format!(
        r#"<html><head><script>RLCONF={{}};
mw.config.set({config});
</script></head><body><div id="mw-content-text"><p>Player below.</p></div></body></html>"#
    )
}

/// A mix page with a timestamped tracklist under an embedded player.
pub fn player_mix_page(lines: &[&str]) -> String {
    format!(
        r#"<html><body><div id="mw-content-text">
<p><iframe src="https://player.example/embed/1"></iframe></p>
<p>{}</p>
</div></body></html>"#,
        lines.join("<br>")
    )
}

pub fn explorer_url(offset: usize) -> String {
    format!(
        "{BASE_URL}/w/MixesDB:Explorer/Mixes?do=mx&mode=&cat1=Ben+UFO&cat2=&jnC=&style=&year=&tlC=1&tlI=1&so=&tmatch1=&tmatch2=&jnTm=&usesFile=&minHotnessLevel=&count=25&order=name&sort=desc&offset={offset}"
    )
}

pub fn explorer_result(title: &str, tracks: &[&str]) -> String {
    let href = title.replace(' ', "_");
    let items: String = tracks.iter().map(|t| format!("<li>{t}</li>")).collect();
    format!(
        r#"<div class="explorerResult">
<div class="explorerTitle"><h3><a href="/w/{href}" title="{title}">{title}</a></h3></div>
<div class="ExplorerTracklist"><ol>{items}</ol></div>
</div>"#
    )
}

pub fn explorer_page(total: usize, results: &[String]) -> String {
    format!(
        r#"<html><body><div id="mw-content-text">
<span class="explorerRes">Results: <b>{total}</b></span>
{}
</div></body></html>"#,
        results.concat()
    )
}
