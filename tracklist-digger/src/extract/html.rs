//! Small DOM helpers shared by the extraction strategies and discovery parsers.

use lazy_static::lazy_static;
use scraper::{ElementRef, Node, Selector};

lazy_static! {
    pub(crate) static ref HEADINGS: Selector =
        Selector::parse("h1, h2, h3, h4, h5, h6").expect("heading selector");
    static ref LIST_ITEMS: Selector = Selector::parse("li").expect("li selector");
}

const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "li", "pre", "tr", "dd", "dt", "blockquote", "h1", "h2", "h3", "h4", "h5",
    "h6", "ol", "ul", "dl", "table", "section", "article",
];

/// Text content with whitespace runs collapsed to single spaces.
pub(crate) fn element_text(element: ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text content keeping line structure: `<br>` and block element
/// boundaries become newlines.
pub(crate) fn block_text(element: ElementRef) -> String {
    let mut out = String::new();
    push_block_text(element, &mut out);
    out
}

fn push_block_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(el) if matches!(el.name(), "script" | "style") => {}
            Node::Element(el) => {
                let is_block = BLOCK_ELEMENTS.contains(&el.name());
                if let Some(child_element) = ElementRef::wrap(child) {
                    if is_block {
                        out.push('\n');
                    }
                    push_block_text(child_element, out);
                    if is_block {
                        out.push('\n');
                    }
                }
            }
            _ => {}
        }
    }
}

pub(crate) fn is_heading(element: &ElementRef) -> bool {
    let el = element.value();
    matches!(el.name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
        || (el.name() == "div" && el.classes().any(|c| c == "mw-heading"))
}

/// The element whose siblings make up a heading's section. Newer MediaWiki
/// skins wrap headings in `<div class="mw-heading">`.
pub(crate) fn heading_anchor(heading: ElementRef) -> ElementRef {
    heading
        .parent()
        .and_then(ElementRef::wrap)
        .filter(|parent| {
            parent.value().name() == "div" && parent.value().classes().any(|c| c == "mw-heading")
        })
        .unwrap_or(heading)
}

/// Element siblings following `anchor`, up to (not including) the next heading.
pub(crate) fn section_siblings(anchor: ElementRef) -> Vec<ElementRef> {
    anchor
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|sibling| !is_heading(sibling))
        .collect()
}

/// The first element sibling after `anchor`, skipping text nodes.
pub(crate) fn next_element_sibling(anchor: ElementRef) -> Option<ElementRef> {
    anchor.next_siblings().find_map(ElementRef::wrap)
}

/// Direct `td`/`th` children of a table row.
pub(crate) fn row_cells(row: ElementRef) -> Vec<ElementRef> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .collect()
}

/// Non-empty text of the `column`th cell of `row`.
pub(crate) fn cell_text(row: ElementRef, column: usize) -> Option<String> {
    row_cells(row)
        .get(column)
        .map(|cell| element_text(*cell))
        .filter(|text| !text.is_empty())
}

/// Texts of the `li` items belonging to `list_tag` lists in or at `element`.
pub(crate) fn list_item_texts(element: ElementRef, list_tag: &str) -> Vec<String> {
    let lists: Vec<ElementRef> = if element.value().name() == list_tag {
        vec![element]
    } else {
        element
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|e| e.value().name() == list_tag)
            .collect()
    };

    lists
        .into_iter()
        .flat_map(|list| list.select(&LIST_ITEMS).map(element_text).collect::<Vec<_>>())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Items of the first list run in a section: the consecutive `list_tag`
/// siblings starting at the first one, or the first `list_tag` list nested
/// in a container sibling. Later lists in the section are ignored.
pub(crate) fn leading_list_items(section: &[ElementRef], list_tag: &str) -> Vec<String> {
    let is_list = |element: &ElementRef| element.value().name() == list_tag;
    let Some(start) = section
        .iter()
        .position(|sibling| first_nested_list(*sibling, list_tag).is_some())
    else {
        return Vec::new();
    };

    if !is_list(&section[start]) {
        return first_nested_list(section[start], list_tag)
            .map(|list| list_item_texts(list, list_tag))
            .unwrap_or_default();
    }
    section[start..]
        .iter()
        .take_while(|sibling| is_list(sibling))
        .flat_map(|list| list_item_texts(*list, list_tag))
        .collect()
}

fn first_nested_list<'a>(element: ElementRef<'a>, list_tag: &str) -> Option<ElementRef<'a>> {
    element
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == list_tag)
}
