use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::errors::StatementParseError;

pub(super) static STMTTRN: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("stmttrn").expect("Failed to compile STMTTRN selector")
});
pub(super) static DTASOF: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("dtasof").expect("Failed to compile DTASOF selector")
});
pub(super) static DTPOSTED: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("dtposted").expect("Failed to compile DTPOSTED selector")
});
pub(super) static MEMO: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("memo").expect("Failed to compile MEMO selector")
});
pub(super) static CURRATE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("currate").expect("Failed to compile CURRATE selector")
});
pub(super) static TRNAMT: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("trnamt").expect("Failed to compile TRNAMT selector")
});

/// A parsed OFX file that can be queried by tag name.
///
/// Both OFX 1.x (SGML, unclosed leaf tags) and OFX 2.x (XML) are accepted.
/// Tag names are matched case-insensitively. Queries never fail: a missing
/// tag is reported as `None`.
pub struct OfxDocument {
    html: Html,
}

impl OfxDocument {
    pub fn parse(content: &str) -> Result<Self, StatementParseError> {
        if !looks_like_ofx(content) {
            return Err(StatementParseError::ParseFailed(
                "Missing <OFX> tag or OFX header".to_string(),
            ));
        }

        let html = Html::parse_document(&close_leaf_elements(content));
        Ok(Self { html })
    }

    /// Every element matching `selector`, in tree order.
    pub fn select_all<'a>(
        &'a self,
        selector: &'a Selector,
    ) -> impl Iterator<Item = OfxElement<'a>> + 'a {
        self.html.select(selector).map(OfxElement)
    }

    /// Text of the first element matching `selector` that has any.
    pub fn first_text(&self, selector: &Selector) -> Option<&str> {
        self.html.select(selector).find_map(own_text)
    }
}

/// One element of an [`OfxDocument`], e.g. a `STMTTRN` aggregate.
#[derive(Clone, Copy)]
pub struct OfxElement<'a>(ElementRef<'a>);

impl<'a> OfxElement<'a> {
    pub fn first_text(&self, selector: &Selector) -> Option<&'a str> {
        self.0.select(selector).find_map(own_text)
    }
}

/// First non-blank text node directly under `element`, trimmed.
fn own_text(element: ElementRef<'_>) -> Option<&str> {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
}

pub(super) fn looks_like_ofx(content: &str) -> bool {
    let upper = content.to_ascii_uppercase();
    upper.contains("<OFX>") || upper.contains("OFXHEADER") || upper.contains("DATA:OFXSGML")
}

/// Closes SGML leaf elements (`<TRNAMT>-4.50` becomes `<TRNAMT>-4.50</TRNAMT>`)
/// so that values never end up nested inside each other. Tags already followed
/// by their own end tag, and aggregates with no text, are left alone.
fn close_leaf_elements(content: &str) -> String {
    let mut result = String::with_capacity(content.len() + content.len() / 4);
    let mut segments = content.split('<').peekable();

    if let Some(prologue) = segments.next() {
        result.push_str(prologue);
    }

    while let Some(segment) = segments.next() {
        result.push('<');

        let Some(tag_end) = segment.find('>') else {
            result.push_str(segment);
            continue;
        };
        let tag = &segment[..tag_end];
        let text = &segment[tag_end + 1..];
        result.push_str(&segment[..=tag_end]);

        let name = tag.split_whitespace().next().unwrap_or_default();
        let is_start_tag = !name.is_empty()
            && !name.starts_with(['/', '?', '!'])
            && !tag.ends_with('/');
        let value = text.trim_end();

        if is_start_tag && !value.trim_start().is_empty() && !is_closed_by(segments.peek(), name) {
            result.push_str(value);
            result.push_str("</");
            result.push_str(name);
            result.push('>');
            result.push_str(&text[value.len()..]);
        } else {
            result.push_str(text);
        }
    }

    result
}

fn is_closed_by(next: Option<&&str>, name: &str) -> bool {
    next.and_then(|segment| segment.strip_prefix('/'))
        .and_then(|segment| segment.split('>').next())
        .is_some_and(|closing| closing.trim().eq_ignore_ascii_case(name))
}
