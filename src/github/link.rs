//! `Link` response header → [`PageCursor`].
//!
//! GitHub paginates REST responses with an RFC 8288 style header:
//! `<https://api.github.com/issues?page=2>; rel="next", <…?page=5>; rel="last"`.
//! Only `next` and `prev` matter here. Entries that do not parse are skipped;
//! a missing header means there is no neighbouring page, whatever the item
//! count.

use url::Url;

use crate::types::PageCursor;

/// Decode a `Link` header value.
pub fn decode(header: Option<&str>) -> PageCursor {
    let Some(header) = header else {
        return PageCursor::empty();
    };

    let mut cursor = PageCursor::empty();
    for raw in split_entries(header) {
        if raw.trim().is_empty() {
            continue;
        }
        let Some(entry) = parse_entry(raw) else {
            tracing::debug!("skipping malformed link entry: {raw:?}");
            continue;
        };
        for rel in &entry.rels {
            if rel.eq_ignore_ascii_case("next") {
                cursor = cursor.with_next(entry.page);
            } else if rel.eq_ignore_ascii_case("prev") {
                cursor = cursor.with_prev(entry.page);
            }
        }
    }
    cursor
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

struct LinkEntry<'a> {
    page: u32,
    rels: Vec<&'a str>,
}

/// Split on commas that sit outside `<…>` and outside quoted parameter values.
fn split_entries(header: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut in_url = false;
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in header.char_indices() {
        match c {
            '<' if !in_quotes => in_url = true,
            '>' if !in_quotes => in_url = false,
            '"' if !in_url => in_quotes = !in_quotes,
            ',' if !in_url && !in_quotes => {
                entries.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&header[start..]);
    entries
}

/// Parse `<URL>; rel="a b"; other=x`.
fn parse_entry(raw: &str) -> Option<LinkEntry<'_>> {
    let rest = raw.trim().strip_prefix('<')?;
    let (url, params) = rest.split_once('>')?;
    let params = params.trim_start().strip_prefix(';')?;

    let mut rels = Vec::new();
    for param in params.split(';') {
        let Some((name, value)) = param.split_once('=') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("rel") {
            rels.extend(value.trim().trim_matches('"').split_whitespace());
        }
    }
    if rels.is_empty() {
        return None;
    }

    Some(LinkEntry {
        page: page_number(url.trim())?,
        rels,
    })
}

/// The `page` query parameter; `1` when the URL has none.
fn page_number(url: &str) -> Option<u32> {
    let parsed = Url::parse(url)
        .or_else(|_| Url::parse("https://api.github.com/").and_then(|base| base.join(url)))
        .ok()?;

    match parsed.query_pairs().find(|(key, _)| key == "page") {
        Some((_, value)) => value.parse::<u32>().ok().filter(|page| *page > 0),
        None => Some(1),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
