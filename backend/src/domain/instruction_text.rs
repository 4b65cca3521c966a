//! Plain-text normalisation for provider turn instructions.
//!
//! Providers return instructions as HTML fragments such as
//! `Turn <b>left</b> onto <b>Bruin&nbsp;Walk</b>`. Clients render plain text,
//! so tags are replaced by spaces, a fixed set of entities is decoded, and
//! whitespace is collapsed.

/// Entities decoded by [`to_plain_text`]. Anything else is left verbatim.
const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Convert an HTML instruction fragment into a single line of plain text.
///
/// # Examples
/// ```
/// use wayfinder::domain::instruction_text::to_plain_text;
///
/// let text = to_plain_text("Turn <b>left</b> onto <b>Bruin&nbsp;Walk</b>");
/// assert_eq!(text, "Turn left onto Bruin Walk");
/// ```
pub fn to_plain_text(html: &str) -> String {
    let stripped = strip_tags(html);
    let decoded = decode_entities(&stripped);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        let (before, tail) = rest.split_at(open);
        match tail.find('>') {
            Some(close) => {
                out.push_str(before);
                out.push(' ');
                rest = &tail[close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

// Entities are matched left to right in one pass, so decoded text such as
// `&amp;lt;` yields `&lt;` and is not decoded a second time. Provider-side
// decoders built from chained replacements (`&amp;` first, then `&lt;`)
// turn the same input into `<`; escaped markup in an instruction therefore
// stays visible here instead of reappearing as a tag.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match ENTITIES
            .iter()
            .find(|(entity, _)| tail.starts_with(entity))
        {
            Some((entity, replacement)) => {
                out.push_str(replacement);
                rest = &tail[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
