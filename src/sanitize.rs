//! Output sanitization for user-supplied text.
//!
//! Bookmark text is stored exactly as submitted and neutralized on the way
//! out. `sanitize_html` keeps a small whitelist of harmless formatting tags
//! and attributes and turns everything else into inert text, so a stored
//! `<script>` comes back as `&lt;script&gt;` and an `<img onerror=...>` loses
//! its handler while keeping the image.

/// Tags that survive sanitization, with the attributes each one may keep.
const ALLOWED_TAGS: &[(&str, &[&str])] = &[
    ("a", &["target", "href", "title"]),
    ("abbr", &["title"]),
    ("address", &[]),
    ("area", &["shape", "coords", "href", "alt"]),
    ("article", &[]),
    ("aside", &[]),
    ("audio", &["autoplay", "controls", "crossorigin", "loop", "muted", "preload", "src"]),
    ("b", &[]),
    ("bdi", &["dir"]),
    ("bdo", &["dir"]),
    ("big", &[]),
    ("blockquote", &["cite"]),
    ("br", &[]),
    ("caption", &[]),
    ("center", &[]),
    ("cite", &[]),
    ("code", &[]),
    ("col", &["align", "valign", "span", "width"]),
    ("colgroup", &["align", "valign", "span", "width"]),
    ("dd", &[]),
    ("del", &["datetime"]),
    ("details", &["open"]),
    ("div", &[]),
    ("dl", &[]),
    ("dt", &[]),
    ("em", &[]),
    ("figcaption", &[]),
    ("figure", &[]),
    ("font", &["color", "size", "face"]),
    ("footer", &[]),
    ("h1", &[]),
    ("h2", &[]),
    ("h3", &[]),
    ("h4", &[]),
    ("h5", &[]),
    ("h6", &[]),
    ("header", &[]),
    ("hr", &[]),
    ("i", &[]),
    ("img", &["src", "alt", "title", "width", "height", "loading"]),
    ("ins", &["datetime"]),
    ("kbd", &[]),
    ("li", &[]),
    ("mark", &[]),
    ("nav", &[]),
    ("ol", &[]),
    ("p", &[]),
    ("pre", &[]),
    ("s", &[]),
    ("section", &[]),
    ("small", &[]),
    ("span", &[]),
    ("sub", &[]),
    ("summary", &[]),
    ("sup", &[]),
    ("strong", &[]),
    ("strike", &[]),
    ("table", &["width", "border", "align", "valign"]),
    ("tbody", &["align", "valign"]),
    ("td", &["width", "rowspan", "colspan", "align", "valign"]),
    ("tfoot", &["align", "valign"]),
    ("th", &["width", "rowspan", "colspan", "align", "valign"]),
    ("thead", &["align", "valign"]),
    ("tr", &["rowspan", "align", "valign"]),
    ("tt", &[]),
    ("u", &[]),
    ("ul", &[]),
    ("video", &[
        "autoplay",
        "controls",
        "crossorigin",
        "loop",
        "muted",
        "playsinline",
        "poster",
        "preload",
        "src",
        "height",
        "width",
    ]),
];

/// Attributes whose value is a link the browser will follow or fetch.
const URL_ATTRIBUTES: &[&str] = &["href", "src", "cite", "poster", "background"];

const SAFE_URL_PREFIXES: &[&str] = &[
    "http://",
    "https://",
    "mailto:",
    "tel:",
    "data:image/",
    "ftp://",
    "./",
    "../",
    "#",
    "/",
];

/// Neutralizes executable markup in `input`.
///
/// Whitelisted tags are rebuilt from their parsed parts, so anything the
/// parser did not understand never reaches the output verbatim.
pub fn sanitize_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        push_text(&mut out, &rest[..open]);
        let after_open = &rest[open + 1..];

        if let Some(body) = after_open.strip_prefix("!--") {
            match body.find("-->") {
                Some(end) => {
                    rest = &body[end + 3..];
                    continue;
                }
                None => {
                    push_text(&mut out, &rest[open..]);
                    return out;
                }
            }
        }

        let close = after_open.find('>');
        let reopen = after_open.find('<');
        match (close, reopen) {
            (Some(close), reopen) if reopen.is_none_or(|reopen| close < reopen) => {
                push_tag(&mut out, &after_open[..close]);
                rest = &after_open[close + 1..];
            }
            _ => {
                // a lone '<' is just text
                out.push_str("&lt;");
                rest = after_open;
            }
        }
    }

    push_text(&mut out, rest);
    out
}

fn push_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attr_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    ALLOWED_TAGS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, attrs)| *attrs)
}

/// Writes the tag whose text (without the angle brackets) is `inner`.
fn push_tag(out: &mut String, inner: &str) {
    let trimmed = inner.trim();
    let (closing, body) = match trimmed.strip_prefix('/') {
        Some(body) => (true, body.trim_start()),
        None => (false, trimmed),
    };
    let (self_closing, body) = match body.strip_suffix('/') {
        Some(body) => (true, body.trim_end()),
        None => (false, body),
    };

    let name_end = body
        .find(|c: char| c.is_whitespace())
        .unwrap_or(body.len());
    let name = body[..name_end].to_ascii_lowercase();

    let Some(allowed) = allowed_attributes(&name) else {
        out.push_str("&lt;");
        push_text(out, inner);
        out.push_str("&gt;");
        return;
    };

    if closing {
        out.push_str("</");
        out.push_str(&name);
        out.push('>');
        return;
    }

    out.push('<');
    out.push_str(&name);
    for (attr, value) in parse_attributes(&body[name_end..]) {
        if !allowed.contains(&attr.as_str()) {
            continue;
        }
        out.push(' ');
        match value.and_then(|value| safe_attr_value(&attr, value)) {
            Some(value) if !value.is_empty() => {
                out.push_str(&attr);
                out.push_str("=\"");
                out.push_str(&escape_attr_value(&value));
                out.push('"');
            }
            _ => out.push_str(&attr),
        }
    }
    if self_closing {
        out.push_str(" /");
    }
    out.push('>');
}

/// Returns the value to keep for `attr`, or `None` when it must be dropped.
fn safe_attr_value(attr: &str, value: &str) -> Option<String> {
    let value = value.trim();
    if URL_ATTRIBUTES.contains(&attr) {
        let lower = value.to_ascii_lowercase();
        if !value.is_empty() && !SAFE_URL_PREFIXES.iter().any(|prefix| lower.starts_with(prefix)) {
            return None;
        }
    }
    Some(value.to_owned())
}

/// Splits `name="value" name='value' name=value name` sequences.
fn parse_attributes(source: &str) -> Vec<(String, Option<&str>)> {
    let mut attrs = Vec::new();
    let mut rest = source.trim_start();

    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].trim_start();

        let mut value = None;
        if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let quote = after_eq.chars().next().filter(|c| *c == '"' || *c == '\'');
            match quote {
                Some(quote) => {
                    let quoted = &after_eq[1..];
                    let end = quoted.find(quote).unwrap_or(quoted.len());
                    value = Some(&quoted[..end]);
                    rest = quoted.get(end + 1..).unwrap_or("");
                }
                None => {
                    let end = after_eq
                        .find(|c: char| c.is_whitespace())
                        .unwrap_or(after_eq.len());
                    value = Some(&after_eq[..end]);
                    rest = &after_eq[end..];
                }
            }
        }

        if !name.is_empty() {
            attrs.push((name, value));
        }
        rest = rest.trim_start();
    }

    attrs
}
