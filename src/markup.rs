//! Low-level HTML generation helpers.
//!
//! Everything the widget emits goes through this module: escaping,
//! attribute handling and tag assembly.  Attribute values are always
//! escaped; element bodies are emitted verbatim, since callers may pass
//! markup (labels, templates, CMS content).

use std::borrow::Cow;

/// Escape the HTML-reserved characters in `text`.
///
/// Returns the input unchanged (no allocation) when there is nothing to
/// escape.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    push_escaped(&mut out, text);
    Cow::Owned(out)
}

/// Push HTML-escaped text onto `out`.
pub fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

/// An ordered set of HTML attributes.
///
/// Insertion order is preserved so that rendered markup is stable, which
/// the tests rely on.
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    pairs: Vec<(String, String)>,
}

impl Attrs {
    /// Create an empty attribute set.
    pub fn new() -> Attrs {
        Attrs { pairs: Vec::new() }
    }

    /// Return the value of `name`, if set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set `name` to `value`, replacing any existing value.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.pairs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.into(),
            None => self.pairs.push((name.into(), value.into())),
        }
    }

    /// Builder form of [`set`](Attrs::set).
    pub fn with(mut self, name: &str, value: &str) -> Attrs {
        self.set(name, value);
        self
    }

    /// Append `class` to the `class` attribute, or set it if absent.
    pub fn append_class(&mut self, class: &str) {
        match self.pairs.iter_mut().find(|(k, _)| k == "class") {
            Some((_, v)) => {
                v.push(' ');
                v.push_str(class);
            }
            None => self.pairs.push(("class".into(), class.into())),
        }
    }

    /// True if no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render as ` k="v" k="v"` (leading space included unless empty).
    fn render_into(&self, out: &mut String) {
        for (k, v) in &self.pairs {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            push_escaped(out, v);
            out.push('"');
        }
    }
}

/// Render an opening tag with the given attributes.
pub fn open_tag(name: &str, attrs: &Attrs) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('<');
    out.push_str(name);
    attrs.render_into(&mut out);
    out.push('>');
    out
}

/// Render a closing tag.
pub fn close_tag(name: &str) -> String {
    format!("</{}>", name)
}

/// Render a complete element with a raw (pre-escaped) body.
pub fn tag(name: &str, attrs: &Attrs, body: &str) -> String {
    let mut out = open_tag(name, attrs);
    out.push_str(body);
    out.push_str(&close_tag(name));
    out
}

/// Render an anchor.  `label` is raw markup; `href` is escaped as an
/// attribute value.
pub fn link(label: &str, href: &str, attrs: &Attrs) -> String {
    let mut out = String::from("<a href=\"");
    push_escaped(&mut out, href);
    out.push('"');
    attrs.render_into(&mut out);
    out.push('>');
    out.push_str(label);
    out.push_str("</a>");
    out
}

/// Render a hidden input carrying a row index.
pub fn hidden_input(class: &str, value: &str) -> String {
    let mut out = String::from("<input type=\"hidden\" class=\"");
    push_escaped(&mut out, class);
    out.push_str("\" value=\"");
    push_escaped(&mut out, value);
    out.push_str("\" />");
    out
}

/// Substitute the `{link}` token in `template`, or return `link`
/// untouched when no template is configured.
pub fn apply_link_template(template: Option<&str>, link: &str) -> String {
    match template {
        Some(t) => t.replace("{link}", link),
        None => link.to_string(),
    }
}
