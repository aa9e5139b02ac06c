use crate::domain::model::Row;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\{\s*([^{}]+?)\s*\}\}\}|\{\{\s*([&!]?)\s*([^{}]*?)\s*\}\}")
        .expect("template tag pattern is valid")
});

/// 值插入時的跳脫方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// Values are inserted verbatim.
    None,
    /// `{{ name }}` values are HTML-escaped; `{{{ name }}}` and `{{& name }}` never are.
    Html,
}

/// Renders `{{ field }}` templates against a row.
///
/// Missing fields render as an empty string. Section and partial tags are not
/// supported and are left in the output untouched.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRenderer {
    escape: Escape,
}

impl TemplateRenderer {
    pub fn new(escape: Escape) -> Self {
        Self { escape }
    }

    /// Renderer used for catalog text: no escaping.
    pub fn verbatim() -> Self {
        Self::new(Escape::None)
    }

    pub fn render(&self, template: &str, row: &Row) -> String {
        TAG.replace_all(template, |caps: &Captures| {
            if let Some(name) = caps.get(1) {
                return lookup(row, name.as_str());
            }

            let sigil = caps.get(2).map_or("", |m| m.as_str());
            let name = caps.get(3).map_or("", |m| m.as_str());
            match sigil {
                "!" => String::new(),
                "&" => lookup(row, name),
                _ if name.starts_with(['#', '^', '/', '>', '=']) => caps[0].to_string(),
                _ => match self.escape {
                    Escape::None => lookup(row, name),
                    Escape::Html => escape_html(&lookup(row, name)),
                },
            }
        })
        .into_owned()
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::verbatim()
    }
}

fn lookup(row: &Row, name: &str) -> String {
    row.value(name).unwrap_or_default()
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '/' => escaped.push_str("&#x2F;"),
            '`' => escaped.push_str("&#x60;"),
            '=' => escaped.push_str("&#x3D;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt() -> Row {
        Row::new()
            .with("name", "Shirt")
            .with("size", "M")
            .with("vendor", "Acme & Co <b>")
    }

    #[test]
    fn test_render_fields_with_whitespace_variants() {
        let renderer = TemplateRenderer::verbatim();
        assert_eq!(renderer.render("{{ name }}, {{size}}", &shirt()), "Shirt, M");
    }

    #[test]
    fn test_render_missing_field_as_empty() {
        let renderer = TemplateRenderer::verbatim();
        assert_eq!(renderer.render("{{ name }}-{{ color }}-", &shirt()), "Shirt--");
    }

    #[test]
    fn test_verbatim_does_not_escape_markup() {
        let renderer = TemplateRenderer::verbatim();
        assert_eq!(renderer.render("{{ vendor }}", &shirt()), "Acme & Co <b>");
    }

    #[test]
    fn test_html_escape_flag() {
        let renderer = TemplateRenderer::new(Escape::Html);
        assert_eq!(
            renderer.render("{{ vendor }}", &shirt()),
            "Acme &amp; Co &lt;b&gt;"
        );
        assert_eq!(renderer.render("{{{ vendor }}}", &shirt()), "Acme & Co <b>");
        assert_eq!(renderer.render("{{& vendor }}", &shirt()), "Acme & Co <b>");
    }

    #[test]
    fn test_comments_and_sections() {
        let renderer = TemplateRenderer::verbatim();
        assert_eq!(renderer.render("{{! note }}{{ name }}", &shirt()), "Shirt");
        assert_eq!(renderer.render("{{#name}}x{{/name}}", &shirt()), "{{#name}}x{{/name}}");
    }

    #[test]
    fn test_identifiers_are_renderable() {
        let mut row = shirt();
        row.product_id = Some(99);
        let renderer = TemplateRenderer::verbatim();
        assert_eq!(renderer.render("{{ product_id }}/{{ name }}", &row), "99/Shirt");
    }
}
