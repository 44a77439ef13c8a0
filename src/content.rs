//! Static payloads served by the website, compiled into the binary.

pub const INDEX_HTML: &str = include_str!("../static/index.html");
pub const CONFIG_JSON: &str = include_str!("../static/config.json");
pub const INSTALL_SH: &str = include_str!("../static/install.sh");
pub const TOKEN_HTML: &str = include_str!("../static/token.html");

/// Marker in `static/token.html` replaced by the access token.
pub const TOKEN_PLACEHOLDER: &str = "{{token}}";

/// A fixed payload and the content type it is served with.
#[derive(Debug, Clone, Copy)]
pub struct StaticContent {
    pub path: &'static str,
    pub body: &'static str,
    pub content_type: &'static str,
}

pub const LANDING_PAGE: StaticContent = StaticContent {
    path: "/",
    body: INDEX_HTML,
    content_type: "text/html",
};

/// Every route answered with a static payload.
pub const STATIC_CONTENT: &[StaticContent] = &[
    LANDING_PAGE,
    StaticContent {
        path: "/config.json",
        body: CONFIG_JSON,
        content_type: "application/json",
    },
    StaticContent {
        path: "/install.sh",
        body: INSTALL_SH,
        content_type: "text/x-shellscript",
    },
];

/// Renders the token page with `token` substituted once.
pub fn render_token_page(token: &str) -> String {
    TOKEN_HTML.replacen(TOKEN_PLACEHOLDER, &escape_html(token), 1)
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_template_has_single_placeholder() {
        assert_eq!(TOKEN_HTML.matches(TOKEN_PLACEHOLDER).count(), 1);
    }

    #[test]
    fn render_substitutes_token_once() {
        let page = render_token_page("gho_abc123");
        assert_eq!(page.matches("gho_abc123").count(), 1);
        assert!(!page.contains(TOKEN_PLACEHOLDER));
    }

    #[test]
    fn render_escapes_markup() {
        let page = render_token_page("<script>alert('x')</script>");
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn static_paths_are_unique() {
        let mut paths: Vec<&str> = STATIC_CONTENT.iter().map(|c| c.path).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), STATIC_CONTENT.len());
    }
}
