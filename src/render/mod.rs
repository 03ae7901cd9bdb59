//! 文章页的 HTML 渲染

mod page;
mod portable_text;
mod share;

pub use self::{
    page::render_article_page,
    portable_text::render_body,
    share::{ShareLink, share_links},
};

/// 转义 HTML 文本和属性值
pub fn html_escape(s: &str) -> String {
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
