use reqwest::Url;

use super::html_escape;
use crate::{
    content::{Span, TextBlock},
    view::BodyBlock,
};

/// 把正文块渲染为 HTML
///
/// 连续的列表项合并成 `<ul>`/`<ol>`，`level` 大于 1 的项嵌套一层。
pub fn render_body(blocks: &[BodyBlock]) -> String {
    let mut out = String::new();
    let mut lists: Vec<&'static str> = Vec::new();

    for block in blocks {
        match block {
            BodyBlock::Text(text) if text.list_item.is_some() => {
                let tag = list_tag(text.list_item.as_deref());
                let level = text.level.unwrap_or(1).max(1) as usize;

                while lists.len() > level {
                    close_list(&mut out, &mut lists);
                }
                if lists.len() == level && lists.last() != Some(&tag) {
                    close_list(&mut out, &mut lists);
                }
                while lists.len() < level {
                    out.push('<');
                    out.push_str(tag);
                    out.push('>');
                    lists.push(tag);
                }

                out.push_str("<li>");
                render_spans(&mut out, text);
                out.push_str("</li>");
            }
            BodyBlock::Text(text) => {
                close_all(&mut out, &mut lists);
                let tag = style_tag(text.style.as_deref());
                out.push_str(&format!("<{}>", tag));
                render_spans(&mut out, text);
                out.push_str(&format!("</{}>", tag));
            }
            BodyBlock::Image { image, caption } => {
                close_all(&mut out, &mut lists);
                out.push_str("<figure>");
                out.push_str(&format!(
                    r#"<img src="{}" alt="{}" width="{}" height="{}" loading="lazy">"#,
                    html_escape(&image.url),
                    html_escape(&image.alt),
                    image.width,
                    image.height
                ));
                if !caption.is_empty() {
                    out.push_str(&format!("<figcaption>{}</figcaption>", html_escape(caption)));
                }
                out.push_str("</figure>");
            }
        }
    }

    close_all(&mut out, &mut lists);
    out
}

fn list_tag(kind: Option<&str>) -> &'static str {
    match kind {
        Some("number") => "ol",
        _ => "ul",
    }
}

fn style_tag(style: Option<&str>) -> &'static str {
    match style {
        Some("h1") => "h1",
        Some("h2") => "h2",
        Some("h3") => "h3",
        Some("h4") => "h4",
        Some("h5") => "h5",
        Some("h6") => "h6",
        Some("blockquote") => "blockquote",
        _ => "p",
    }
}

fn close_list(out: &mut String, lists: &mut Vec<&'static str>) {
    if let Some(tag) = lists.pop() {
        out.push_str(&format!("</{}>", tag));
    }
}

fn close_all(out: &mut String, lists: &mut Vec<&'static str>) {
    while !lists.is_empty() {
        close_list(out, lists);
    }
}

fn render_spans(out: &mut String, block: &TextBlock) {
    for span in &block.children {
        render_span(out, block, span);
    }
}

/// 链接只允许 http、https、mailto 和相对地址
fn is_safe_href(href: &str) -> bool {
    Url::parse("https://base.invalid/")
        .and_then(|base| base.join(href))
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https" | "mailto"))
}

/// 按 marks 的顺序由外向内包裹
fn render_span(out: &mut String, block: &TextBlock, span: &Span) {
    let mut closing = Vec::new();

    for mark in &span.marks {
        let (open, close) = match mark.as_str() {
            "strong" => ("<strong>".to_string(), "</strong>"),
            "em" => ("<em>".to_string(), "</em>"),
            "code" => ("<code>".to_string(), "</code>"),
            "underline" => ("<u>".to_string(), "</u>"),
            "strike-through" => ("<s>".to_string(), "</s>"),
            key => match block
                .mark_def(key)
                .and_then(|d| d.href.as_deref())
                .filter(|href| is_safe_href(href))
            {
                Some(href) => (
                    format!(r#"<a href="{}" rel="noopener">"#, html_escape(href)),
                    "</a>",
                ),
                None => continue,
            },
        };
        out.push_str(&open);
        closing.push(close);
    }

    out.push_str(&html_escape(&span.text));

    for close in closing.into_iter().rev() {
        out.push_str(close);
    }
}
