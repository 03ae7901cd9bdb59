use super::{html_escape, render_body, share_links};
use crate::{
    page::ArticlePage,
    view::{AuthorView, ImageView, RelatedView},
};

/// 渲染完整的文章页
///
/// `site_url` 用于拼接分享链接。评论组件只输出挂载点，由前端脚本接管。
pub fn render_article_page(page: &ArticlePage, site_url: &str) -> String {
    let article = &page.article;
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} | {}</title>\n",
        html_escape(&article.title),
        html_escape(page.category.display_name())
    ));
    if !article.overview.is_empty() {
        html.push_str(&format!(
            "<meta name=\"description\" content=\"{}\">\n",
            html_escape(&article.overview)
        ));
    }
    html.push_str(&format!(
        "<meta property=\"og:title\" content=\"{}\">\n",
        html_escape(&article.title)
    ));
    if !article.image.fallback {
        html.push_str(&format!(
            "<meta property=\"og:image\" content=\"{}\">\n",
            html_escape(&article.image.url)
        ));
    }
    html.push_str("</head>\n<body>\n<main class=\"article-page\">\n<article>\n");

    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&article.title)));
    html.push_str(&img(&article.image, "main-image"));
    html.push('\n');

    html.push_str("<div class=\"author\">");
    html.push_str(&author(&article.author, &article.byline()));
    html.push_str("</div>\n");

    if !article.overview.is_empty() {
        html.push_str(&format!(
            "<p class=\"overview\">{}</p>\n",
            html_escape(&article.overview)
        ));
    }

    html.push_str("<div class=\"prose\">");
    html.push_str(&render_body(&article.content));
    html.push_str("</div>\n");

    html.push_str("<nav class=\"share\" aria-label=\"Share\">");
    for link in share_links(site_url, page.category, &article.slug, &article.title) {
        html.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            html_escape(&link.href),
            link.network
        ));
    }
    html.push_str("</nav>\n");

    html.push_str(&format!(
        "<section id=\"comments\" data-thread=\"{}\"></section>\n",
        html_escape(&page.category.article_path(&article.slug))
    ));
    html.push_str("</article>\n");

    html.push_str("<aside class=\"related\">\n<h2>Related Topics</h2>\n<ul>");
    for item in &page.related {
        html.push_str(&related(page, item));
    }
    html.push_str("</ul>\n</aside>\n</main>\n</body>\n</html>\n");

    html
}

fn img(image: &ImageView, class: &str) -> String {
    format!(
        "<img class=\"{}\" src=\"{}\" alt=\"{}\" width=\"{}\" height=\"{}\">",
        class,
        html_escape(&image.url),
        html_escape(&image.alt),
        image.width,
        image.height
    )
}

/// 头像、作者名，以及非空时的署名行
fn author(author: &AuthorView, byline: &str) -> String {
    let mut out = img(&author.avatar, "avatar");
    out.push_str(&format!(
        "<span class=\"author-name\">{}</span>",
        html_escape(&author.name)
    ));
    if !byline.is_empty() {
        out.push_str(&format!(
            "<span class=\"byline\">{}</span>",
            html_escape(byline)
        ));
    }
    out
}

fn related(page: &ArticlePage, item: &RelatedView) -> String {
    format!(
        "<li>{}<a href=\"{}\">{}</a><div class=\"author\">{}</div></li>",
        img(&item.image, "card-image"),
        html_escape(&page.category.article_path(&item.slug)),
        html_escape(&item.title),
        author(&item.author, &item.byline())
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        config::AssetConfig,
        content::{Category, ContentDocument, RelatedItem},
        image::SanityImageBuilder,
        view::ViewModelBuilder,
    };

    fn page(doc: serde_json::Value, related: Vec<serde_json::Value>) -> ArticlePage {
        let builder = ViewModelBuilder::new(
            SanityImageBuilder::new("proj", "production"),
            AssetConfig::default(),
        );
        let doc: ContentDocument = serde_json::from_value(doc).expect("反序列化失败");
        ArticlePage {
            category: Category::Sports,
            article: builder.project(&doc),
            related: related
                .into_iter()
                .map(|v| serde_json::from_value::<RelatedItem>(v).expect("反序列化失败"))
                .map(|item| builder.project_related(&item))
                .collect(),
        }
    }

    #[test]
    fn test_render_full_page() {
        let html = render_article_page(
            &page(
                json!({
                    "title": "Cup <final> report",
                    "slug": "cup-final",
                    "overview": "A late winner.",
                    "authorName": "Ana",
                    "readTime": 7,
                    "publishedDate": "2024-03-05T00:00:00Z",
                    "content": [{"_type": "block", "children": [{"text": "Body text"}]}]
                }),
                vec![json!({"title": "Semi recap", "slug": "semi-recap"})],
            ),
            "https://news.example",
        );

        assert!(html.contains("<h1>Cup &lt;final&gt; report</h1>"));
        assert!(html.contains("<title>Cup &lt;final&gt; report | Sports</title>"));
        assert!(html.contains("<span class=\"author-name\">Ana</span>"));
        assert!(html.contains("<span class=\"byline\">7 min read • Mar 5, 2024</span>"));
        assert!(html.contains("<p>Body text</p>"));
        assert!(html.contains("src=\"/placeholder-image.jpg\""));
        assert!(html.contains("<a href=\"/sports/semi-recap\">Semi recap</a>"));
        assert!(html.contains("data-thread=\"/sports/cup-final\""));
        assert!(html.contains("https%3A%2F%2Fnews.example%2Fsports%2Fcup-final"));
        assert!(!html.contains("og:image"));
    }

    #[test]
    fn test_render_without_optional_fields() {
        let html = render_article_page(&page(json!({"title": "Bare", "slug": "bare"}), vec![]), "/");

        assert!(html.contains("Unknown Author"));
        assert!(!html.contains("min read"));
        assert!(!html.contains("•"));
        assert!(!html.contains("class=\"byline\""));
        assert!(!html.contains("class=\"overview\""));
        assert!(html.contains("<ul></ul>"));
    }
}
