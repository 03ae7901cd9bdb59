use reqwest::Url;
use serde::Serialize;

use crate::content::Category;

/// 一个社交平台的分享链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLink {
    pub network: &'static str,
    pub href: String,
}

/// 为文章生成分享链接
///
/// 文章地址为 `<site_url>/<category>/<slug>`。
pub fn share_links(site_url: &str, category: Category, slug: &str, title: &str) -> Vec<ShareLink> {
    let article_url = format!(
        "{}{}",
        site_url.trim_end_matches('/'),
        category.article_path(slug)
    );
    let whatsapp_text = format!("{} {}", title, article_url);

    let targets: [(&'static str, &str, Vec<(&str, &str)>); 4] = [
        (
            "X",
            "https://twitter.com/intent/tweet",
            vec![("url", article_url.as_str()), ("text", title)],
        ),
        (
            "Facebook",
            "https://www.facebook.com/sharer/sharer.php",
            vec![("u", article_url.as_str())],
        ),
        (
            "LinkedIn",
            "https://www.linkedin.com/sharing/share-offsite/",
            vec![("url", article_url.as_str())],
        ),
        (
            "WhatsApp",
            "https://api.whatsapp.com/send",
            vec![("text", whatsapp_text.as_str())],
        ),
    ];

    targets
        .into_iter()
        .filter_map(|(network, base, params)| {
            let href = Url::parse_with_params(base, &params).ok()?;
            Some(ShareLink {
                network,
                href: href.into(),
            })
        })
        .collect()
}
