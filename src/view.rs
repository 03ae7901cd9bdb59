use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::{
    config::AssetConfig,
    content::{Block, ContentDocument, ImageRef, RelatedItem, TextBlock},
    image::{ImageUrlBuilder, Size},
};

/// 作者名缺失时的显示文本
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// 可直接渲染的图片
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
    /// 是否使用了占位图
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorView {
    pub name: String,
    pub avatar: ImageView,
}

/// 文章页的视图模型
///
/// 所有字段都已填充默认值，渲染层不需要再判断缺失。
/// 空字符串表示该项不显示。
#[derive(Debug, Clone, Serialize)]
pub struct ArticleView {
    pub title: String,
    pub slug: String,
    pub overview: String,
    pub image: ImageView,
    pub author: AuthorView,
    /// 如 `7 min read`
    pub read_time: String,
    /// 如 `Mar 5, 2024`
    pub published_date: String,
    pub content: Vec<BodyBlock>,
}

/// 正文块，图片已解析为 URL
///
/// 无法解析的图片和不认识的块在投影时丢弃。
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyBlock {
    Text(TextBlock),
    Image { image: ImageView, caption: String },
}

/// 相关文章卡片
#[derive(Debug, Clone, Serialize)]
pub struct RelatedView {
    pub title: String,
    pub slug: String,
    pub image: ImageView,
    pub author: AuthorView,
    pub read_time: String,
    pub published_date: String,
}

impl ArticleView {
    /// 作者名下面那一行：阅读时长和发布日期，缺哪项就省掉哪项和分隔符
    pub fn byline(&self) -> String {
        byline(&self.read_time, &self.published_date)
    }
}

impl RelatedView {
    pub fn byline(&self) -> String {
        byline(&self.read_time, &self.published_date)
    }
}

fn byline(read_time: &str, date: &str) -> String {
    [read_time, date]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" • ")
}

/// 把原始文档投影成视图模型
///
/// 图片 URL 构造器由外部传入，测试时可以替换。
#[derive(Debug, Clone)]
pub struct ViewModelBuilder<I> {
    images: I,
    assets: AssetConfig,
}

impl<I: ImageUrlBuilder> ViewModelBuilder<I> {
    pub fn new(images: I, assets: AssetConfig) -> Self {
        Self { images, assets }
    }

    pub fn images(&self) -> &I {
        &self.images
    }

    pub fn project(&self, doc: &ContentDocument) -> ArticleView {
        let author_name = author_name(doc.author_name.as_deref());

        ArticleView {
            title: doc.title.clone(),
            slug: doc.slug.clone(),
            overview: doc.overview.clone().unwrap_or_default(),
            image: self.picture(doc.main_image.as_ref(), Size::HERO, "Main image"),
            author: AuthorView {
                avatar: self.avatar(
                    doc.author_avatar.as_ref(),
                    doc.author_name.as_deref(),
                    Size::AVATAR,
                ),
                name: author_name,
            },
            read_time: read_time_label(doc.read_time),
            published_date: doc
                .published_date
                .as_deref()
                .map(format_date)
                .unwrap_or_default(),
            content: doc
                .content
                .iter()
                .filter_map(|block| self.body_block(block))
                .collect(),
        }
    }

    fn body_block(&self, block: &Block) -> Option<BodyBlock> {
        match block {
            Block::Text(text) => Some(BodyBlock::Text(text.clone())),
            Block::Image(image) => {
                let asset = image.asset.as_ref()?;
                let url = self
                    .images
                    .url(asset, Size::HERO)
                    .or_else(|| asset.url.clone().filter(|u| !u.is_empty()))?;
                Some(BodyBlock::Image {
                    image: ImageView {
                        url,
                        alt: image.alt.clone().unwrap_or_default(),
                        width: Size::HERO.width,
                        height: Size::HERO.height,
                        fallback: false,
                    },
                    caption: image.caption.clone().unwrap_or_default(),
                })
            }
            Block::Unknown => None,
        }
    }

    pub fn project_related(&self, item: &RelatedItem) -> RelatedView {
        RelatedView {
            title: item.title.clone(),
            slug: item.slug.clone(),
            image: self.picture(item.main_image.as_ref(), Size::CARD, &item.title),
            author: AuthorView {
                avatar: self.avatar(
                    item.author_avatar.as_ref(),
                    item.author_name.as_deref(),
                    Size::AVATAR_SMALL,
                ),
                name: author_name(item.author_name.as_deref()),
            },
            read_time: read_time_label(item.read_time),
            published_date: item
                .published_date
                .as_deref()
                .map(format_date)
                .unwrap_or_default(),
        }
    }

    /// 文章主图或卡片图，先走构造器，其次用仓库给的直链，最后是占位图
    fn picture(&self, image: Option<&ImageRef>, size: Size, default_alt: &str) -> ImageView {
        let resolved = image.and_then(|img| img.asset.as_ref()).and_then(|asset| {
            self.images
                .url(asset, size)
                .or_else(|| asset.url.clone().filter(|u| !u.is_empty()))
        });

        match resolved {
            Some(url) => ImageView {
                url,
                alt: image
                    .and_then(|img| img.alt.clone())
                    .filter(|a| !a.is_empty())
                    .unwrap_or_else(|| default_alt.to_string()),
                width: size.width,
                height: size.height,
                fallback: false,
            },
            None => ImageView {
                url: self.assets.placeholder_image.clone(),
                alt: "Fallback image".to_string(),
                width: size.width,
                height: size.height,
                fallback: true,
            },
        }
    }

    /// 头像：直链优先，不再经过构造器
    fn avatar(&self, avatar: Option<&ImageRef>, name: Option<&str>, size: Size) -> ImageView {
        let asset = avatar.and_then(|a| a.asset.as_ref());
        let resolved = asset.and_then(|asset| {
            asset
                .url
                .clone()
                .filter(|u| !u.is_empty())
                .or_else(|| self.images.url(asset, size))
        });

        match resolved {
            Some(url) => ImageView {
                url,
                alt: name
                    .filter(|n| !n.is_empty())
                    .unwrap_or("Author Avatar")
                    .to_string(),
                width: size.width,
                height: size.height,
                fallback: false,
            },
            None => ImageView {
                url: self.assets.default_avatar.clone(),
                alt: "Default Author Avatar".to_string(),
                width: size.width,
                height: size.height,
                fallback: true,
            },
        }
    }
}

fn author_name(name: Option<&str>) -> String {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_AUTHOR)
        .to_string()
}

/// 阅读时长标签，缺失或不是正数时为空
pub fn read_time_label(minutes: Option<f64>) -> String {
    match minutes {
        Some(m) if m.is_finite() && m > 0.0 => format!("{} min read", m),
        _ => String::new(),
    }
}

/// 把发布日期格式化成 `Mar 5, 2024`，统一按 UTC
///
/// 支持 RFC 3339 时间戳、不带时区的时间和纯日期，无法解析时返回空字符串。
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();

    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());

    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => {
            tracing::debug!(raw, "unparseable published date");
            String::new()
        }
    }
}
