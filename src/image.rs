use reqwest::Url;

use crate::{config::SanityConfig, content::AssetRef};

/// 目标显示尺寸（像素）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// 文章主图
    pub const HERO: Size = Size::new(1200, 600);
    /// 相关文章卡片
    pub const CARD: Size = Size::new(500, 300);
    /// 正文作者头像
    pub const AVATAR: Size = Size::new(40, 40);
    /// 相关文章作者头像
    pub const AVATAR_SMALL: Size = Size::new(32, 32);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// 把图片资源引用解析为可直接访问的 URL
///
/// 无法解析时返回 `None`，由调用方决定用什么占位图。
pub trait ImageUrlBuilder: Send + Sync {
    fn url(&self, asset: &AssetRef, size: Size) -> Option<String>;
}

/// Sanity 图片 CDN 的 URL 构造器
#[derive(Debug, Clone)]
pub struct SanityImageBuilder {
    base: String,
}

impl SanityImageBuilder {
    pub fn new(project_id: &str, dataset: &str) -> Self {
        Self {
            base: format!("https://cdn.sanity.io/images/{}/{}", project_id, dataset),
        }
    }

    pub fn from_config(config: &SanityConfig) -> Self {
        Self::new(&config.project_id, &config.dataset)
    }
}

impl ImageUrlBuilder for SanityImageBuilder {
    fn url(&self, asset: &AssetRef, size: Size) -> Option<String> {
        let parsed = ParsedRef::parse(asset.reference.as_deref()?)?;
        let raw = format!(
            "{}/{}-{}x{}.{}",
            self.base, parsed.id, parsed.width, parsed.height, parsed.ext
        );

        let url = Url::parse_with_params(
            &raw,
            &[
                ("w", size.width.to_string()),
                ("h", size.height.to_string()),
                ("fit", "crop".to_string()),
            ],
        )
        .ok()?;

        Some(url.into())
    }
}

/// `image-<id>-<w>x<h>-<ext>` 拆出来的各部分
#[derive(Debug, PartialEq, Eq)]
struct ParsedRef<'a> {
    id: &'a str,
    width: u32,
    height: u32,
    ext: &'a str,
}

impl<'a> ParsedRef<'a> {
    fn parse(reference: &'a str) -> Option<Self> {
        let rest = reference.strip_prefix("image-")?;
        let (rest, ext) = rest.rsplit_once('-')?;
        let (id, dims) = rest.rsplit_once('-')?;
        let (width, height) = dims.split_once('x')?;

        if id.is_empty() || ext.is_empty() {
            return None;
        }

        Some(Self {
            id,
            width: width.parse().ok()?,
            height: height.parse().ok()?,
            ext,
        })
    }
}
