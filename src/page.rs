use serde::Serialize;
use tracing::instrument;

use crate::{
    content::Category,
    error::Result,
    image::ImageUrlBuilder,
    store::{ContentStore, DocumentFetcher, RELATED_LIMIT},
    view::{ArticleView, RelatedView, ViewModelBuilder},
};

/// 一个文章页需要的全部数据
#[derive(Debug, Clone, Serialize)]
pub struct ArticlePage {
    pub category: Category,
    pub article: ArticleView,
    pub related: Vec<RelatedView>,
}

/// 页面加载结果
#[derive(Debug, Clone)]
pub enum PageState {
    Found(ArticlePage),
    NotFound,
}

/// 取文章与相关文章，投影成 [`ArticlePage`]
///
/// 两次查询互不依赖，并发发出。主文章查询失败直接返回错误；
/// 相关文章查询失败只记日志，页面照常渲染，侧栏为空。
#[instrument(skip(fetcher, builder))]
pub async fn load_article_page<S, I>(
    fetcher: &DocumentFetcher<S>,
    builder: &ViewModelBuilder<I>,
    category: Category,
    slug: &str,
) -> Result<PageState>
where
    S: ContentStore,
    I: ImageUrlBuilder,
{
    let (doc, related) = tokio::join!(
        fetcher.fetch_by_slug(category, slug),
        fetcher.fetch_related(category, slug, RELATED_LIMIT),
    );

    let Some(doc) = doc? else {
        return Ok(PageState::NotFound);
    };

    let related = related.unwrap_or_else(|e| {
        tracing::warn!(%e, "related articles unavailable");
        Vec::new()
    });

    Ok(PageState::Found(ArticlePage {
        category,
        article: builder.project(&doc),
        related: related
            .iter()
            .map(|item| builder.project_related(item))
            .collect(),
    }))
}
