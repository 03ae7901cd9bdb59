mod fetcher;
mod query;
mod sanity;

use std::future::Future;

use crate::{
    content::{Category, ContentDocument, RelatedItem},
    error::Result,
};

pub use self::{
    fetcher::{DocumentFetcher, RELATED_LIMIT},
    sanity::SanityClient,
};

/// 只读的内容仓库
///
/// 对应两条参数化查询：按分类加 slug 取单篇文章，以及取同分类下最近的若干篇。
pub trait ContentStore: Send + Sync {
    /// 查询单篇文章
    ///
    /// 文章不存在时返回 `None`，查询失败返回错误。
    fn fetch_by_slug(
        &self,
        category: Category,
        slug: &str,
    ) -> impl Future<Output = Result<Option<ContentDocument>>> + Send;

    /// 查询同分类下除 `exclude_slug` 以外的文章，按创建时间倒序，最多 `limit` 篇
    fn fetch_related(
        &self,
        category: Category,
        exclude_slug: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<RelatedItem>>> + Send;
}
