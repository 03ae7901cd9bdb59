use tracing::instrument;

use super::ContentStore;
use crate::{
    content::{Category, ContentDocument, RelatedItem},
    error::Result,
};

/// 相关文章的默认数量
pub const RELATED_LIMIT: usize = 5;

/// 在 [`ContentStore`] 之上保证相关文章的约定
///
/// 无论后端怎么实现，结果都不含被排除的 slug，按创建时间倒序，且不超过 `limit` 篇。
#[derive(Debug, Clone)]
pub struct DocumentFetcher<S> {
    store: S,
}

impl<S: ContentStore> DocumentFetcher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 按分类和 slug 取单篇文章
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_by_slug(
        &self,
        category: Category,
        slug: &str,
    ) -> Result<Option<ContentDocument>> {
        let doc = self.store.fetch_by_slug(category, slug).await?;
        tracing::debug!(found = doc.is_some());
        Ok(doc)
    }

    /// 取同分类下最近的文章
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_related(
        &self,
        category: Category,
        exclude_slug: &str,
        limit: usize,
    ) -> Result<Vec<RelatedItem>> {
        let mut items = self
            .store
            .fetch_related(category, exclude_slug, limit)
            .await?;

        items.retain(|item| item.slug != exclude_slug);
        // None 排在 Some 前面，倒序后缺少时间的条目落在最后
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit);

        tracing::debug!(count = items.len());
        Ok(items)
    }
}
