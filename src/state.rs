use std::sync::Arc;

use crate::{
    image::{ImageUrlBuilder, SanityImageBuilder},
    store::{ContentStore, DocumentFetcher, SanityClient},
    view::ViewModelBuilder,
};

/// 应用程序上下文
///
/// [`AppState`] 封装了文档查询器、视图模型构造器和站点地址，请求之间只读共享。
/// 内容仓库和图片构造器都是泛型参数，测试时可以换成内存实现。
pub struct AppState<S = SanityClient, I = SanityImageBuilder> {
    fetcher: Arc<DocumentFetcher<S>>,
    builder: Arc<ViewModelBuilder<I>>,
    site_url: Arc<str>,
}

impl<S, I> Clone for AppState<S, I> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            builder: self.builder.clone(),
            site_url: self.site_url.clone(),
        }
    }
}

impl<S: ContentStore, I: ImageUrlBuilder> AppState<S, I> {
    /// 创建一个新的 [`AppState`] 实例
    pub fn new(store: S, builder: ViewModelBuilder<I>, site_url: impl AsRef<str>) -> Self {
        Self {
            fetcher: Arc::new(DocumentFetcher::new(store)),
            builder: Arc::new(builder),
            site_url: Arc::from(site_url.as_ref()),
        }
    }

    /// 获取文档查询器
    pub fn fetcher(&self) -> &DocumentFetcher<S> {
        &self.fetcher
    }

    /// 获取视图模型构造器
    pub fn builder(&self) -> &ViewModelBuilder<I> {
        &self.builder
    }

    /// 站点对外地址
    pub fn site_url(&self) -> &str {
        &self.site_url
    }
}
