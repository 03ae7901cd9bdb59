use axum::{Json, response::Html};

use crate::{
    content::Category,
    error::{Error, Result},
    image::ImageUrlBuilder,
    page::{ArticlePage, PageState, load_article_page},
    render::render_article_page,
    state::AppState,
    store::ContentStore,
};

/// 加载文章页，文章不存在时返回 [`Error::NotFound`]
async fn load<S, I>(app: &AppState<S, I>, category: Category, slug: &str) -> Result<ArticlePage>
where
    S: ContentStore,
    I: ImageUrlBuilder,
{
    match load_article_page(app.fetcher(), app.builder(), category, slug).await? {
        PageState::Found(page) => Ok(page),
        PageState::NotFound => Err(Error::NotFound),
    }
}

/// 文章页 HTML
pub async fn article_html<S, I>(
    app: AppState<S, I>,
    category: Category,
    slug: String,
) -> Result<Html<String>>
where
    S: ContentStore,
    I: ImageUrlBuilder,
{
    let page = load(&app, category, &slug).await?;
    Ok(Html(render_article_page(&page, app.site_url())))
}

/// 文章页视图模型 JSON
pub async fn article_json<S, I>(
    app: AppState<S, I>,
    category: Category,
    slug: String,
) -> Result<Json<ArticlePage>>
where
    S: ContentStore,
    I: ImageUrlBuilder,
{
    load(&app, category, &slug).await.map(Json)
}
