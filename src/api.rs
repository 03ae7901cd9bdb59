mod pages;

use std::path::Path;

use axum::{
    Router,
    extract::{Path as UrlPath, State},
    routing::get,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::instrument;

use crate::{
    content::Category,
    error::{Error, Result},
    image::ImageUrlBuilder,
    state::AppState,
    store::ContentStore,
};

/// 设置应用的路由。
///
/// 每个分类注册一组路由：
///
/// - `GET /{category}/{slug}`：文章页 HTML
/// - `GET /api/{category}/{slug}`：文章页的视图模型 JSON
///
/// 另有 `GET /healthz` 存活检查。其余路径（包括未知分类）交给 `public_dir`
/// 下的静态文件，占位图也在那里。
pub fn setup_route<S, I>(app: AppState<S, I>, public_dir: impl AsRef<Path>) -> Router
where
    S: ContentStore + 'static,
    I: ImageUrlBuilder + 'static,
{
    let router = Category::ALL
        .into_iter()
        .fold(Router::<AppState<S, I>>::new(), |router, category| {
            router
                .route(
                    &format!("/{}/{{slug}}", category.route()),
                    get(
                        move |State(app): State<AppState<S, I>>, UrlPath(slug): UrlPath<String>| {
                            pages::article_html(app, category, slug)
                        },
                    ),
                )
                .route(
                    &format!("/api/{}/{{slug}}", category.route()),
                    get(
                        move |State(app): State<AppState<S, I>>, UrlPath(slug): UrlPath<String>| {
                            pages::article_json(app, category, slug)
                        },
                    ),
                )
        });

    router
        .route("/healthz", get(healthz))
        .fallback_service(ServeDir::new(public_dir))
        .with_state(app)
}

async fn healthz() -> &'static str {
    "ok"
}

/// 启动 HTTP 服务，并使用给定的路由处理请求。
#[instrument(name = "http server", skip(router))]
pub async fn run_server_with_router(router: Router, listen: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;

    tracing::info!("listening on {}", listen);

    axum::serve(listener, router).await.map_err(Error::from)
}

/// 启动 HTTP 服务，自动设置路由和中间件。
///
/// 1. 生成路由
/// 2. 添加日志和追踪中间件
/// 3. 启动服务器
pub async fn run_server<S, I>(
    app: AppState<S, I>,
    public_dir: impl AsRef<Path>,
    listen: &str,
) -> Result<()>
where
    S: ContentStore + 'static,
    I: ImageUrlBuilder + 'static,
{
    let router = setup_route(app, public_dir);
    let router = add_middlewares(router);
    run_server_with_router(router, listen).await
}

/// 为路由添加中间件，包括请求追踪和失败日志记录。
///
/// 日志记录会在请求失败时输出错误信息。
fn add_middlewares(router: Router) -> Router {
    fn log_failure(
        err: tower_http::classify::ServerErrorsFailureClass,
        _latency: std::time::Duration,
        _span: &tracing::Span,
    ) {
        tracing::error!(error = %err, "request failed");
    }

    router.layer(
        TraceLayer::new_for_http()
            .on_failure(log_failure)
            .on_request(|_req: &_, _span: &tracing::Span| {
                // 空实现，关闭请求日志
            }),
    )
}
