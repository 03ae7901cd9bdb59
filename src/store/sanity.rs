use reqwest::{
    Url,
    header::{self, HeaderMap, HeaderValue},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use super::{ContentStore, query};
use crate::{
    config::SanityConfig,
    content::{Category, ContentDocument, RelatedItem},
    error::{Error, Result},
};

/// Sanity HTTP 查询接口的客户端
///
/// 每次查询都是一次 `GET .../data/query/<dataset>`，参数以 JSON 编码放在 `$slug` 里。
/// 不做重试，也不设额外的超时。
#[derive(Debug, Clone)]
pub struct SanityClient {
    client: reqwest::Client,
    endpoint: Url,
}

#[derive(Deserialize)]
struct QueryResponse<T> {
    result: Option<T>,
}

impl SanityClient {
    pub fn new(config: &SanityConfig) -> Result<Self> {
        let host = if config.use_cdn && config.token.is_none() {
            "apicdn"
        } else {
            "api"
        };
        let endpoint = format!(
            "https://{}.{}.sanity.io/v{}/data/query/{}",
            config.project_id, host, config.api_version, config.dataset
        );
        let endpoint = Url::parse(&endpoint).map_err(|e| Error::Config(e.to_string()))?;

        Self::with_endpoint(endpoint, config.token.as_deref())
    }

    /// 指定完整的查询地址，本地测试时指向假服务
    pub fn with_endpoint(endpoint: Url, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::Config(format!("invalid sanity token: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn query<T: DeserializeOwned>(&self, groq: &str, slug: &str) -> Result<Option<T>> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", groq)
            .append_pair("$slug", &serde_json::to_string(slug)?);

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let resp: QueryResponse<T> = serde_json::from_slice(&body)?;
        Ok(resp.result)
    }
}

impl ContentStore for SanityClient {
    async fn fetch_by_slug(&self, category: Category, slug: &str) -> Result<Option<ContentDocument>> {
        self.query(&query::article_by_slug(category), slug).await
    }

    async fn fetch_related(
        &self,
        category: Category,
        exclude_slug: &str,
        limit: usize,
    ) -> Result<Vec<RelatedItem>> {
        let items: Option<Vec<Value>> = self
            .query(&query::related_articles(category, limit), exclude_slug)
            .await?;
        Ok(decode_related(items.unwrap_or_default()))
    }
}

/// 逐条解析相关文章，丢弃解析不了的条目
fn decode_related(items: Vec<Value>) -> Vec<RelatedItem> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(%e, "skip malformed related article");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let mut config = SanityConfig {
            project_id: "abc123".to_string(),
            ..Default::default()
        };
        let client = SanityClient::new(&config).expect("创建客户端失败");
        assert_eq!(
            client.endpoint().as_str(),
            "https://abc123.apicdn.sanity.io/v2023-05-03/data/query/production"
        );

        // 带 token 的请求不能走 CDN
        config.token = Some("secret".to_string());
        let client = SanityClient::new(&config).expect("创建客户端失败");
        assert_eq!(
            client.endpoint().host_str(),
            Some("abc123.api.sanity.io")
        );
    }

    #[test]
    fn test_decode_related_drops_bad_items() {
        let items = decode_related(vec![
            serde_json::json!({"title": "Good", "slug": "good", "readTime": "bad"}),
            serde_json::json!("not an object"),
            serde_json::json!(null),
            serde_json::json!({"title": "Also good", "slug": "also-good", "readTime": 3}),
        ]);

        let slugs: Vec<_> = items.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["good", "also-good"]);
        assert_eq!(items[0].read_time, None);
        assert_eq!(items[1].read_time, Some(3.0));
    }

    #[test]
    fn test_invalid_token() {
        let config = SanityConfig {
            project_id: "abc123".to_string(),
            token: Some("bad\ntoken".to_string()),
            ..Default::default()
        };
        assert!(matches!(SanityClient::new(&config), Err(Error::Config(_))));
    }
}
