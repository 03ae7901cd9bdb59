use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// 内容仓库中的一篇文章
///
/// 六个分类的文档结构完全一致，分类由查询时的 [`Category`](super::Category) 决定，
/// 不在文档本身上区分。仓库对缺失字段返回 `null`，所以这里几乎所有字段都是可选的；
/// 类型不对的字段按缺失处理，不会让整篇文档解析失败。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient")]
    pub main_image: Option<ImageRef>,
    /// 正文块，缺失时视为空
    #[serde(default, deserialize_with = "lenient_blocks")]
    pub content: Vec<Block>,
    #[serde(default, deserialize_with = "lenient")]
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub author_avatar: Option<ImageRef>,
    /// 阅读时长（分钟）
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub read_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub published_date: Option<String>,
}

/// 相关文章，不含正文
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedItem {
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient")]
    pub main_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub author_avatar: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub read_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub published_date: Option<String>,
    /// 仓库写入时间，用于排序
    #[serde(default, rename = "_createdAt", deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

/// 图片引用，`asset` 可能是资源引用，也可能已经展开成直链
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default, deserialize_with = "lenient")]
    pub asset: Option<AssetRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetRef {
    /// 形如 `image-<id>-<w>x<h>-<ext>`
    #[serde(default, rename = "_ref", deserialize_with = "lenient")]
    pub reference: Option<String>,
    #[serde(default, rename = "_type", deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}

/// 富文本正文中的一个块
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum Block {
    #[serde(rename = "block")]
    Text(TextBlock),
    #[serde(rename = "image")]
    Image(ImageBlock),
    /// 不认识的块类型，渲染时跳过
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(default)]
    pub style: Option<String>,
    /// `bullet` 或 `number`
    #[serde(default)]
    pub list_item: Option<String>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub children: Vec<Span>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub mark_defs: Vec<MarkDef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Span {
    #[serde(default, deserialize_with = "null_to_default")]
    pub text: String,
    /// 装饰（`strong`、`em`……）或 [`MarkDef`] 的 key
    #[serde(default, deserialize_with = "null_to_default")]
    pub marks: Vec<String>,
}

/// 注解定义，目前只有链接
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkDef {
    #[serde(default, rename = "_key")]
    pub key: String,
    #[serde(default, rename = "_type")]
    pub kind: String,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageBlock {
    #[serde(default)]
    pub asset: Option<AssetRef>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

impl TextBlock {
    /// 块内所有文本拼接
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn mark_def(&self, key: &str) -> Option<&MarkDef> {
        self.mark_defs.iter().find(|d| d.key == key)
    }
}

/// 类型不匹配时退回缺省值，`null` 也一样
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// 阅读时长，接受数字或数字字符串
fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// 逐块解析正文，解析不了的块记为 [`Block::Unknown`]
fn lenient_blocks<'de, D>(deserializer: D) -> Result<Vec<Block>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or(Block::Unknown))
        .collect())
}

/// 把 `null` 当作缺省值处理
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_document_with_nulls() {
        let doc: ContentDocument = serde_json::from_value(json!({
            "title": "Rates hold steady",
            "overview": null,
            "slug": "rates-hold",
            "mainImage": null,
            "content": null,
            "authorName": null,
            "authorAvatar": null,
            "readTime": null,
            "publishedDate": null
        }))
        .expect("反序列化失败");

        assert_eq!(doc.title, "Rates hold steady");
        assert!(doc.content.is_empty());
        assert!(doc.main_image.is_none());
        assert!(doc.read_time.is_none());
    }

    #[test]
    fn test_blocks() {
        let doc: ContentDocument = serde_json::from_value(json!({
            "title": "t",
            "content": [
                {
                    "_type": "block",
                    "_key": "a1",
                    "style": "h2",
                    "markDefs": [{"_key": "l1", "_type": "link", "href": "https://example.com"}],
                    "children": [
                        {"_type": "span", "text": "Hello ", "marks": []},
                        {"_type": "span", "text": "world", "marks": ["strong", "l1"]}
                    ]
                },
                {
                    "_type": "image",
                    "asset": {"_ref": "image-abc-10x20-png", "_type": "reference"},
                    "alt": "chart"
                },
                {"_type": "youtube", "url": "https://youtu.be/x"}
            ]
        }))
        .expect("反序列化失败");

        assert_eq!(doc.content.len(), 3);
        match &doc.content[0] {
            Block::Text(block) => {
                assert_eq!(block.style.as_deref(), Some("h2"));
                assert_eq!(block.plain_text(), "Hello world");
                assert_eq!(
                    block.mark_def("l1").and_then(|d| d.href.as_deref()),
                    Some("https://example.com")
                );
            }
            other => panic!("unexpected block {:?}", other),
        }
        match &doc.content[1] {
            Block::Image(image) => {
                assert_eq!(
                    image.asset.as_ref().and_then(|a| a.reference.as_deref()),
                    Some("image-abc-10x20-png")
                );
                assert_eq!(image.alt.as_deref(), Some("chart"));
            }
            other => panic!("unexpected block {:?}", other),
        }
        assert!(matches!(doc.content[2], Block::Unknown));
    }

    #[test]
    fn test_mistyped_fields_fall_back() {
        let doc: ContentDocument = serde_json::from_value(json!({
            "title": 42,
            "slug": "s",
            "overview": ["not", "text"],
            "mainImage": "image-abc-10x20-png",
            "authorName": {"first": "Sam"},
            "authorAvatar": {"asset": {"_ref": 7, "url": "https://x/y.png"}, "alt": false},
            "readTime": "7",
            "publishedDate": 20240305
        }))
        .expect("类型不对的字段不应导致解析失败");

        assert_eq!(doc.title, "");
        assert_eq!(doc.slug, "s");
        assert!(doc.overview.is_none());
        assert!(doc.main_image.is_none());
        assert!(doc.author_name.is_none());
        let avatar = doc.author_avatar.and_then(|a| a.asset).expect("头像应保留");
        assert!(avatar.reference.is_none());
        assert_eq!(avatar.url.as_deref(), Some("https://x/y.png"));
        assert_eq!(doc.read_time, Some(7.0));
        assert!(doc.published_date.is_none());
    }

    #[test]
    fn test_read_time_variants() {
        let parse = |v: serde_json::Value| {
            serde_json::from_value::<ContentDocument>(json!({"readTime": v}))
                .expect("解析失败")
                .read_time
        };
        assert_eq!(parse(json!(4.5)), Some(4.5));
        assert_eq!(parse(json!(" 12 ")), Some(12.0));
        assert_eq!(parse(json!("seven")), None);
        assert_eq!(parse(json!(true)), None);
    }

    #[test]
    fn test_bad_blocks_become_unknown() {
        let doc: ContentDocument = serde_json::from_value(json!({
            "title": "t",
            "content": [
                {"children": [{"text": "no type"}]},
                "just a string",
                {"_type": "block", "children": "oops"},
                {"_type": "block", "children": [{"text": "kept"}]}
            ]
        }))
        .expect("解析失败");

        assert_eq!(doc.content.len(), 4);
        assert!(matches!(doc.content[0], Block::Unknown));
        assert!(matches!(doc.content[1], Block::Unknown));
        assert!(matches!(doc.content[2], Block::Unknown));
        assert!(matches!(&doc.content[3], Block::Text(t) if t.plain_text() == "kept"));

        let doc: ContentDocument =
            serde_json::from_value(json!({"content": {"_type": "block"}})).expect("解析失败");
        assert!(doc.content.is_empty());
    }

    #[test]
    fn test_related_created_at() {
        let item: RelatedItem = serde_json::from_value(json!({
            "title": "t",
            "slug": "s",
            "_createdAt": "2024-03-05T10:00:00Z",
            "readTime": 4
        }))
        .expect("反序列化失败");

        assert_eq!(
            item.created_at.map(|t| t.to_rfc3339()),
            Some("2024-03-05T10:00:00+00:00".to_string())
        );
        assert_eq!(item.read_time, Some(4.0));
    }
}
