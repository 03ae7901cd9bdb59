//! GROQ 查询语句

use crate::content::Category;

/// 按 slug 取单篇文章，参数 `$slug`
pub fn article_by_slug(category: Category) -> String {
    format!(
        r#"*[_type == "{tag}" && slug.current == $slug][0] {{
  title,
  overview,
  "slug": slug.current,
  mainImage {{
    asset,
    alt
  }},
  content,
  authorName,
  authorAvatar {{
    asset {{
      _ref,
      _type,
      "url": @->url
    }}
  }},
  readTime,
  publishedDate
}}"#,
        tag = category.tag()
    )
}

/// 同分类下最近的 `limit` 篇文章，排除 `$slug`
pub fn related_articles(category: Category, limit: usize) -> String {
    format!(
        r#"*[_type == "{tag}" && slug.current != $slug] | order(_createdAt desc)[0...{limit}] {{
  title,
  "slug": slug.current,
  mainImage {{
    asset {{
      _ref,
      _type
    }}
  }},
  authorName,
  authorAvatar {{
    asset {{
      _ref,
      _type,
      "url": @->url
    }}
  }},
  readTime,
  publishedDate,
  _createdAt
}}"#,
        tag = category.tag(),
        limit = limit
    )
}
