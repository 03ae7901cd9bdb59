use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::Error;

/// 文章分类
///
/// 每个分类在内容仓库中对应一个文档类型（`_type`），
/// 同时也是页面路由的第一段路径。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Business,
    FoodAndDrink,
    HealthAndFitness,
    #[serde(rename = "news-and-currentaffairs")]
    NewsAndCurrentAffairs,
    Sports,
    TechAndInnovation,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Business,
        Category::FoodAndDrink,
        Category::HealthAndFitness,
        Category::NewsAndCurrentAffairs,
        Category::Sports,
        Category::TechAndInnovation,
    ];

    /// 内容仓库中的文档类型标签
    pub fn tag(self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::FoodAndDrink => "food-and-drink",
            Category::HealthAndFitness => "health-and-fitness",
            Category::NewsAndCurrentAffairs => "news-and-currentaffairs",
            Category::Sports => "sports",
            Category::TechAndInnovation => "tech-and-innovation",
        }
    }

    /// 路由路径段，与标签一致
    pub fn route(self) -> &'static str {
        self.tag()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Business => "Business",
            Category::FoodAndDrink => "Food & Drink",
            Category::HealthAndFitness => "Health & Fitness",
            Category::NewsAndCurrentAffairs => "News & Current Affairs",
            Category::Sports => "Sports",
            Category::TechAndInnovation => "Tech & Innovation",
        }
    }

    /// 某篇文章的站内路径，如 `/sports/final-whistle`
    pub fn article_path(self, slug: &str) -> String {
        format!("/{}/{}", self.route(), slug)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.route() == s)
            .ok_or(Error::NotFound)
    }
}
