use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{Error, Result};

/// 服务配置
///
/// 从 TOML 文件读取（路径取自 `PRESSROOM_CONFIG`，默认 `pressroom.toml`），
/// 文件不存在时全部使用默认值，随后再用环境变量覆盖。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 监听地址
    pub listen: String,
    /// 站点对外地址，用于拼接分享链接
    pub site_url: String,
    /// 静态资源目录，占位图放在这里
    pub public_dir: PathBuf,
    pub sanity: SanityConfig,
    pub assets: AssetConfig,
}

/// 内容仓库（Sanity）连接参数
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SanityConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
    pub token: Option<String>,
}

/// 缺图时使用的占位资源
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub placeholder_image: String,
    pub default_avatar: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
            site_url: "http://localhost:3000".to_string(),
            public_dir: PathBuf::from("public"),
            sanity: Default::default(),
            assets: Default::default(),
        }
    }
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: "production".to_string(),
            api_version: "2023-05-03".to_string(),
            use_cdn: true,
            token: None,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            placeholder_image: "/placeholder-image.jpg".to_string(),
            default_avatar: "/sa.png".to_string(),
        }
    }
}

impl Config {
    /// 按 `PRESSROOM_CONFIG` 指定的路径加载配置
    pub fn load() -> Result<Self> {
        let path = env::var("PRESSROOM_CONFIG").unwrap_or_else(|_| "pressroom.toml".to_string());
        let mut config = Self::from_file(path)?;
        config.apply_env(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// 读取 TOML 配置文件，文件不存在时返回默认配置
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(Error::Config(format!("{}: {}", path.display(), e))),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.message().to_string()))
    }

    /// 用环境变量覆盖文件中的值
    ///
    /// `lookup` 抽出来便于测试时不污染进程环境。
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("SANITY_PROJECT_ID") {
            self.sanity.project_id = v;
        }
        if let Some(v) = lookup("SANITY_DATASET") {
            self.sanity.dataset = v;
        }
        if let Some(v) = lookup("SANITY_TOKEN") {
            self.sanity.token = Some(v).filter(|t| !t.is_empty());
        }
        if let Some(v) = lookup("PRESSROOM_LISTEN") {
            self.listen = v;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sanity.project_id.trim().is_empty() {
            return Err(Error::Config("sanity.project_id is not set".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = Config::parse(
            r#"
site_url = "https://example.com"

[sanity]
project_id = "abc123"
"#,
        )
        .expect("解析失败");

        assert_eq!(config.site_url, "https://example.com");
        assert_eq!(config.listen, "0.0.0.0:3000");
        assert_eq!(config.sanity.project_id, "abc123");
        assert_eq!(config.sanity.dataset, "production");
        assert!(config.sanity.use_cdn);
        assert_eq!(config.assets.placeholder_image, "/placeholder-image.jpg");
        assert_eq!(config.assets.default_avatar, "/sa.png");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("创建临时文件失败");
        writeln!(
            file,
            "listen = \"127.0.0.1:8080\"\n[sanity]\nproject_id = \"p1\"\ndataset = \"staging\""
        )
        .expect("写入失败");

        let config = Config::from_file(file.path()).expect("读取失败");
        assert_eq!(config.listen, "127.0.0.1:8080");
        assert_eq!(config.sanity.dataset, "staging");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let config = Config::from_file(dir.path().join("nope.toml")).expect("读取失败");
        assert!(config.sanity.project_id.is_empty());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::parse("listen = ["),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            "SANITY_PROJECT_ID" => Some("fromenv".to_string()),
            "SANITY_TOKEN" => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.sanity.project_id, "fromenv");
        assert_eq!(config.sanity.token, None);
        assert!(config.validate().is_ok());
    }
}
