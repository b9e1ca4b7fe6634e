use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::conversion::DEFAULT_DECIMALS;
use crate::quantity::Category;
use crate::units::*;

/// 기본 설정 파일 경로.
pub const CONFIG_FILE: &str = "config.toml";

/// 각 물리량별 기본 입력/변환 단위 설정을 담는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultUnits {
    pub length_from: LengthUnit,
    pub length_to: LengthUnit,
    pub temperature_from: TemperatureUnit,
    pub temperature_to: TemperatureUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self {
            length_from: LengthUnit::Meters,
            length_to: LengthUnit::Feet,
            temperature_from: TemperatureUnit::Celsius,
            temperature_to: TemperatureUnit::Fahrenheit,
        }
    }
}

impl DefaultUnits {
    /// 카테고리의 기본 (입력, 변환) 단위 이름.
    pub fn names_for(&self, category: Category) -> (&'static str, &'static str) {
        match category {
            Category::Length => (self.length_from.name(), self.length_to.name()),
            Category::Temperature => (self.temperature_from.name(), self.temperature_to.name()),
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `auto` 이면 시스템 로케일을 따른다.
    pub language: String,
    pub language_pack_dir: Option<String>,
    pub decimals: usize,
    pub default_category: Category,
    pub default_units: DefaultUnits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            decimals: DEFAULT_DECIMALS,
            default_category: Category::Length,
            default_units: DefaultUnits::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(CONFIG_FILE)
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값으로 새로 만든다.
pub fn load_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        tracing::info!(path = %path.display(), "default config created");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 지정한 경로(보통 config.toml)에 저장한다.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
