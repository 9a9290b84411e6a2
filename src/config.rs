use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub classify: ClassifyConfig,
    #[serde(default)]
    pub hold: HoldConfig,
    #[serde(default)]
    pub screen: ScreenConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

/// ジェスチャー分類の閾値（正規化座標）
#[derive(Debug, Deserialize, Clone)]
pub struct ClassifyConfig {
    /// ウサギ: 人差し指と中指の先端のX距離
    #[serde(default = "default_rabbit_spread")]
    pub rabbit_spread: f32,
    /// チョウ: 小指と人差し指の先端のX距離
    #[serde(default = "default_butterfly_spread")]
    pub butterfly_spread: f32,
    /// オオカミ: 親指と小指の先端のY距離
    #[serde(default = "default_wolf_tilt")]
    pub wolf_tilt: f32,
}

/// ホールド確定の設定
#[derive(Debug, Deserialize, Clone)]
pub struct HoldConfig {
    /// 同一ジェスチャーを保持する時間（ミリ秒）
    #[serde(default = "default_hold_duration_ms")]
    pub duration_ms: u64,
}

/// 画面遷移の設定
#[derive(Debug, Deserialize, Clone)]
pub struct ScreenConfig {
    /// リビール画面からスポットライトへの自動復帰（ミリ秒）
    #[serde(default = "default_auto_return_ms")]
    pub auto_return_ms: u64,
    /// 起動画面からスポットライトへの遷移待ち（ミリ秒）
    #[serde(default = "default_startup_delay_ms")]
    pub startup_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    /// デバッグスナップショット表示
    #[serde(default)]
    pub view: bool,
}

fn default_rabbit_spread() -> f32 { 0.05 }
fn default_butterfly_spread() -> f32 { 0.15 }
fn default_wolf_tilt() -> f32 { 0.15 }
fn default_hold_duration_ms() -> u64 { 2000 }
fn default_auto_return_ms() -> u64 { 3000 }
fn default_startup_delay_ms() -> u64 { 1500 }

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            rabbit_spread: default_rabbit_spread(),
            butterfly_spread: default_butterfly_spread(),
            wolf_tilt: default_wolf_tilt(),
        }
    }
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_hold_duration_ms(),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            auto_return_ms: default_auto_return_ms(),
            startup_delay_ms: default_startup_delay_ms(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self { view: false }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 設定ファイルが無い・壊れている場合はデフォルトで起動する
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(_) => Config::default(),
        }
    }
}
