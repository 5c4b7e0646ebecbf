use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::registration::types::{CredentialField, PushVendor};

/// 单个厂商的凭证
///
/// 按厂商不同，必需字段也不同（由对应 Adapter 声明）；
/// 未配置与配置为空串等价，都视为缺失。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VendorCredentials {
    pub app_id: Option<String>,
    pub app_key: Option<String>,
    pub app_secret: Option<String>,
}

impl VendorCredentials {
    pub fn get(&self, field: CredentialField) -> Option<&str> {
        match field {
            CredentialField::AppId => self.app_id.as_deref(),
            CredentialField::AppKey => self.app_key.as_deref(),
            CredentialField::AppSecret => self.app_secret.as_deref(),
        }
    }
}

/// 日志配置段
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<String>,
}

/// 聚合器配置
///
/// 优先级：命令行 > 环境变量 > 配置文件 > 默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// 启用的厂商列表（fcm / hms / mi / mz / oppo / vivo / honor）
    pub enabled_vendors: Vec<String>,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 各厂商凭证
    pub fcm: VendorCredentials,
    pub hms: VendorCredentials,
    pub mi: VendorCredentials,
    pub mz: VendorCredentials,
    pub oppo: VendorCredentials,
    pub vivo: VendorCredentials,
    pub honor: VendorCredentials,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            enabled_vendors: vec![],
            logging: LoggingConfig::default(),
            fcm: VendorCredentials::default(),
            hms: VendorCredentials::default(),
            mi: VendorCredentials::default(),
            mz: VendorCredentials::default(),
            oppo: VendorCredentials::default(),
            vivo: VendorCredentials::default(),
            honor: VendorCredentials::default(),
        }
    }
}

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "pushbridge.toml";

impl PushConfig {
    /// 加载配置（按优先级：命令行 > 环境变量 > 配置文件 > 默认值）
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match cli.config_file.as_deref() {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides();

        if let Some(vendors) = &cli.vendors {
            config.enabled_vendors = vendors.clone();
        }

        Ok(config)
    }

    /// 从 TOML 文件加载
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path))?;
        info!("📄 Loaded config from {}", path);
        Ok(config)
    }

    /// 应用 PUSHBRIDGE_* 环境变量覆盖
    fn apply_env_overrides(&mut self) {
        if let Ok(vendors) = env::var("PUSHBRIDGE_VENDORS") {
            self.enabled_vendors = vendors
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        for vendor in PushVendor::ALL {
            let prefix = format!("PUSHBRIDGE_{}", vendor.as_str().to_uppercase());
            let credentials = self.credentials_mut(vendor);
            if let Ok(v) = env::var(format!("{}_APP_ID", prefix)) {
                credentials.app_id = Some(v);
            }
            if let Ok(v) = env::var(format!("{}_APP_KEY", prefix)) {
                credentials.app_key = Some(v);
            }
            if let Ok(v) = env::var(format!("{}_APP_SECRET", prefix)) {
                credentials.app_secret = Some(v);
            }
        }
    }

    pub fn credentials(&self, vendor: PushVendor) -> &VendorCredentials {
        match vendor {
            PushVendor::Fcm => &self.fcm,
            PushVendor::Hms => &self.hms,
            PushVendor::Mi => &self.mi,
            PushVendor::Mz => &self.mz,
            PushVendor::Oppo => &self.oppo,
            PushVendor::Vivo => &self.vivo,
            PushVendor::Honor => &self.honor,
        }
    }

    fn credentials_mut(&mut self, vendor: PushVendor) -> &mut VendorCredentials {
        match vendor {
            PushVendor::Fcm => &mut self.fcm,
            PushVendor::Hms => &mut self.hms,
            PushVendor::Mi => &mut self.mi,
            PushVendor::Mz => &mut self.mz,
            PushVendor::Oppo => &mut self.oppo,
            PushVendor::Vivo => &mut self.vivo,
            PushVendor::Honor => &mut self.honor,
        }
    }

    /// 解析启用的厂商列表，未知名字只警告不报错
    pub fn enabled(&self) -> Vec<PushVendor> {
        let mut vendors = Vec::new();
        for name in &self.enabled_vendors {
            match PushVendor::from_str(name) {
                Some(vendor) if !vendors.contains(&vendor) => vendors.push(vendor),
                Some(_) => {}
                None => warn!("⚠️ unknown vendor `{}` in enabled_vendors, ignored", name),
            }
        }
        vendors
    }

    /// 校验配置可用性
    ///
    /// 未知厂商名是错误；凭证缺失不是——注册时按厂商本地失败处理，
    /// 一家配置不全不应该拦住其它家。
    pub fn validate(&self) -> Result<()> {
        for name in &self.enabled_vendors {
            if PushVendor::from_str(name).is_none() {
                anyhow::bail!("unknown vendor in enabled_vendors: {}", name);
            }
        }
        Ok(())
    }

    /// generate-config 子命令输出的模板
    pub fn default_toml() -> &'static str {
        r#"# pushbridge 配置文件
# 此文件由 pushbridge generate-config 生成

# 启用的厂商：fcm / hms / mi / mz / oppo / vivo / honor
enabled_vendors = ["fcm"]

[logging]
level = "info"      # trace / debug / info / warn / error
format = "compact"  # compact / pretty / json

# 各厂商凭证；必需字段因厂商而异，缺失时该厂商注册本地失败，不影响其它家
[mi]
app_id = ""
app_key = ""

[mz]
app_id = ""
app_key = ""

[oppo]
app_key = ""
app_secret = ""

[vivo]
app_id = ""
app_key = ""

[honor]
app_id = ""

# fcm / hms 的凭证走各自 SDK 的配置文件，这里无需填写
[fcm]
[hms]
"#
    }
}

/// 提前读取 [logging] 段（完整配置加载前初始化日志用）
pub fn load_early_logging_config(path: Option<&str>) -> LoggingConfig {
    let path = match path {
        Some(p) => p.to_string(),
        None => DEFAULT_CONFIG_FILE.to_string(),
    };

    fs::read_to_string(&path)
        .ok()
        .and_then(|content| toml::from_str::<PushConfig>(&content).ok())
        .map(|config| config.logging)
        .unwrap_or_default()
}
