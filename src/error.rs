use std::error::Error as StdError;
use std::fmt;

use crate::registration::types::{CredentialField, PushVendor};

/// 聚合器错误类型
///
/// 所有注册失败都是厂商本地的：协调器自行记录日志并落入终态，
/// 不会把错误抛给调用方（见 `RegistrationCoordinator::register`）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// 必需凭证缺失或为空
    CredentialMissing {
        vendor: PushVendor,
        field: CredentialField,
    },
    /// 设备不支持该厂商通道（能力探测失败）
    UnsupportedDevice(PushVendor),
    /// 厂商回调返回非成功码，或 token 为空
    RegistrationFailed { vendor: PushVendor, code: i32 },
    /// SDK 初始化失败
    SdkInit { vendor: PushVendor, message: String },
    /// 序列化错误
    Serialization(String),
    /// 配置错误
    Configuration(String),
    /// IO 错误
    Io(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::CredentialMissing { vendor, field } => {
                write!(f, "{} credential `{}` is empty", vendor, field.as_str())
            }
            BridgeError::UnsupportedDevice(vendor) => {
                write!(f, "this device doesn't support {} push", vendor)
            }
            BridgeError::RegistrationFailed { vendor, code } => {
                write!(f, "{} registration failed with code {}", vendor, code)
            }
            BridgeError::SdkInit { vendor, message } => {
                write!(f, "{} sdk init failed: {}", vendor, message)
            }
            BridgeError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            BridgeError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            BridgeError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl StdError for BridgeError {}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Io(err.to_string())
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, BridgeError>;
