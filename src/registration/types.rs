use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 设备平台（目前只有 Android 厂商通道）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Android,
}

/// 推送厂商
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PushVendor {
    Fcm,
    Hms,
    Mi,
    Mz,
    Oppo,
    Vivo,
    Honor,
}

impl PushVendor {
    pub const ALL: [PushVendor; 7] = [
        PushVendor::Fcm,
        PushVendor::Hms,
        PushVendor::Mi,
        PushVendor::Mz,
        PushVendor::Oppo,
        PushVendor::Vivo,
        PushVendor::Honor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PushVendor::Fcm => "fcm",
            PushVendor::Hms => "hms",
            PushVendor::Mi => "mi",
            PushVendor::Mz => "mz",
            PushVendor::Oppo => "oppo",
            PushVendor::Vivo => "vivo",
            PushVendor::Honor => "honor",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fcm" => Some(PushVendor::Fcm),
            "hms" | "huawei" => Some(PushVendor::Hms),
            "mi" | "xiaomi" => Some(PushVendor::Mi),
            "mz" | "meizu" => Some(PushVendor::Mz),
            "oppo" | "heytap" => Some(PushVendor::Oppo),
            "vivo" => Some(PushVendor::Vivo),
            "honor" => Some(PushVendor::Honor),
            _ => None,
        }
    }
}

impl std::fmt::Display for PushVendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 厂商凭证字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    AppId,
    AppKey,
    AppSecret,
}

impl CredentialField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialField::AppId => "app_id",
            CredentialField::AppKey => "app_key",
            CredentialField::AppSecret => "app_secret",
        }
    }
}

/// 归一化的设备注册记录
///
/// 以 camelCase JSON 投递给宿主桥：
/// `{"deviceType":"android","vendor":"mi","registrationId":"...","installationId":"...","timeZone":"Asia/Shanghai"}`
///
/// installationId 每次注册重新生成，不是稳定的设备标识；
/// 长期身份由宿主侧的长连接另行建立。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub device_type: DeviceType,
    pub vendor: PushVendor,
    /// 厂商下发的不透明 token，投递前必须非空
    pub registration_id: String,
    pub installation_id: Uuid,
    /// IANA 时区名
    pub time_zone: String,
}

/// 单个厂商的注册状态机
///
/// `Uninitialized → Initializing → (Probing →) Registering → 终态`
/// 终态不会自动重试；调用方再次发起注册视为主动重试，状态机重新开始。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorPhase {
    Uninitialized,
    Initializing,
    Probing,
    Registering,
    Registered,
    Failed,
    Unsupported,
}

impl VendorPhase {
    /// 是否处于终态
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            VendorPhase::Registered | VendorPhase::Failed | VendorPhase::Unsupported
        )
    }

    /// 是否有一次注册正在进行中
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            VendorPhase::Initializing | VendorPhase::Probing | VendorPhase::Registering
        )
    }
}

/// 通知点击数据的提取模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchPayloadMode {
    /// 点击数据放在约定的 `content` 字段里
    Structured,
    /// 厂商（vivo / OPPO）不走约定字段，整包 extras 序列化兜底
    OpaqueBundle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_roundtrip() {
        for vendor in PushVendor::ALL {
            assert_eq!(PushVendor::from_str(vendor.as_str()), Some(vendor));
        }
        assert_eq!(PushVendor::from_str("HMS"), Some(PushVendor::Hms));
        assert_eq!(PushVendor::from_str("xiaomi"), Some(PushVendor::Mi));
        assert_eq!(PushVendor::from_str("apns"), None);
    }

    #[test]
    fn test_record_json_shape() {
        let record = RegistrationRecord {
            device_type: DeviceType::Android,
            vendor: PushVendor::Mi,
            registration_id: "abc123".to_string(),
            installation_id: Uuid::new_v4(),
            time_zone: "Asia/Shanghai".to_string(),
        };

        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["deviceType"], "android");
        assert_eq!(json["vendor"], "mi");
        assert_eq!(json["registrationId"], "abc123");
        assert_eq!(json["timeZone"], "Asia/Shanghai");
        assert!(json["installationId"].is_string());
    }

    #[test]
    fn test_phase_predicates() {
        assert!(VendorPhase::Registered.is_terminal());
        assert!(VendorPhase::Unsupported.is_terminal());
        assert!(!VendorPhase::Uninitialized.is_terminal());
        assert!(VendorPhase::Probing.is_in_flight());
        assert!(!VendorPhase::Failed.is_in_flight());
    }
}
