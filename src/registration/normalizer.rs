use uuid::Uuid;

use crate::registration::types::{DeviceType, PushVendor, RegistrationRecord};

/// 设备信息归一化
///
/// `(厂商, token)` → 标准注册记录。纯函数，除生成 UUID / 读时区外无副作用。
/// installationId 每次调用重新生成：当前没有消费方依赖它的稳定性，
/// 长连接建立后刷新该值也没有影响。
pub fn normalize(vendor: PushVendor, token: &str) -> RegistrationRecord {
    RegistrationRecord {
        device_type: DeviceType::Android,
        vendor,
        registration_id: token.to_string(),
        installation_id: Uuid::new_v4(),
        time_zone: device_time_zone(),
    }
}

/// 当前设备的 IANA 时区名，取不到时退回 Etc/UTC
pub fn device_time_zone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "Etc/UTC".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_fields() {
        let record = normalize(PushVendor::Vivo, "tok-1");
        assert_eq!(record.device_type, DeviceType::Android);
        assert_eq!(record.vendor, PushVendor::Vivo);
        assert_eq!(record.registration_id, "tok-1");
        assert!(!record.time_zone.is_empty());
    }

    #[test]
    fn test_installation_id_not_stable() {
        // 相同输入连续两次归一化，installationId 必须不同
        let a = normalize(PushVendor::Mi, "abc123");
        let b = normalize(PushVendor::Mi, "abc123");
        assert_ne!(a.installation_id, b.installation_id);
    }
}
