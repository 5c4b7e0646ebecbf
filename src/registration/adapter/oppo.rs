use crate::registration::adapter::adapter_trait::RegistrationAdapter;
use crate::registration::types::{CredentialField, LaunchPayloadMode, PushVendor};

/// OPPO (Heytap) 推送适配器
///
/// 注册前必须探测设备支持；成功码 0。点击数据不走约定字段，
/// 用整包 extras 兜底解析。
pub struct OppoAdapter;

impl RegistrationAdapter for OppoAdapter {
    fn vendor(&self) -> PushVendor {
        PushVendor::Oppo
    }

    fn requires_probe(&self) -> bool {
        true
    }

    fn required_credentials(&self) -> &'static [CredentialField] {
        &[CredentialField::AppKey, CredentialField::AppSecret]
    }

    fn launch_payload_mode(&self) -> LaunchPayloadMode {
        LaunchPayloadMode::OpaqueBundle
    }
}
