use crate::registration::adapter::adapter_trait::RegistrationAdapter;
use crate::registration::types::{CredentialField, LaunchPayloadMode, PushVendor};

/// vivo 推送适配器
///
/// 打开推送开关即注册，状态回调 0 表示成功，随后取 regId。
/// 点击数据同样走整包 extras 兜底。
pub struct VivoAdapter;

impl RegistrationAdapter for VivoAdapter {
    fn vendor(&self) -> PushVendor {
        PushVendor::Vivo
    }

    fn requires_probe(&self) -> bool {
        true
    }

    fn required_credentials(&self) -> &'static [CredentialField] {
        &[CredentialField::AppId, CredentialField::AppKey]
    }

    fn launch_payload_mode(&self) -> LaunchPayloadMode {
        LaunchPayloadMode::OpaqueBundle
    }
}
