use crate::registration::adapter::adapter_trait::RegistrationAdapter;
use crate::registration::types::{CredentialField, PushVendor};

/// 荣耀推送适配器
///
/// 注册前需要探测设备是否带荣耀推送内核；成功码 0。
pub struct HonorAdapter;

impl RegistrationAdapter for HonorAdapter {
    fn vendor(&self) -> PushVendor {
        PushVendor::Honor
    }

    fn requires_probe(&self) -> bool {
        true
    }

    fn required_credentials(&self) -> &'static [CredentialField] {
        &[CredentialField::AppId]
    }
}
