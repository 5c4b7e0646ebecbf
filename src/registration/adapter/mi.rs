use crate::registration::adapter::adapter_trait::RegistrationAdapter;
use crate::registration::types::{CredentialField, PushVendor};

/// 小米 MiPush 适配器
///
/// 注册结果通过命令回调下发，成功码 0，regId 在回调参数里。
pub struct MiAdapter;

impl RegistrationAdapter for MiAdapter {
    fn vendor(&self) -> PushVendor {
        PushVendor::Mi
    }

    fn required_credentials(&self) -> &'static [CredentialField] {
        &[CredentialField::AppId, CredentialField::AppKey]
    }
}
