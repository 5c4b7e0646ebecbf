pub mod adapter_trait;
pub mod fcm;
pub mod hms;
pub mod honor;
pub mod mi;
pub mod mz;
pub mod oppo;
pub mod vivo;

use std::sync::Arc;

use crate::registration::types::PushVendor;

pub use adapter_trait::RegistrationAdapter;
pub use fcm::FcmAdapter;
pub use hms::HmsAdapter;
pub use honor::HonorAdapter;
pub use mi::MiAdapter;
pub use mz::MzAdapter;
pub use oppo::OppoAdapter;
pub use vivo::VivoAdapter;

/// 按厂商取适配器
pub fn adapter_for(vendor: PushVendor) -> Arc<dyn RegistrationAdapter> {
    match vendor {
        PushVendor::Fcm => Arc::new(FcmAdapter),
        PushVendor::Hms => Arc::new(HmsAdapter),
        PushVendor::Mi => Arc::new(MiAdapter),
        PushVendor::Mz => Arc::new(MzAdapter),
        PushVendor::Oppo => Arc::new(OppoAdapter),
        PushVendor::Vivo => Arc::new(VivoAdapter),
        PushVendor::Honor => Arc::new(HonorAdapter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::types::LaunchPayloadMode;

    #[test]
    fn test_adapter_factory_covers_all_vendors() {
        for vendor in PushVendor::ALL {
            assert_eq!(adapter_for(vendor).vendor(), vendor);
        }
    }

    #[test]
    fn test_default_translation() {
        let adapter = MiAdapter;
        assert_eq!(adapter.on_token(0, Some("abc123")), Some("abc123".to_string()));
        assert_eq!(adapter.on_token(-1, Some("abc123")), None);
        assert_eq!(adapter.on_token(0, Some("")), None);
        assert_eq!(adapter.on_token(0, None), None);
    }

    #[test]
    fn test_meizu_success_convention() {
        let adapter = MzAdapter;
        assert_eq!(adapter.on_token(200, Some("pid")), Some("pid".to_string()));
        assert_eq!(adapter.on_token(0, Some("pid")), None);
    }

    #[test]
    fn test_fcm_ignores_code() {
        let adapter = FcmAdapter;
        assert_eq!(adapter.on_token(-7, Some("tok")), Some("tok".to_string()));
        assert_eq!(adapter.on_token(0, None), None);
    }

    #[test]
    fn test_opaque_bundle_vendors() {
        assert_eq!(
            OppoAdapter.launch_payload_mode(),
            LaunchPayloadMode::OpaqueBundle
        );
        assert_eq!(
            VivoAdapter.launch_payload_mode(),
            LaunchPayloadMode::OpaqueBundle
        );
        assert_eq!(MiAdapter.launch_payload_mode(), LaunchPayloadMode::Structured);
    }
}
