pub mod adapter;
pub mod bridge;
pub mod coordinator;
pub mod intent;
pub mod normalizer;
pub mod sdk;
pub mod types;

pub use adapter::{adapter_for, RegistrationAdapter};
pub use bridge::{BridgeEmitter, BridgeMessage, BridgeSink, ChannelBridge};
pub use coordinator::RegistrationCoordinator;
pub use intent::{IntentParser, IntentPayloadExtractor, LaunchIntent, OpaqueBundleParser};
pub use sdk::{SimulatedSdk, TokenResult, VendorSdk};
pub use types::{
    CredentialField, DeviceType, LaunchPayloadMode, PushVendor, RegistrationRecord, VendorPhase,
};
