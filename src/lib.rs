pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod registration;

pub use config::{PushConfig, VendorCredentials};
pub use error::{BridgeError, Result};
pub use registration::{
    adapter_for, BridgeEmitter, BridgeMessage, BridgeSink, ChannelBridge, IntentParser,
    IntentPayloadExtractor, LaunchIntent, OpaqueBundleParser, PushVendor, RegistrationAdapter,
    RegistrationCoordinator, RegistrationRecord, SimulatedSdk, VendorPhase, VendorSdk,
};
