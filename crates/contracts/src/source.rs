//! GazeSource trait - eye-tracker data source abstraction
//!
//! Defines a unified interface for push-style gaze data sources, decoupling
//! the recorder from concrete driver SDKs. Real hardware and mock devices
//! implement the same API.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::ContractError;

/// Gaze data callback type
///
/// The driver invokes this on its own thread for every sample it produces.
/// Uses `Arc` so the callback can be shared across contexts.
pub type GazeDataCallback = Arc<dyn Fn(BTreeMap<String, f64>) + Send + Sync>;

/// Push-style gaze data source
///
/// # Design Principles
///
/// 1. **Decoupling**: separates sample production from sample consumption
/// 2. **Unified Interface**: mock and real devices use the same API
/// 3. **Callback Pattern**: push callbacks, consistent with hardware driver
///    SDKs, rather than channels
pub trait GazeSource: Send + Sync {
    /// Stable identifier of the device (serial number or mock id)
    fn device_id(&self) -> &str;

    /// Register the sample callback and start pushing
    ///
    /// Failures are fatal setup errors; the recorder does not retry.
    /// If already subscribed, a repeated call must be idempotent.
    fn subscribe(&self, callback: GazeDataCallback) -> Result<(), ContractError>;

    /// Cancel the subscription and stop pushing
    ///
    /// Failures propagate as fatal errors to the controller layer.
    fn unsubscribe(&self) -> Result<(), ContractError>;

    /// Whether a subscription is currently active
    fn is_subscribed(&self) -> bool;
}
