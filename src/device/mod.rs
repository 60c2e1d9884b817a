//! Authoring-environment snapshot captured when a comment is created.
//!
//! Parsing a user-agent string is the host's job; this crate only consumes the
//! finished [`DeviceContext`] through [`DeviceInfoSource`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceContext {
    pub user_agent: String,
    pub os: String,
    pub browser: String,
    pub browser_version: String,
    pub device_type: DeviceClass,
    pub language: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub hardware_concurrency: u32,
}

impl DeviceContext {
    pub fn browser_label(&self) -> String {
        format!("{} {}", self.browser, self.browser_version)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    #[default]
    Desktop,
    Mobile,
}

/// Synchronous, side-effect free producer of the current device snapshot.
pub trait DeviceInfoSource {
    fn device_info(&self) -> DeviceContext;
}

impl<F> DeviceInfoSource for F
where
    F: Fn() -> DeviceContext,
{
    fn device_info(&self) -> DeviceContext {
        self()
    }
}

/// Returns the same snapshot on every call.
#[derive(Debug, Clone)]
pub struct StaticDeviceInfo {
    context: DeviceContext,
}

impl StaticDeviceInfo {
    pub const fn new(context: DeviceContext) -> Self {
        Self { context }
    }

    /// Snapshot for a host that cannot report anything about itself.
    pub fn unknown(screen_width: u32, screen_height: u32) -> Self {
        Self::new(DeviceContext {
            user_agent: String::new(),
            os: UNKNOWN.to_string(),
            browser: UNKNOWN.to_string(),
            browser_version: UNKNOWN.to_string(),
            device_type: DeviceClass::Desktop,
            language: UNKNOWN.to_string(),
            screen_width,
            screen_height,
            hardware_concurrency: std::thread::available_parallelism()
                .map(|count| u32::try_from(count.get()).unwrap_or(u32::MAX))
                .unwrap_or(0),
        })
    }
}

impl DeviceInfoSource for StaticDeviceInfo {
    fn device_info(&self) -> DeviceContext {
        self.context.clone()
    }
}

const UNKNOWN: &str = "Unknown";
