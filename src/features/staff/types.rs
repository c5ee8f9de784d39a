use crate::features::auth::types::is_truthy;
use serde_json::Value;

/// Server-controlled switches read by the staff area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub staff_can_receive: bool,
}

impl FeatureFlags {
    /// Reads the inventory settings payload. Absent or falsy fields disable the
    /// feature; every other field is ignored.
    #[must_use]
    pub fn from_settings(settings: &Value) -> Self {
        Self {
            staff_can_receive: settings.get("staff_can_receive").is_some_and(is_truthy),
        }
    }
}

/// Entitlement state for one navigator mount. Starts denied and unresolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureGate {
    pub resolved: bool,
    pub entitled: bool,
}

impl FeatureGate {
    #[must_use]
    pub const fn resolved(entitled: bool) -> Self {
        Self {
            resolved: true,
            entitled,
        }
    }

    /// The gated entry is shown only once entitlement is confirmed.
    #[must_use]
    pub const fn allows(self) -> bool {
        self.resolved && self.entitled
    }
}
