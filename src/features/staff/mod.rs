//! Staff area: the capability-gated menu and the logout sequence. Menu
//! membership is a UX concern only; the API must still enforce access to every
//! staff route.

pub mod client;
pub mod navigation;
pub mod navigator;
pub mod types;

pub use navigation::{NavItem, NavigationModel};
pub use navigator::{logout, StaffNavigator};
pub use types::{FeatureFlags, FeatureGate};
