//! Staff side navigation.
//!
//! Organized in display order:
//! 1. Dashboard, Appointments, Reminders (always visible)
//! 2. Inventory (gated by `staff_can_receive`)
//! 3. Account (always visible)

use super::types::FeatureGate;
use crate::routes::Route;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub route: Route,
    pub label: &'static str,
    pub always_visible: bool,
    /// Active only on an exact path match rather than on any sub-path.
    pub exact: bool,
}

impl NavItem {
    const fn visible(route: Route, label: &'static str) -> Self {
        Self {
            route,
            label,
            always_visible: true,
            exact: false,
        }
    }

    #[must_use]
    pub fn path(&self) -> &'static str {
        self.route.path()
    }

    #[must_use]
    pub fn is_active(&self, pathname: &str) -> bool {
        let path = self.path();
        if self.exact {
            pathname == path
        } else {
            pathname == path
                || pathname
                    .strip_prefix(path)
                    .is_some_and(|rest| rest.starts_with('/'))
        }
    }
}

const STAFF_MENU: [NavItem; 5] = [
    NavItem {
        route: Route::Staff,
        label: "Dashboard",
        always_visible: true,
        exact: true,
    },
    NavItem::visible(Route::StaffAppointments, "Appointments"),
    NavItem::visible(Route::StaffReminders, "Reminders"),
    NavItem {
        route: Route::StaffInventory,
        label: "Inventory",
        always_visible: false,
        exact: false,
    },
    NavItem::visible(Route::StaffProfile, "Account"),
];

/// Ordered, already-filtered menu for one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationModel {
    items: Vec<NavItem>,
}

impl NavigationModel {
    /// Builds the staff menu. Conditional entries are dropped unless the gate allows them.
    #[must_use]
    pub fn staff(gate: FeatureGate) -> Self {
        let items = STAFF_MENU
            .iter()
            .filter(|item| item.always_visible || gate.allows())
            .copied()
            .collect();
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    #[must_use]
    pub fn contains(&self, route: Route) -> bool {
        self.items.iter().any(|item| item.route == route)
    }

    /// The entry highlighted for `pathname`, if any.
    #[must_use]
    pub fn active(&self, pathname: &str) -> Option<&NavItem> {
        self.items.iter().find(|item| item.is_active(pathname))
    }
}

impl fmt::Display for NavigationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{:<14} {}", item.label, item.path())?;
        }
        Ok(())
    }
}
