//! Bottom navigation shell shared by every signed-in page.

use serde::Serialize;
use utoipa::ToSchema;

use crate::views::dashboard::DASHBOARD_PATH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTab {
    Home,
    Withdraw,
    Wallet,
    Profile,
}

impl NavTab {
    pub const ALL: [NavTab; 4] = [NavTab::Home, NavTab::Withdraw, NavTab::Wallet, NavTab::Profile];

    pub fn label(&self) -> &'static str {
        match self {
            NavTab::Home => "Home",
            NavTab::Withdraw => "Withdraw",
            NavTab::Wallet => "Wallet",
            NavTab::Profile => "Profile",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            NavTab::Home => DASHBOARD_PATH,
            NavTab::Withdraw => "/withdraw",
            NavTab::Wallet => "/wallet",
            NavTab::Profile => "/profile",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NavTab::Home => "home",
            NavTab::Withdraw => "trending-up",
            NavTab::Wallet => "wallet",
            NavTab::Profile => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NavItem {
    pub label: String,
    pub path: String,
    pub icon: String,
    pub active: bool,
}

/// Tabs in display order. A tab is active only when `current_path` equals its path exactly.
pub fn bottom_navigation(current_path: &str) -> Vec<NavItem> {
    NavTab::ALL
        .iter()
        .map(|tab| NavItem {
            label: tab.label().to_string(),
            path: tab.path().to_string(),
            icon: tab.icon().to_string(),
            active: tab.path() == current_path,
        })
        .collect()
}
