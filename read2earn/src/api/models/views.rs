use serde::Deserialize;
use utoipa::IntoParams;

/// Path the bottom navigation is resolved for
#[derive(Debug, Deserialize, IntoParams)]
pub struct NavigationQuery {
    /// Current location, e.g. `/wallet`
    pub path: String,
}
