use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::user_roles::AppRole;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoleCheckResponse {
    pub role: AppRole,
    pub granted: bool,
}
