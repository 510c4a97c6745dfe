//! HTTP surface: handlers and the request/response types they exchange.
//!
//! - **Pages** (`/`, `/dashboard`): server-rendered HTML
//! - **Views** (`/api/v1/landing`, `/api/v1/dashboard`, `/api/v1/navigation`): the same screens as JSON
//! - **Caller data** (`/api/v1/profile`, `/api/v1/articles`, `/api/v1/reading-history`,
//!   `/api/v1/withdrawals`, `/api/v1/notification-settings`, `/api/v1/users/current/roles/*`)
//! - **Admin** (`/api/v1/system-config`, `/api/v1/api-keys`)
//!
//! JSON endpoints are documented with `utoipa`; the rendered docs live at `/api/docs`.

pub mod handlers;
pub mod models;
