//! Screens served to the mobile client.
//!
//! Each screen is resolved into a plain view model first ([`landing`], [`dashboard`],
//! [`navigation`]) and only then rendered, either as HTML through [`render`] or as JSON by the API
//! handlers. The view models hold no references to request or database state.

pub mod dashboard;
pub mod landing;
pub mod navigation;
pub mod render;
