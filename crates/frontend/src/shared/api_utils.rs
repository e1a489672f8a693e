//! API utilities for dashboard-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Backend address used while developing against a local backend
pub const LOCAL_BACKEND: &str = "http://localhost:5000";

/// Get the base URL for API requests
///
/// Resolves the base from the current window location. Served from
/// `localhost`, the dashboard talks to the local backend on port 5000;
/// everywhere else requests stay same-origin.
///
/// # Returns
/// - `"http://localhost:5000"` on localhost
/// - Empty string (relative paths) otherwise, or if window is not available
pub fn api_base() -> String {
    let hostname = web_sys::window().and_then(|w| w.location().hostname().ok());
    resolve_api_base(hostname.as_deref())
}

/// Pure part of [`api_base`]
pub fn resolve_api_base(hostname: Option<&str>) -> String {
    match hostname {
        Some("localhost") => LOCAL_BACKEND.to_string(),
        _ => String::new(),
    }
}

/// Build a full API URL from a base and a path
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::api_url;
/// assert_eq!(api_url("", "/stats"), "/stats");
/// ```
pub fn api_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
