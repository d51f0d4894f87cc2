use reqwest::Url;

use crate::error::{SuiteError, SuiteResult};

pub mod auth;
pub mod foody;

pub use auth::TokenManager;
pub use foody::{ApiReply, FoodyClient};

pub(crate) const USER_AGENT: &str = concat!("foody-suite/", env!("CARGO_PKG_VERSION"));

/// Appends `route` (split on `/`) to `base`, then `id` as one percent-encoded segment.
pub fn join_endpoint(base: &Url, route: &str, id: Option<&str>) -> SuiteResult<Url> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| SuiteError::InvalidUrl(format!("{} cannot be a base URL", base)))?;
        segments.pop_if_empty();
        segments.extend(route.split('/').filter(|s| !s.is_empty()));
        if let Some(id) = id {
            segments.push(id);
        }
    }
    Ok(url)
}
