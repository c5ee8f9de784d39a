//! Client wrapper for the settings endpoint read by the staff area.

use super::types::FeatureFlags;
use crate::{
    api::{endpoints, ApiClient},
    errors::AppError,
};

/// Fetches the inventory settings and extracts the staff feature flags.
pub async fn inventory_settings(api: &dyn ApiClient) -> Result<FeatureFlags, AppError> {
    let settings = api.get(endpoints::INVENTORY_SETTINGS).await?;
    Ok(FeatureFlags::from_settings(&settings))
}
