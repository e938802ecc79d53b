use serde::Serialize;

use crate::feature::GeoFeature;

/// Emitted when a country is clicked.
///
/// Consumers (navigation, detail panels) own it after emission; the engine
/// keeps no reference and changes no state when emitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEvent {
    pub country_code: String,
    pub country_name: String,
}

impl SelectionEvent {
    pub fn from_feature(feature: &GeoFeature) -> Self {
        Self {
            country_code: feature.record.country_code.clone(),
            country_name: feature.record.country_name.clone(),
        }
    }
}
