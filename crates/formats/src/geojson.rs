//! GeoJSON ingest for annotated country shapes.
//!
//! Each feature carries its mobility record either under a nested
//! `mobilityData` object in `properties` or directly in `properties`.
//! Non-area features and features without geometry are skipped: they have
//! nothing to fill on the globe.

use std::fmt;
use std::fs;
use std::path::Path;

use scene::{FeatureCollection, FeatureGeometry, GeoFeature, LonLat, Metric, MobilityRecord, Ring};
use serde_json::{Map, Value};
use tracing::{debug, warn};

const RECORD_KEY: &str = "mobilityData";
const CODE_KEYS: [&str; 3] = ["countryCode", "ISO_A2", "iso_a2"];
const NAME_KEYS: [&str; 4] = ["countryName", "name", "ADMIN", "NAME"];

#[derive(Debug)]
pub enum GeoJsonError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoJsonError::Io(err) => write!(f, "I/O error: {err}"),
            GeoJsonError::Parse(err) => write!(f, "GeoJSON parse error: {err}"),
            GeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeoJsonError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for GeoJsonError {}

pub fn load_feature_collection(path: impl AsRef<Path>) -> Result<FeatureCollection, GeoJsonError> {
    let payload = fs::read_to_string(path.as_ref()).map_err(GeoJsonError::Io)?;
    feature_collection_from_str(&payload)
}

pub fn feature_collection_from_str(payload: &str) -> Result<FeatureCollection, GeoJsonError> {
    let value: Value = serde_json::from_str(payload).map_err(GeoJsonError::Parse)?;
    feature_collection_from_value(&value)
}

pub fn feature_collection_from_value(value: &Value) -> Result<FeatureCollection, GeoJsonError> {
    let obj = value
        .as_object()
        .ok_or(GeoJsonError::NotAFeatureCollection)?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(GeoJsonError::NotAFeatureCollection)?;
    if ty != "FeatureCollection" {
        return Err(GeoJsonError::NotAFeatureCollection);
    }

    let features_val = obj
        .get("features")
        .and_then(|v| v.as_array())
        .ok_or(GeoJsonError::NotAFeatureCollection)?;

    let mut features = Vec::with_capacity(features_val.len());
    for (index, feat_val) in features_val.iter().enumerate() {
        let feat_obj = feat_val
            .as_object()
            .ok_or_else(|| GeoJsonError::InvalidFeature {
                index,
                reason: "feature must be an object".to_string(),
            })?;

        match feat_obj.get("type").and_then(|v| v.as_str()) {
            Some("Feature") => {}
            Some(other) => {
                return Err(GeoJsonError::InvalidFeature {
                    index,
                    reason: format!("unexpected feature type: {other}"),
                });
            }
            None => {
                return Err(GeoJsonError::InvalidFeature {
                    index,
                    reason: "feature missing type".to_string(),
                });
            }
        }

        let geometry = match feat_obj.get("geometry") {
            None | Some(Value::Null) => {
                warn!(index, "skipping feature without geometry");
                continue;
            }
            Some(g) => parse_geometry(g)
                .map_err(|reason| GeoJsonError::InvalidFeature { index, reason })?,
        };
        let Some(geometry) = geometry else {
            warn!(index, "skipping non-area feature");
            continue;
        };

        let record = parse_record(feat_obj);
        features.push(GeoFeature::new(geometry, record));
    }

    debug!(
        features = features.len(),
        vertices = features.iter().map(|f| f.geometry.vertex_count()).sum::<usize>(),
        "parsed feature collection"
    );
    Ok(FeatureCollection::new(features))
}

fn parse_record(feature: &Map<String, Value>) -> MobilityRecord {
    let empty = Map::new();
    let properties = feature
        .get("properties")
        .and_then(|v| v.as_object())
        .unwrap_or(&empty);
    let data = properties
        .get(RECORD_KEY)
        .and_then(|v| v.as_object())
        .unwrap_or(properties);

    let fallback_id = match feature.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    let code = first_string(data, &CODE_KEYS)
        .or_else(|| first_string(properties, &CODE_KEYS))
        .unwrap_or(fallback_id);
    let name = first_string(data, &NAME_KEYS)
        .or_else(|| first_string(properties, &NAME_KEYS))
        .unwrap_or_default();

    let mut record = MobilityRecord::new(code, name);
    for metric in Metric::ALL {
        record.set(metric, data.get(metric.key()).and_then(parse_value));
    }
    record
}

fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(|v| v.as_str()))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// `Ok(None)` for well-formed geometry that is not an area.
fn parse_geometry(value: &Value) -> Result<Option<FeatureGeometry>, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    match ty {
        "Polygon" | "MultiPolygon" => {}
        "Point" | "MultiPoint" | "LineString" | "MultiLineString" | "GeometryCollection" => {
            return Ok(None);
        }
        other => return Err(format!("unsupported geometry type: {other}")),
    }

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Polygon" => Ok(Some(FeatureGeometry::Polygon(parse_polygon(coords)?))),
        _ => Ok(Some(FeatureGeometry::MultiPolygon(parse_multi_polygon(
            coords,
        )?))),
    }
}

fn parse_position(coords: &Value) -> Result<LonLat, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(LonLat::new(lon, lat))
}

fn parse_ring(coords: &Value) -> Result<Ring, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    arr.iter().map(parse_position).collect()
}

fn parse_polygon(coords: &Value) -> Result<Vec<Ring>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    rings.iter().map(parse_ring).collect()
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Vec<Ring>>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    polys.iter().map(parse_polygon).collect()
}

#[cfg(test)]
mod tests {
    use super::{GeoJsonError, feature_collection_from_str};
    use pretty_assertions::assert_eq;
    use scene::{FeatureGeometry, Metric};

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "IT",
                "properties": {
                    "mobilityData": {
                        "countryCode": "IT",
                        "countryName": "Italy",
                        "retailChange": -45,
                        "parksChange": "12.5",
                        "transitChange": null
                    }
                },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[10, 40], [15, 40], [15, 45], [10, 40]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "Atlantis", "ISO_A2": "AT" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[0, 0], [1, 0], [1, 1], [0, 0]]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "Capital" },
                "geometry": { "type": "Point", "coordinates": [1, 2] }
            },
            { "type": "Feature", "properties": {}, "geometry": null }
        ]
    }"#;

    #[test]
    fn parses_records_from_nested_and_flat_properties() {
        let fc = feature_collection_from_str(SAMPLE).expect("parse collection");
        assert_eq!(fc.len(), 2);

        let italy = &fc.features()[0];
        assert_eq!(italy.record.country_code, "IT");
        assert_eq!(italy.record.country_name, "Italy");
        assert_eq!(italy.record.raw(Metric::Retail), Some(-45.0));
        assert_eq!(italy.record.raw(Metric::Parks), Some(12.5));
        assert_eq!(italy.record.raw(Metric::Transit), None);
        assert!(matches!(italy.geometry, FeatureGeometry::Polygon(_)));

        let atlantis = &fc.features()[1];
        assert_eq!(atlantis.record.country_code, "AT");
        assert_eq!(atlantis.record.country_name, "Atlantis");
        assert_eq!(atlantis.geometry.polygons().count(), 1);
    }

    #[test]
    fn rejects_non_collections() {
        let err = feature_collection_from_str(r#"{"type": "Feature"}"#).unwrap_err();
        assert!(matches!(err, GeoJsonError::NotAFeatureCollection));
    }

    #[test]
    fn reports_index_of_malformed_feature() {
        let payload = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {},
                  "geometry": { "type": "Polygon", "coordinates": [[[0, "x"]]] } }
            ]
        }"#;
        match feature_collection_from_str(payload) {
            Err(GeoJsonError::InvalidFeature { index, .. }) => assert_eq!(index, 0),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
