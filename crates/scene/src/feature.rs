use std::sync::atomic::{AtomicU64, Ordering};

use crate::mobility::MobilityRecord;

/// Position of a feature inside its collection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId(pub u32);

impl FeatureId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LonLat {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl LonLat {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

/// A linear ring; GeoJSON rings repeat the first position at the end.
pub type Ring = Vec<LonLat>;

/// Area geometry. The first ring of every polygon is its exterior, the rest
/// are holes.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl FeatureGeometry {
    /// Iterates the polygons of this geometry, each as its list of rings.
    pub fn polygons(&self) -> impl Iterator<Item = &[Ring]> + '_ {
        let (single, multi) = match self {
            FeatureGeometry::Polygon(rings) => (Some(rings.as_slice()), None),
            FeatureGeometry::MultiPolygon(polys) => (None, Some(polys.iter())),
        };
        single
            .into_iter()
            .chain(multi.into_iter().flatten().map(|p| p.as_slice()))
    }

    /// Iterates every ring of every polygon.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> + '_ {
        self.polygons().flat_map(|p| p.iter())
    }

    pub fn vertex_count(&self) -> usize {
        self.rings().map(|r| r.len()).sum()
    }
}

/// A country shape with the mobility record for the active date attached.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    pub id: FeatureId,
    pub geometry: FeatureGeometry,
    pub record: MobilityRecord,
}

impl GeoFeature {
    pub fn new(geometry: FeatureGeometry, record: MobilityRecord) -> Self {
        Self {
            id: FeatureId(0),
            geometry,
            record,
        }
    }
}

/// Identity of a collection instance.
///
/// Every constructed collection gets a fresh id, so consumers can detect a
/// wholesale replacement (for example after a date change) without comparing
/// geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CollectionId(pub u64);

static NEXT_COLLECTION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    id: CollectionId,
    features: Vec<GeoFeature>,
}

impl FeatureCollection {
    /// Takes ownership of `features`, renumbering their ids by position.
    pub fn new(mut features: Vec<GeoFeature>) -> Self {
        for (idx, feature) in features.iter_mut().enumerate() {
            feature.id = FeatureId(idx as u32);
        }
        Self {
            id: CollectionId(NEXT_COLLECTION_ID.fetch_add(1, Ordering::Relaxed)),
            features,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn id(&self) -> CollectionId {
        self.id
    }

    pub fn features(&self) -> &[GeoFeature] {
        &self.features
    }

    pub fn get(&self, id: FeatureId) -> Option<&GeoFeature> {
        self.features.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{FeatureCollection, FeatureGeometry, FeatureId, GeoFeature, LonLat};
    use crate::mobility::MobilityRecord;

    fn square(lon: f64) -> Vec<LonLat> {
        vec![
            LonLat::new(lon, 0.0),
            LonLat::new(lon + 1.0, 0.0),
            LonLat::new(lon + 1.0, 1.0),
            LonLat::new(lon, 0.0),
        ]
    }

    #[test]
    fn multipolygon_iterates_all_polygons() {
        let geom = FeatureGeometry::MultiPolygon(vec![vec![square(0.0)], vec![square(5.0)]]);
        assert_eq!(geom.polygons().count(), 2);
        assert_eq!(geom.rings().count(), 2);
        assert_eq!(geom.vertex_count(), 8);

        let single = FeatureGeometry::Polygon(vec![square(0.0)]);
        assert_eq!(single.polygons().count(), 1);
    }

    #[test]
    fn collection_renumbers_and_gets_fresh_identity() {
        let f = GeoFeature::new(
            FeatureGeometry::Polygon(vec![square(0.0)]),
            MobilityRecord::new("FR", "France"),
        );
        let a = FeatureCollection::new(vec![f.clone(), f.clone()]);
        let b = FeatureCollection::new(vec![f]);

        assert_ne!(a.id(), b.id());
        assert_eq!(a.features()[1].id, FeatureId(1));
        assert_eq!(a.get(FeatureId(1)).map(|f| f.record.country_code.as_str()), Some("FR"));
        assert!(a.get(FeatureId(2)).is_none());
        assert!(FeatureCollection::empty().is_empty());
    }
}
