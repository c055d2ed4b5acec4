use crate::core::distance::haversine_distance;
use crate::models::{CatalogEntry, GeoPoint, RankedResult};

/// Order entries by distance from `query`, nearest first
///
/// With a radius, only entries at `distance_km <= radius_km` are kept, so an
/// entry exactly on the boundary is included. Entries at equal distance keep
/// their input order. Distances are recomputed on every call.
pub fn rank<'a, I>(entries: I, query: GeoPoint, radius_km: Option<f64>) -> Vec<RankedResult<'a>>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let mut ranked: Vec<RankedResult<'a>> = entries
        .into_iter()
        .map(|entry| RankedResult {
            entry,
            distance_km: haversine_distance(entry.location, query),
        })
        .filter(|result| within_radius(result.distance_km, radius_km))
        .collect();

    // sort_by is stable: ties keep catalog order
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    ranked
}

#[inline]
fn within_radius(distance_km: f64, radius_km: Option<f64>) -> bool {
    match radius_km {
        Some(radius) => distance_km <= radius,
        None => true,
    }
}
