use serde::{Deserialize, Serialize};

/// Number of decimal places kept when a coordinate is stored.
const STORAGE_DECIMALS: i32 = 6;

#[derive(Clone, Copy, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate { latitude, longitude }
    }

    /// Flat-plane distance between `self` and `other`, treating latitude and longitude as orthogonal axes
    /// of equal scale. This is not a geodesic distance and is only meaningful for points close together.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        ((other.latitude - self.latitude).powi(2) + (other.longitude - self.longitude).powi(2)).sqrt()
    }

    /// Rounds both axes to the precision of the stored columns.
    pub fn rounded_for_storage(&self) -> Self {
        Coordinate {
            latitude: round_to(self.latitude, STORAGE_DECIMALS),
            longitude: round_to(self.longitude, STORAGE_DECIMALS),
        }
    }
}

pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    a.distance_to(&b)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
