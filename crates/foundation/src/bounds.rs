use serde::{Deserialize, Serialize};

/// A geographic position in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

/// Corner-pair bounds, the shape a rendering surface reads and fits.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub const fn new(south_west: LatLng, north_east: LatLng) -> Self {
        LatLngBounds {
            south_west,
            north_east,
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// `[[south, west], [north, east]]`
    pub fn corner_pairs(&self) -> [[f64; 2]; 2] {
        [
            [self.south_west.lat, self.south_west.lng],
            [self.north_east.lat, self.north_east.lng],
        ]
    }
}

/// Edge-named bounds as exchanged with the GIS service.
///
/// Longitudes are taken as-is; a window crossing the antimeridian is not
/// normalized.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub north_latitude: f64,
    pub south_latitude: f64,
    pub east_longitude: f64,
    pub west_longitude: f64,
}

impl BoundingBox {
    pub const fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        BoundingBox {
            north_latitude: north,
            south_latitude: south,
            east_longitude: east,
            west_longitude: west,
        }
    }

    pub fn from_corners(bounds: &LatLngBounds) -> Self {
        BoundingBox::new(
            bounds.north_east.lat,
            bounds.south_west.lat,
            bounds.north_east.lng,
            bounds.south_west.lng,
        )
    }

    pub fn to_corners(&self) -> LatLngBounds {
        LatLngBounds::new(
            LatLng::new(self.south_latitude, self.west_longitude),
            LatLng::new(self.north_latitude, self.east_longitude),
        )
    }

    pub fn is_well_formed(&self) -> bool {
        let edges = [
            self.north_latitude,
            self.south_latitude,
            self.east_longitude,
            self.west_longitude,
        ];
        edges.iter().all(|v| v.is_finite()) && self.north_latitude >= self.south_latitude
    }

    /// Query parameters in the order the GIS service documents them.
    pub fn query_params(&self) -> [(&'static str, f64); 4] {
        [
            ("northLatitude", self.north_latitude),
            ("westLongitude", self.west_longitude),
            ("southLatitude", self.south_latitude),
            ("eastLongitude", self.east_longitude),
        ]
    }
}

/// Pixel padding applied when fitting a viewport to bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Padding {
    pub x: f64,
    pub y: f64,
}

impl Padding {
    pub const fn uniform(px: f64) -> Self {
        Padding { x: px, y: px }
    }
}
