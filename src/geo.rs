use crate::error::{Field, PlanError, Result, SampleFault};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// One raw track sample as read from the uploaded document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoSample {
    pub lat: f64,
    pub lon: f64,
    pub ele: f64,
}

impl GeoSample {
    pub fn new(lat: f64, lon: f64, ele: f64) -> Self {
        Self { lat, lon, ele }
    }

    fn check(&self, index: usize) -> Result<()> {
        for (value, field) in [
            (self.lat, Field::Latitude),
            (self.lon, Field::Longitude),
            (self.ele, Field::Elevation),
        ] {
            if !value.is_finite() {
                return Err(PlanError::MalformedTrack {
                    index,
                    fault: SampleFault::NotNumeric(field),
                });
            }
        }
        Ok(())
    }
}

/// Cumulative distance (km) from the track start and the elevation (m) there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    pub distance: f64,
    pub elevation: f64,
}

/// Great circle distance in kilometers between two samples, haversine formula.
///
/// Elevation is ignored. Coordinates are not range checked.
pub fn distance_km(a: &GeoSample, b: &GeoSample) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    // a = sin²(Δφ/2) + cos φ1 ⋅ cos φ2 ⋅ sin²(Δλ/2)
    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    // Rounding can push a past 1 for near-antipodal points
    let h = h.clamp(0.0, 1.0);

    // c = 2 ⋅ atan2(√a, √(1−a))
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Ordered distance/elevation series derived from a track.
///
/// The first point sits at distance 0 and distances never decrease.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    points: Vec<ProfilePoint>,
}

impl Profile {
    /// Wraps an already computed series after checking its ordering.
    pub fn from_points(points: Vec<ProfilePoint>) -> Result<Self> {
        for (index, point) in points.iter().enumerate() {
            let ordered = match index {
                0 => point.distance == 0.0,
                _ => point.distance >= points[index - 1].distance,
            };
            if !ordered {
                return Err(PlanError::UnorderedProfile { index });
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Distance of the last point, 0 for an empty profile.
    pub fn max_distance(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.distance)
    }

    /// Lowest and highest elevation, for chart axes.
    pub fn elevation_range(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?.elevation;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (lo.min(p.elevation), hi.max(p.elevation))
        }))
    }

    /// Index of the point whose distance is closest to `target`.
    ///
    /// On a tie the earlier point wins, so among points sharing a distance
    /// the first one is returned. `None` when the profile is empty.
    pub fn nearest_index(&self, target: f64) -> Option<usize> {
        if self.points.is_empty() {
            return None;
        }

        let above = self.points.partition_point(|p| p.distance < target);
        if above == 0 {
            return Some(0);
        }

        let below = above - 1;
        let below_gap = (self.points[below].distance - target).abs();
        let take_below = match self.points.get(above) {
            Some(next) => below_gap <= (next.distance - target).abs(),
            None => true,
        };
        if !take_below {
            return Some(above);
        }

        // Walk back to the first point of a zero-length run.
        let distance = self.points[below].distance;
        Some(self.points.partition_point(|p| p.distance < distance))
    }
}

/// Turns ordered samples into a cumulative distance profile.
///
/// Zero-length steps are kept. Any non-finite coordinate fails the whole
/// build with the index of the offending sample.
pub fn build_profile(samples: &[GeoSample]) -> Result<Profile> {
    let mut points = Vec::with_capacity(samples.len());
    let mut distance = 0.0;

    for (index, sample) in samples.iter().enumerate() {
        sample.check(index)?;
        if index > 0 {
            distance += distance_km(&samples[index - 1], sample);
        }
        points.push(ProfilePoint {
            distance,
            elevation: sample.ele,
        });
    }

    Ok(Profile { points })
}
