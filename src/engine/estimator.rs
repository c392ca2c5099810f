//! Great-circle distance and a linear duration model.

use crate::entities::Coordinates;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average speed: 0.5 km/min, i.e. 30 km/h.
pub const AVERAGE_SPEED_KM_PER_MIN: f64 = 0.5;

/// Haversine distance between two points given in degrees.
pub fn distance_km(origin: &Coordinates, destination: &Coordinates) -> f64 {
    let phi1 = origin.lat.to_radians();
    let phi2 = destination.lat.to_radians();
    let delta_phi = (destination.lat - origin.lat).to_radians();
    let delta_lambda = (destination.lng - origin.lng).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Minutes at the average speed, rounded to the nearest integer with ties
/// going up (0.25 km -> 0.5 min -> 1 min).
pub fn duration_min(distance_km: f64) -> u32 {
    (distance_km / AVERAGE_SPEED_KM_PER_MIN).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const PICKUP: Coordinates = Coordinates {
        lat: -26.9155,
        lng: -49.0713,
    };
    const DRIVER: Coordinates = Coordinates {
        lat: -26.9108,
        lng: -49.0703,
    };

    #[test]
    fn same_point_is_zero() {
        assert_eq!(distance_km(&PICKUP, &PICKUP), 0.0);
        assert_eq!(duration_min(0.0), 0);
    }

    #[test]
    fn known_short_hop() {
        // roughly 532 m between the two demo points
        let distance = distance_km(&PICKUP, &DRIVER);
        assert!((distance - 0.5319).abs() < 0.001, "{}", distance);
    }

    #[test]
    fn quarter_turn_of_the_equator() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 90.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2;

        assert!((distance_km(&a, &b) - expected).abs() < 1e-6);
    }

    #[test]
    fn duration_rounds_half_up() {
        assert_eq!(duration_min(5.2), 10);
        assert_eq!(duration_min(0.25), 1);
        assert_eq!(duration_min(0.75), 2);
        assert_eq!(duration_min(1.2), 2);
        assert_eq!(duration_min(1.3), 3);
    }
}
