/// Compass orientation of a glazing or PV surface relevant to this model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    East,
    South,
    West,
}

/// Piecewise-linear anchor points `(hour_of_day, factor)` for one orientation.
/// Factors are dimensionless, in `[0, 1]`, and represent the relative share of
/// a day's shortwave radiation a surface with that orientation receives at a
/// given hour.
fn anchors(orientation: Orientation) -> &'static [(f64, f64)] {
    match orientation {
        Orientation::East => &[(0.0, 0.0), (6.0, 0.0), (9.0, 1.0), (12.0, 0.3), (15.0, 0.0), (24.0, 0.0)],
        Orientation::South => &[(0.0, 0.0), (8.0, 0.0), (13.0, 1.0), (18.0, 0.0), (24.0, 0.0)],
        Orientation::West => &[(0.0, 0.0), (12.0, 0.0), (17.0, 1.0), (20.0, 0.3), (24.0, 0.0)],
    }
}

/// Orientation factor at a given hour of day (`0.0..24.0`, wraps at the boundary).
///
/// Linearly interpolates between the fixed anchor points for the orientation;
/// returns 0.0 outside the tabulated daylight window.
pub fn orientation_factor(orientation: Orientation, hour_of_day: f64) -> f64 {
    let h = hour_of_day.rem_euclid(24.0);
    let points = anchors(orientation);

    for window in points.windows(2) {
        let (h0, f0) = window[0];
        let (h1, f1) = window[1];
        if h >= h0 && h <= h1 {
            if (h1 - h0).abs() < f64::EPSILON {
                return f0;
            }
            let t = (h - h0) / (h1 - h0);
            return f0 + t * (f1 - f0);
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn east_peaks_in_morning() {
        let morning = orientation_factor(Orientation::East, 9.0);
        let evening = orientation_factor(Orientation::East, 18.0);
        assert!(morning > evening);
        assert_eq!(morning, 1.0);
    }

    #[test]
    fn south_peaks_at_midday() {
        assert_eq!(orientation_factor(Orientation::South, 13.0), 1.0);
        assert_eq!(orientation_factor(Orientation::South, 0.0), 0.0);
    }

    #[test]
    fn west_peaks_in_afternoon() {
        let afternoon = orientation_factor(Orientation::West, 17.0);
        let morning = orientation_factor(Orientation::West, 8.0);
        assert!(afternoon > morning);
        assert_eq!(morning, 0.0);
    }

    #[test]
    fn factors_stay_in_unit_range() {
        for hour in 0..24 {
            for orientation in [Orientation::East, Orientation::South, Orientation::West] {
                let f = orientation_factor(orientation, hour as f64);
                assert!((0.0..=1.0).contains(&f));
            }
        }
    }
}
