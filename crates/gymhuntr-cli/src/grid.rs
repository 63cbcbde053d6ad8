//! Coordinate grid generation for the global sweep
//!
//! Latitude advances in fixed 0.05° rows; within each row the longitude step
//! is widened by 1/cos(lat) so cells stay roughly 5 km apart on the ground.

/// Default sweep bounds: the whole globe
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Fixed latitude step in degrees
pub const LAT_STEP: f64 = 0.05;

/// Kilometers per degree of latitude
const KM_PER_DEGREE: f64 = 111.32;

/// Target ground distance between cells in kilometers
const CELL_KM: f64 = 5.0;

/// A single cell of the sweep grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub lat: f64,
    pub lon: f64,
}

/// Bounding box for a sweep, defaulting to the whole globe
#[derive(Debug, Clone, Copy)]
pub struct GridBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            min_lat: MIN_LAT,
            max_lat: MAX_LAT,
            min_lon: MIN_LON,
            max_lon: MAX_LON,
        }
    }
}

impl GridBounds {
    /// Validate that the box is well-formed and inside the globe
    pub fn validate(&self) -> crate::Result<()> {
        if !(MIN_LAT..=MAX_LAT).contains(&self.min_lat)
            || !(MIN_LAT..=MAX_LAT).contains(&self.max_lat)
            || !(MIN_LON..=MAX_LON).contains(&self.min_lon)
            || !(MIN_LON..=MAX_LON).contains(&self.max_lon)
        {
            return Err(crate::HuntrError::invalid_param(
                "bounds must lie within [-90, 90] latitude and [-180, 180] longitude",
            ));
        }
        if self.min_lat >= self.max_lat || self.min_lon >= self.max_lon {
            return Err(crate::HuntrError::invalid_param(
                "min bound must be strictly less than max bound",
            ));
        }
        Ok(())
    }
}

/// Longitude step for a row at the given latitude, in degrees.
///
/// Returns `None` for degenerate rows near the poles where cos(lat) is so
/// small that the step is non-finite or wider than the full longitude span;
/// such rows contain no usable cells.
pub fn lon_step(lat: f64) -> Option<f64> {
    let step = CELL_KM / (KM_PER_DEGREE * lat.to_radians().cos());
    if step.is_finite() && step > 0.0 && step <= MAX_LON - MIN_LON {
        Some(step)
    } else {
        None
    }
}

/// Lazy, finite iterator over the sweep grid.
///
/// Coordinates are derived from row/column indices rather than accumulated,
/// so a row is never repeated or skipped by float drift.
pub struct Grid {
    bounds: GridBounds,
    row: u64,
    col: u64,
}

impl Grid {
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            row: 0,
            col: 0,
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GridBounds::default())
    }
}

impl Iterator for Grid {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        loop {
            let lat = self.bounds.min_lat + self.row as f64 * LAT_STEP;
            if lat >= self.bounds.max_lat {
                return None;
            }

            if let Some(step) = lon_step(lat) {
                let lon = self.bounds.min_lon + self.col as f64 * step;
                if lon < self.bounds.max_lon {
                    self.col += 1;
                    return Some(GridCell { lat, lon });
                }
            }

            // Row exhausted (or degenerate near a pole)
            self.row += 1;
            self.col = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lon_step_finite_positive_within_poles() {
        // Every latitude the default grid actually steps through
        let mut row = 0u64;
        loop {
            let lat = MIN_LAT + row as f64 * LAT_STEP;
            if lat >= MAX_LAT {
                break;
            }
            if lat > -90.0 && lat < 90.0 {
                let step = lon_step(lat).expect("step should exist away from the poles");
                assert!(step.is_finite() && step > 0.0, "bad step at lat {}", lat);
            }
            row += 1;
        }
    }

    #[test]
    fn test_lon_step_widens_toward_poles() {
        let equator = lon_step(0.0).unwrap();
        let mid = lon_step(60.0).unwrap();
        assert!(mid > equator);
        // cos(60°) = 0.5, so the step should roughly double
        assert!((mid / equator - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_lon_step_degenerate_at_pole() {
        // cos(90°) underflows to ~6e-17; the resulting step dwarfs the
        // longitude span and the row must yield nothing
        assert!(lon_step(90.0).is_none());
        assert!(lon_step(-90.0).is_none());
    }

    #[test]
    fn test_grid_rows_never_repeat_or_skip() {
        let bounds = GridBounds {
            min_lat: 10.0,
            max_lat: 10.2,
            min_lon: 0.0,
            max_lon: 0.1,
        };
        let mut lats: Vec<f64> = Grid::new(bounds).map(|c| c.lat).collect();
        lats.dedup();

        let expected: Vec<f64> = (0..4).map(|i| 10.0 + i as f64 * LAT_STEP).collect();
        assert_eq!(lats, expected);
    }

    #[test]
    fn test_grid_cells_within_bounds() {
        let bounds = GridBounds {
            min_lat: -1.0,
            max_lat: 1.0,
            min_lon: -1.0,
            max_lon: 1.0,
        };
        let cells: Vec<GridCell> = Grid::new(bounds).collect();
        assert!(!cells.is_empty());
        for cell in &cells {
            assert!(cell.lat >= bounds.min_lat && cell.lat < bounds.max_lat);
            assert!(cell.lon >= bounds.min_lon && cell.lon < bounds.max_lon);
        }
    }

    #[test]
    fn test_grid_is_restartable() {
        let bounds = GridBounds {
            min_lat: 0.0,
            max_lat: 0.1,
            min_lon: 0.0,
            max_lon: 0.2,
        };
        let first: Vec<GridCell> = Grid::new(bounds).collect();
        let second: Vec<GridCell> = Grid::new(bounds).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bounds_validation() {
        assert!(GridBounds::default().validate().is_ok());

        let inverted = GridBounds {
            min_lat: 10.0,
            max_lat: 5.0,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let outside = GridBounds {
            min_lon: -200.0,
            ..Default::default()
        };
        assert!(outside.validate().is_err());
    }
}
