//! Piecewise-linear colour gradients keyed by elevation.

use image::Rgb;

use crate::error::{RenderError, Result};

/// A colour gradient defined by sorted `(key, colour)` stops.
#[derive(Debug, Clone, Default)]
pub struct Gradient {
    stops: Vec<(f64, Rgb<u8>)>,
}

impl Gradient {
    pub fn new() -> Self {
        Self::default()
    }

    /// The elevation palette used for rendered maps: deep water through
    /// shallows, beach, forest and rock up to snow.
    pub fn terrain() -> Self {
        let stops = [
            (0.0, [0, 0, 0]),
            (0.01, [0, 0, 139]),
            (0.1, [0, 0, 255]),
            (0.485, [173, 216, 230]),
            (0.5, [250, 250, 210]),
            (0.55, [0, 128, 0]),
            (0.7, [34, 139, 34]),
            (0.8, [0, 100, 0]),
            (0.9, [169, 169, 169]),
            (0.95, [128, 128, 128]),
            (1.0, [255, 255, 255]),
        ];
        Self {
            stops: stops.into_iter().map(|(k, c)| (k, Rgb(c))).collect(),
        }
    }

    /// Inserts a stop, keeping stops ordered by key. A stop whose key equals
    /// an existing one goes after it.
    pub fn add_stop(&mut self, key: f64, color: Rgb<u8>) -> Result<()> {
        if key.is_nan() {
            return Err(RenderError::InvalidStop(key));
        }
        let at = self.stops.partition_point(|&(k, _)| k <= key);
        self.stops.insert(at, (key, color));
        Ok(())
    }

    /// Builder-style [`add_stop`](Self::add_stop).
    pub fn with_stop(mut self, key: f64, color: [u8; 3]) -> Result<Self> {
        self.add_stop(key, Rgb(color))?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Colour at `key`.
    ///
    /// Between two stops each channel is interpolated linearly and truncated.
    /// Keys below the first stop (and NaN) take its colour, keys above the
    /// last stop take the last colour.
    pub fn color_at(&self, key: f64) -> Result<Rgb<u8>> {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(RenderError::EmptyGradient),
        };
        if key.is_nan() || key <= first.0 {
            return Ok(first.1);
        }

        // Index of the first stop with a key >= `key`
        let upper = self.stops.partition_point(|&(k, _)| k < key);
        let Some(&(hi_key, hi)) = self.stops.get(upper) else {
            return Ok(last.1);
        };
        if hi_key == key {
            return Ok(hi);
        }

        let (lo_key, lo) = self.stops[upper - 1];
        let t = (key - lo_key) / (hi_key - lo_key);
        let channel = |i: usize| (lo.0[i] as f64 * (1.0 - t) + hi.0[i] as f64 * t) as u8;
        Ok(Rgb([channel(0), channel(1), channel(2)]))
    }
}
