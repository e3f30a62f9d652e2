//! Composite moment tensor from nearby historical events.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::CompositeConfig;
use super::query::{CatalogError, CatalogQuery, CatalogRow, SearchBox};
use crate::tensor::{MomentTensor, TensorComponents};

/// Tolerance when comparing half-widths against the configured maximum.
const WIDTH_EPSILON: f64 = 1e-9;

/// Result of a composite search.
///
/// When no events are found, `tensor` is `None`, `variability` is NaN and
/// `count` is zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeTensor {
    pub tensor: Option<MomentTensor>,
    /// Internal consistency of the averaged tensors (0 = identical).
    pub variability: f64,
    /// Number of events averaged.
    pub count: usize,
    /// Half-width (degrees) of the box that produced the result.
    pub half_width: f64,
}

impl CompositeTensor {
    fn unavailable(half_width: f64) -> Self {
        Self {
            tensor: None,
            variability: f64::NAN,
            count: 0,
            half_width,
        }
    }
}

/// Averages scale-normalized tensors.
///
/// Each row is divided by its own largest absolute component so events of
/// different size weigh equally. Returns the composite tensor and its
/// variability, or `None` for an empty input.
pub fn composite_from_components(rows: &[TensorComponents]) -> Option<(MomentTensor, f64)> {
    if rows.is_empty() {
        return None;
    }
    let n = rows.len() as f64;

    // cartesian order: m33, m11, m22, m13, m23, m12
    let normalized: Vec<[f64; 6]> = rows
        .iter()
        .map(|c| {
            let scale = c.max_abs();
            [c.mrr, c.mtt, c.mpp, c.mrt, -c.mrp, -c.mtp].map(|v| v / scale)
        })
        .collect();

    let mut mean = [0.0; 6];
    for row in &normalized {
        for (m, v) in mean.iter_mut().zip(row) {
            *m += v / n;
        }
    }

    let mut rms = [0.0; 6];
    for row in &normalized {
        for ((r, v), m) in rms.iter_mut().zip(row).zip(&mean) {
            *r += (v - m).powi(2) / n;
        }
    }
    let rms = rms.map(f64::sqrt);

    // m33 (mrr) is left out of the consistency measure
    let spread: f64 = rms[1..].iter().map(|v| v * v).sum();
    let size: f64 = mean[1..].iter().map(|v| v * v).sum();
    let variability = spread.sqrt() / size.sqrt();

    let [m33, m11, m22, m13, m23, m12] = mean;
    let components = TensorComponents::new(m33, m11, m22, m13, -m23, -m12);
    let tensor = MomentTensor::from_components(components).with_provenance("composite", "composite");
    Some((tensor, variability))
}

/// Builds composite tensors by searching a catalog in growing boxes.
pub struct CompositeEstimator {
    catalog: Arc<dyn CatalogQuery>,
    config: CompositeConfig,
}

impl CompositeEstimator {
    pub fn new(catalog: Arc<dyn CatalogQuery>, config: CompositeConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &CompositeConfig {
        &self.config
    }

    fn usable_rows(&self, rows: Vec<CatalogRow>, depth: f64) -> Vec<TensorComponents> {
        rows.into_iter()
            .filter(|r| match self.config.depth_window_km {
                Some(window) => (r.depth - depth).abs() <= window,
                None => true,
            })
            .map(|r| r.components)
            .filter(TensorComponents::is_valid)
            .collect()
    }

    /// Estimates a composite tensor for a hypocenter.
    ///
    /// The box starts at the initial half-width and grows by the increment
    /// until enough events are found or the maximum half-width has been
    /// searched.
    ///
    /// # Arguments
    /// * `lat`, `lon` - Epicenter in decimal degrees
    /// * `depth` - Hypocenter depth in km, used only with a depth window
    ///
    /// # Returns
    /// The composite result; an empty search is not an error.
    pub fn estimate(&self, lat: f64, lon: f64, depth: f64) -> Result<CompositeTensor, CatalogError> {
        let cfg = &self.config;
        let mut width = cfg.initial_half_width.min(cfg.max_half_width);
        let rows = loop {
            let found = self.catalog.query_box(&SearchBox::around(lat, lon, width))?;
            let rows = self.usable_rows(found, depth);
            debug!(half_width = width, events = rows.len(), "composite search");

            if rows.len() >= cfg.min_events || width >= cfg.max_half_width - WIDTH_EPSILON {
                break rows;
            }
            let next = (width + cfg.half_width_increment).min(cfg.max_half_width);
            if next <= width {
                break rows;
            }
            width = next;
        };

        match composite_from_components(&rows) {
            Some((tensor, variability)) => Ok(CompositeTensor {
                tensor: Some(tensor),
                variability,
                count: rows.len(),
                half_width: width,
            }),
            None => Ok(CompositeTensor::unavailable(width)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::tensor::{plane_to_tensor, FocalMechanism, FocalMechanismConfig};

    fn event(lat: f64, lon: f64, strike: f64, dip: f64, rake: f64, mag: f64) -> CatalogRow {
        CatalogRow {
            time: None,
            lat,
            lon,
            depth: 25.0,
            magnitude: mag,
            components: plane_to_tensor(strike, dip, rake, mag),
        }
    }

    #[test]
    fn test_identical_tensors_have_zero_variability() {
        let c = plane_to_tensor(300.0, 20.0, 90.0, 6.0);
        let (tensor, variability) = composite_from_components(&[c, c, c]).unwrap();
        assert!(variability.abs() < 1e-12, "got {}", variability);
        let single = MomentTensor::from_components(c);
        assert!(tensor.kagan_angle(&single) < 1e-4);
    }

    #[test]
    fn test_magnitude_does_not_bias_average() {
        let small = plane_to_tensor(0.0, 30.0, 90.0, 4.0);
        let large = plane_to_tensor(0.0, 30.0, 90.0, 8.0);
        let (_, variability) = composite_from_components(&[small, large]).unwrap();
        assert!(variability < 1e-9, "got {}", variability);
    }

    #[test]
    fn test_two_row_variability_value() {
        // normalized rows [1, -0.5, -0.5, 0, 0, 0] and [1, 0, -1, 0, 0, 0]:
        // spread 0.25^2 + 0.25^2, size 0.25^2 + 0.75^2
        let a = TensorComponents::new(2e18, -1e18, -1e18, 0.0, 0.0, 0.0);
        let b = TensorComponents::new(3e17, 0.0, -3e17, 0.0, 0.0, 0.0);
        let (tensor, variability) = composite_from_components(&[a, b]).unwrap();
        let expected = (0.125f64 / 0.625).sqrt();
        assert!((variability - expected).abs() < 1e-12, "got {}, expected {}", variability, expected);
        assert!((tensor.components.mrr - 1.0).abs() < 1e-12);
        assert!((tensor.components.mtt + 0.25).abs() < 1e-12);
        assert!((tensor.components.mpp + 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_mixed_mechanisms_increase_variability() {
        let rows = [
            plane_to_tensor(0.0, 30.0, 90.0, 6.0),
            plane_to_tensor(0.0, 90.0, 0.0, 6.0),
            plane_to_tensor(0.0, 60.0, -90.0, 6.0),
        ];
        let (_, variability) = composite_from_components(&rows).unwrap();
        assert!(variability > 0.5, "got {}", variability);
    }

    #[test]
    fn test_empty_catalog_is_unavailable() {
        let estimator = CompositeEstimator::new(Arc::new(MemoryCatalog::default()), CompositeConfig::default());
        let result = estimator.estimate(10.0, 10.0, 20.0).unwrap();
        assert!(result.tensor.is_none());
        assert!(result.variability.is_nan());
        assert_eq!(result.count, 0);
        assert!((result.half_width - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_search_grows_until_enough_events() {
        // events at 0.55 and 0.75 degrees away
        let catalog = MemoryCatalog::new(vec![
            event(0.0, 0.0, 0.0, 30.0, 90.0, 6.0),
            event(0.55, 0.0, 0.0, 30.0, 90.0, 6.0),
            event(0.0, 0.75, 0.0, 30.0, 90.0, 6.0),
        ]);
        let estimator = CompositeEstimator::new(Arc::new(catalog), CompositeConfig::default());
        let result = estimator.estimate(0.0, 0.0, 25.0).unwrap();
        assert_eq!(result.count, 3);
        assert!(result.half_width >= 0.75 && result.half_width < 0.85, "width {}", result.half_width);
        let mech = FocalMechanism::classify(result.tensor.as_ref(), &FocalMechanismConfig::default());
        assert_eq!(mech, FocalMechanism::RS);
    }

    #[test]
    fn test_too_few_events_still_composite() {
        let catalog = MemoryCatalog::new(vec![event(0.1, 0.1, 10.0, 80.0, 170.0, 5.0)]);
        let estimator = CompositeEstimator::new(Arc::new(catalog), CompositeConfig::default());
        let result = estimator.estimate(0.0, 0.0, 25.0).unwrap();
        assert_eq!(result.count, 1);
        assert!(result.tensor.is_some());
        assert!((result.half_width - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_raising_threshold_never_shrinks_width() {
        let catalog = Arc::new(MemoryCatalog::new(
            (0..8)
                .map(|i| event(0.1 * i as f64, -0.05 * i as f64, 0.0, 30.0, 90.0, 5.0))
                .collect(),
        ));
        let mut previous = 0.0;
        for min_events in 1..10 {
            let config = CompositeConfig {
                min_events,
                ..Default::default()
            };
            let estimator = CompositeEstimator::new(catalog.clone(), config);
            let result = estimator.estimate(0.0, 0.0, 10.0).unwrap();
            assert!(result.half_width + 1e-12 >= previous, "min {} width {}", min_events, result.half_width);
            if result.half_width < 1.0 - 1e-9 {
                assert!(result.count >= min_events);
            }
            previous = result.half_width;
        }
    }

    #[test]
    fn test_depth_window_filters_rows() {
        let mut deep = event(0.0, 0.0, 0.0, 30.0, 90.0, 6.0);
        deep.depth = 300.0;
        let catalog = Arc::new(MemoryCatalog::new(vec![event(0.0, 0.0, 0.0, 30.0, 90.0, 6.0), deep]));

        let unfiltered = CompositeEstimator::new(catalog.clone(), CompositeConfig::default());
        assert_eq!(unfiltered.estimate(0.0, 0.0, 25.0).unwrap().count, 2);

        let filtered = CompositeEstimator::new(catalog, CompositeConfig::with_depth_window(20.0));
        assert_eq!(filtered.estimate(0.0, 0.0, 25.0).unwrap().count, 1);
    }
}
