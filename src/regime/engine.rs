//! Tectonic regime classification of hypocenters.

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{CatalogError, CompositeEstimator};
use crate::regions::{RegionError, Regionalizer, TectonicDomain};
use crate::remote::{ComcatClient, RemoteFetchError};
use crate::slab::{SlabError, SlabGeometryResolver, SlabSource, SlabSurfaceSample};
use crate::subduction::{SubductionZoneClassifier, SLAB_RAKE};
use crate::tensor::{kagan_angle, FocalMechanism, MomentTensor};

use super::assessment::{EventInput, Hypocenter, TectonicAssessment, TensorType};
use super::config::StrecConfig;
use super::decision::{decide, DepthZone, TensorEvidence};

/// Errors that can occur while classifying a hypocenter.
#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error(transparent)]
    Region(#[from] RegionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Slab(#[from] SlabError),
    #[error(transparent)]
    Remote(#[from] RemoteFetchError),
    #[error("no remote client configured for event lookup")]
    RemoteUnavailable,
}

/// Tensor chosen for a classification and how it was obtained.
struct TensorChoice {
    tensor: Option<MomentTensor>,
    kind: TensorType,
    variability: f64,
    count: usize,
}

/// Combines regionalization, slab geometry, tensors and the subduction
/// decision table into a [`TectonicAssessment`].
///
/// The engine holds only read-only resources, so one instance can serve
/// any number of concurrent classifications.
pub struct RegimeEngine {
    config: StrecConfig,
    regionalizer: Regionalizer,
    slabs: SlabGeometryResolver,
    composite: CompositeEstimator,
    classifier: SubductionZoneClassifier,
    remote: Option<ComcatClient>,
}

impl RegimeEngine {
    pub fn new(
        config: StrecConfig,
        regionalizer: Regionalizer,
        slabs: SlabGeometryResolver,
        composite: CompositeEstimator,
    ) -> Self {
        let classifier = SubductionZoneClassifier::new(config.subduction.clone());
        Self {
            config,
            regionalizer,
            slabs,
            composite,
            classifier,
            remote: None,
        }
    }

    /// Enables tensor lookup by event ID.
    pub fn with_remote(mut self, client: ComcatClient) -> Self {
        self.remote = Some(client);
        self
    }

    pub fn config(&self) -> &StrecConfig {
        &self.config
    }

    /// Classifies a hypocenter with an optional known tensor.
    ///
    /// Without a tensor, a composite is estimated from the catalog.
    pub fn classify(
        &self,
        hypocenter: &Hypocenter,
        tensor: Option<MomentTensor>,
    ) -> Result<TectonicAssessment, ClassifyError> {
        self.classify_with_event_id(hypocenter, tensor, None)
    }

    /// Classifies a hypocenter, fetching the tensor by event ID when none is
    /// given and falling back to a composite when the event has none.
    pub fn classify_with_event_id(
        &self,
        hypocenter: &Hypocenter,
        tensor: Option<MomentTensor>,
        event_id: Option<&str>,
    ) -> Result<TectonicAssessment, ClassifyError> {
        let hypo = hypocenter.pinned();
        let (lat, lon, depth) = (hypo.lat, hypo.lon, hypo.depth);
        let mut warnings = Vec::new();

        let choice = self.choose_tensor(&hypo, tensor, event_id)?;
        if choice.kind == TensorType::Composite && choice.count < self.composite.config().min_events {
            warnings.push(format!("Composite mechanism from {} events", choice.count));
        }

        let mut regions = self.regionalizer.get_regions(lat, lon, depth)?;
        let slab = self.slabs.resolve(lat, lon);
        let mechanism = FocalMechanism::classify(choice.tensor.as_ref(), &self.config.focal_mechanism);
        let kagan = match (&slab, &choice.tensor) {
            (Some(s), Some(t)) if s.has_depth() => {
                kagan_angle(s.strike, s.dip, SLAB_RAKE, t.np1.strike, t.np1.dip, t.np1.rake)
            }
            _ => f64::NAN,
        };

        let mut flags = None;
        let subtype = if regions.domain.uses_slab_geometry() {
            match &slab {
                Some(s) if s.is_outside_trench() => {
                    regions.reassign(TectonicDomain::SzOuterTrench, self.regionalizer.domains(), depth)?;
                    regions.sub_domain
                }
                // a landward trench sample does not override a back-arc flag
                Some(s) if regions.has_backarc && matches!(s.source, SlabSource::Trench(_)) => {
                    regions.reassign(TectonicDomain::SzInlandBackArc, self.regionalizer.domains(), depth)?;
                    regions.sub_domain
                }
                Some(s) if s.has_depth() => {
                    let zone = DepthZone::from_depth(depth, regions.h1(), regions.h2());
                    let f = self.classifier.classify(choice.tensor.as_ref(), s, depth, regions.h1());
                    let decision = decide(zone, TensorEvidence::new(mechanism, choice.tensor.is_some()), f);
                    debug!(?zone, ?f, subtype = %decision.subtype, "subduction decision");
                    if let Some(w) = decision.warning {
                        warnings.push(w.to_string());
                    }
                    flags = Some(f);
                    decision.subtype
                }
                _ if regions.has_backarc => {
                    regions.reassign(TectonicDomain::SzInlandBackArc, self.regionalizer.domains(), depth)?;
                    regions.sub_domain
                }
                _ => regions.sub_domain,
            }
        } else {
            regions.sub_domain
        };

        info!(
            lat,
            lon,
            depth,
            domain = %regions.domain,
            mechanism = %mechanism,
            subtype = %subtype,
            "hypocenter classified"
        );
        Ok(TectonicAssessment {
            hypocenter: hypo,
            region: regions.region,
            domain: regions.domain,
            subtype,
            focal_mechanism: mechanism,
            tensor_type: choice.kind,
            tensor: choice.tensor,
            kagan_angle: kagan,
            composite_variability: choice.variability,
            composite_count: choice.count,
            distances: regions.distances,
            crust: regions.crust,
            distance_to_oceanic: regions.distance_to_oceanic,
            distance_to_continental: regions.distance_to_continental,
            has_backarc: regions.has_backarc,
            depth_bands: regions.depth_bands,
            slab_region_name: slab.as_ref().and_then(SlabSurfaceSample::region_name).map(str::to_string),
            slab,
            subduction: flags,
            warnings,
        })
    }

    /// Fetches an event by ID and classifies it at its catalog location.
    pub fn classify_event(&self, event_id: &str, magnitude: f64) -> Result<TectonicAssessment, ClassifyError> {
        let remote = self.remote.as_ref().ok_or(ClassifyError::RemoteUnavailable)?;
        let event = remote.fetch_event(event_id)?;
        let hypo = Hypocenter::new(event.lat, event.lon, event.depth, magnitude);
        self.classify(&hypo, event.tensor)
    }

    /// Classifies many events in parallel. Results keep the input order.
    pub fn classify_batch(&self, events: &[EventInput]) -> Vec<Result<TectonicAssessment, ClassifyError>> {
        events
            .par_iter()
            .map(|e| {
                let tensor = e.tensor.map(MomentTensor::from_components);
                self.classify_with_event_id(&e.hypocenter, tensor, e.event_id.as_deref())
            })
            .collect()
    }

    fn choose_tensor(
        &self,
        hypo: &Hypocenter,
        tensor: Option<MomentTensor>,
        event_id: Option<&str>,
    ) -> Result<TensorChoice, ClassifyError> {
        if let Some(t) = tensor {
            return Ok(TensorChoice::actual(t));
        }
        if let Some(id) = event_id {
            match &self.remote {
                Some(remote) => {
                    if let Some(t) = remote.fetch_event(id)?.tensor {
                        return Ok(TensorChoice::actual(t));
                    }
                    debug!(event_id = id, "no remote tensor, using composite");
                }
                None => warn!(event_id = id, "event ID given without a remote client, using composite"),
            }
        }

        let composite = self.composite.estimate(hypo.lat, hypo.lon, hypo.depth)?;
        let kind = if composite.tensor.is_some() {
            TensorType::Composite
        } else {
            TensorType::None
        };
        Ok(TensorChoice {
            tensor: composite.tensor,
            kind,
            variability: composite.variability,
            count: composite.count,
        })
    }
}

impl TensorChoice {
    fn actual(tensor: MomentTensor) -> Self {
        Self {
            kind: TensorType::actual(&tensor),
            tensor: Some(tensor),
            variability: f64::NAN,
            count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::regions::{TectonicRegion, TectonicSubtype};
    use crate::slab::TrenchSide;
    use crate::tensor::TensorComponents;

    #[test]
    fn test_scenario_sumatra_composite_interface() {
        let engine = fixtures::engine();
        let hypo = Hypocenter::new(3.295, 95.982, 30.0, 9.1);
        let a = engine.classify(&hypo, None).unwrap();
        assert_eq!(a.tensor_type, TensorType::Composite);
        assert!(a.composite_count >= 3, "got {}", a.composite_count);
        assert_eq!(a.focal_mechanism, FocalMechanism::RS);
        assert_eq!(a.domain, TectonicDomain::SzGeneric);
        assert_eq!(a.subtype, TectonicSubtype::SZInter);
        let flags = a.subduction.unwrap();
        assert!(flags.interface_like && flags.near_interface);
        assert!(a.kagan_angle < 10.0, "got {}", a.kagan_angle);
        assert_eq!(a.slab_region_name.as_deref(), Some("Sumatra-Java"));
        assert!(a.is_oceanic());
        assert!(a.warnings.is_empty(), "got {:?}", a.warnings);
    }

    #[test]
    fn test_scenario_landers_strike_slip() {
        let engine = fixtures::engine();
        let hypo = Hypocenter::new(34.200, -116.437, -0.1, 7.3);
        let a = engine.classify(&hypo, Some(fixtures::landers_tensor())).unwrap();
        assert_eq!(a.hypocenter.depth, 0.0);
        assert_eq!(a.focal_mechanism, FocalMechanism::SS);
        assert_eq!(a.region, TectonicRegion::Active);
        assert_eq!(a.subtype, TectonicSubtype::ACR);
        assert!(matches!(a.tensor_type, TensorType::Actual { .. }));
        assert!(a.composite_variability.is_nan());
        assert!(a.slab.is_none());
        assert!(a.kagan_angle.is_nan());
    }

    #[test]
    fn test_scenario_no_slab_uses_static_subtype() {
        let engine = fixtures::engine();
        let hypo = Hypocenter::new(0.0, 70.0, 20.0, 6.0);
        let a = engine.classify(&hypo, Some(fixtures::thrust_tensor())).unwrap();
        assert_eq!(a.domain, TectonicDomain::SzGeneric);
        assert!(a.slab.is_none());
        assert!(a.subduction.is_none(), "subduction tests should not run");
        assert_eq!(a.subtype, TectonicSubtype::SZInter);

        let hypo = Hypocenter::new(0.0, 70.0, 120.0, 6.0);
        let a = engine.classify(&hypo, Some(fixtures::thrust_tensor())).unwrap();
        assert_eq!(a.subtype, TectonicSubtype::SZIntra);
    }

    #[test]
    fn test_outside_trench_reassigns_domain() {
        let engine = fixtures::engine();
        let hypo = Hypocenter::new(0.0, 129.0, 20.0, 6.0);
        let a = engine.classify(&hypo, Some(fixtures::thrust_tensor())).unwrap();
        assert_eq!(a.slab.as_ref().unwrap().source, SlabSource::Trench(TrenchSide::Outside));
        assert_eq!(a.domain, TectonicDomain::SzOuterTrench);
        assert_eq!(a.subtype, TectonicSubtype::ACR);
        assert!(a.subduction.is_none());
    }

    #[test]
    fn test_inside_trench_runs_subduction_tests() {
        let engine = fixtures::engine();
        let hypo = Hypocenter::new(0.0, 131.0, 34.0, 6.0);
        let a = engine.classify(&hypo, None).unwrap();
        let slab = a.slab.as_ref().unwrap();
        assert_eq!(slab.source, SlabSource::Trench(TrenchSide::Inside));
        assert_eq!(a.tensor_type, TensorType::None);
        let flags = a.subduction.unwrap();
        assert!(flags.near_interface);
        assert_eq!(a.subtype, TectonicSubtype::SZInter);
        assert_eq!(a.warnings, vec!["No focal mechanism available".to_string()]);
    }

    #[test]
    fn test_backarc_landward_of_trench() {
        let engine = fixtures::engine();
        let hypo = Hypocenter::new(0.0, 133.0, 34.0, 6.0);
        let a = engine.classify(&hypo, Some(fixtures::thrust_tensor())).unwrap();
        assert_eq!(a.slab.as_ref().unwrap().source, SlabSource::Trench(TrenchSide::Inside));
        assert!(a.has_backarc);
        assert_eq!(a.domain, TectonicDomain::SzInlandBackArc);
        assert_eq!(a.subtype, TectonicSubtype::ACR);
        assert!(a.subduction.is_none(), "subduction tests should not run");
    }

    #[test]
    fn test_slab1_grid_reports_interface_strike() {
        let engine = fixtures::slab1_engine();
        let hypo = Hypocenter::new(3.295, 95.982, 30.0, 9.1);
        let tensor = MomentTensor::from_angles(315.0, 15.0, 90.0, 9.1);
        let a = engine.classify(&hypo, Some(tensor)).unwrap();
        let slab = a.slab.as_ref().unwrap();
        assert_eq!(slab.source, SlabSource::Grid(crate::slab::SlabGeneration::Slab1));
        assert!((slab.strike - 315.0).abs() < 1e-9, "got {}", slab.strike);
        assert!((slab.dip - 15.0).abs() < 1e-9, "got {}", slab.dip);
        assert!(a.kagan_angle < 1.0, "got {}", a.kagan_angle);
        let flags = a.subduction.unwrap();
        assert!(flags.interface_like && flags.near_interface);
        assert_eq!(a.subtype, TectonicSubtype::SZInter);
    }

    #[test]
    fn test_backarc_without_slab() {
        let engine = fixtures::engine();
        let hypo = Hypocenter::new(0.0, 145.0, 60.0, 6.0);
        let a = engine.classify(&hypo, Some(fixtures::thrust_tensor())).unwrap();
        assert!(a.has_backarc);
        assert_eq!(a.domain, TectonicDomain::SzInlandBackArc);
        assert_eq!(a.subtype, TectonicSubtype::SZIntra);
    }

    #[test]
    fn test_deep_event_above_interface() {
        let engine = fixtures::engine();
        // slab at 30 km, event at 100 km is in the slab
        let hypo = Hypocenter::new(3.0, 96.0, 100.0, 6.0);
        let a = engine.classify(&hypo, Some(fixtures::thrust_tensor())).unwrap();
        assert_eq!(a.subtype, TectonicSubtype::SZIntra);
        assert!(a.warnings.is_empty());
    }

    #[test]
    fn test_composite_count_warning() {
        let engine = fixtures::engine();
        // two catalog events sit near this point
        let hypo = Hypocenter::new(40.0, -100.0, 10.0, 5.0);
        let a = engine.classify(&hypo, None).unwrap();
        assert_eq!(a.tensor_type, TensorType::Composite);
        assert_eq!(a.composite_count, 2);
        assert_eq!(a.warning(), "Composite mechanism from 2 events");
    }

    #[test]
    fn test_region_gap_is_an_error() {
        let engine = fixtures::engine();
        let hypo = Hypocenter::new(85.0, 0.0, 10.0, 5.0);
        let err = engine.classify(&hypo, Some(fixtures::thrust_tensor())).unwrap_err();
        assert!(matches!(err, ClassifyError::Region(RegionError::RegionNotFound { .. })));
    }

    #[test]
    fn test_event_lookup_without_remote() {
        let engine = fixtures::engine();
        assert!(matches!(
            engine.classify_event("us1000abcd", 6.0),
            Err(ClassifyError::RemoteUnavailable)
        ));
    }

    #[test]
    fn test_batch_keeps_order() {
        let engine = fixtures::engine();
        let landers = fixtures::landers_tensor().components;
        let events = vec![
            EventInput {
                hypocenter: Hypocenter::new(34.2, -116.437, 5.0, 7.3),
                tensor: Some(landers),
                event_id: None,
            },
            EventInput {
                hypocenter: Hypocenter::new(85.0, 0.0, 10.0, 5.0),
                tensor: Some(TensorComponents::new(1.0, -1.0, 0.0, 0.0, 0.0, 0.0)),
                event_id: None,
            },
            EventInput {
                hypocenter: Hypocenter::new(3.295, 95.982, 30.0, 9.1),
                tensor: None,
                event_id: None,
            },
        ];
        let results = engine.classify_batch(&events);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().focal_mechanism, FocalMechanism::SS);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().subtype, TectonicSubtype::SZInter);
    }
}
