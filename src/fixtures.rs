//! Synthetic resources shared by engine and bundle tests.
//!
//! Region layers tile longitude bands between 80S and 80N:
//! stable west of 130W, active from 130W to 60E, subduction from 60E to
//! 150E (back-arc east of 132E) and volcanic east of 150E. A Sumatra-like
//! slab grid covers 90E to 100E and a north-striking trench runs along 130E.

use crate::catalog::CatalogRow;
use crate::geometry::Polygon;
use crate::regime::{RegimeEngine, StrecConfig};
use crate::regions::{PolygonLayer, RegionFeature};
use crate::slab::{GridBounds, RasterGrid, TrenchLine, TrenchVertex};
use crate::store::{BundleLayers, DataBundle};
use crate::tensor::{plane_to_tensor, MomentTensor};

fn band(lon_min: f64, lon_max: f64) -> Polygon {
    Polygon::lat_lon_box(-80.0, 80.0, lon_min, lon_max)
}

fn constant_grid(value: f64) -> RasterGrid {
    let bounds = GridBounds {
        xmin: 90.0,
        xmax: 100.0,
        ymin: -5.0,
        ymax: 8.0,
    };
    RasterGrid::from_fn(bounds, 11, 14, |_, _| value).unwrap()
}

fn row(lat: f64, lon: f64, strike: f64, dip: f64, rake: f64, magnitude: f64) -> CatalogRow {
    CatalogRow {
        time: None,
        lat,
        lon,
        depth: 30.0,
        magnitude,
        components: plane_to_tensor(strike, dip, rake, magnitude),
    }
}

pub fn bundle() -> DataBundle {
    let layers = BundleLayers {
        stable: PolygonLayer::new("stable", vec![RegionFeature::new(band(-180.0, -130.0))]),
        active: PolygonLayer::new(
            "active",
            vec![RegionFeature::new(band(-130.0, 60.0)).with_domain("ACR (shallow)")],
        ),
        subduction: PolygonLayer::new(
            "subduction",
            vec![
                RegionFeature::new(band(60.0, 132.0)).with_domain("SZ (generic)"),
                RegionFeature::new(band(132.0, 150.0))
                    .with_domain("SZ (generic)")
                    .with_backarc(true),
            ],
        ),
        volcanic: PolygonLayer::new("volcanic", vec![RegionFeature::new(band(150.0, 180.0))]),
        oceanic: PolygonLayer::new(
            "oceanic",
            vec![RegionFeature::new(Polygon::lat_lon_box(-10.0, 10.0, 80.0, 100.0))],
        ),
    };

    let mut bundle = DataBundle {
        layers,
        ..Default::default()
    };
    bundle.slab_grids.insert("sum_slab2_dep_02.23.18.grd".to_string(), constant_grid(-30.0));
    bundle.slab_grids.insert("sum_slab2_dip_02.23.18.grd".to_string(), constant_grid(15.0));
    bundle.slab_grids.insert("sum_slab2_str_02.23.18.grd".to_string(), constant_grid(315.0));
    bundle.slab_grids.insert("sum_slab2_unc_02.23.18.grd".to_string(), constant_grid(5.0));
    bundle.max_interface_depths.insert("sum".to_string(), 55.0);

    bundle.trenches.push(TrenchLine::new(
        "test trench",
        (0..=10).map(|i| TrenchVertex::new(130.0, i as f64 - 5.0, 0.0)).collect(),
    ));

    bundle.catalog = vec![
        row(3.2, 95.9, 315.0, 15.0, 90.0, 5.5),
        row(3.3, 96.0, 315.0, 15.0, 90.0, 6.1),
        row(3.4, 96.1, 315.0, 15.0, 90.0, 5.2),
        row(3.25, 96.05, 315.0, 15.0, 90.0, 7.0),
        row(3.35, 95.95, 315.0, 15.0, 90.0, 5.8),
        row(40.1, -100.1, 0.0, 45.0, -90.0, 4.5),
        row(39.9, -99.9, 0.0, 45.0, -90.0, 4.8),
    ];
    bundle
}

pub fn engine() -> RegimeEngine {
    bundle().build_engine(StrecConfig::default()).unwrap()
}

/// The same world with the Sumatra slab stored in Slab1 conventions.
pub fn slab1_engine() -> RegimeEngine {
    let mut bundle = bundle();
    bundle.slab_grids.clear();
    bundle.slab_grids.insert("sum_slab1.0_clip.grd".to_string(), constant_grid(-30.0));
    bundle.slab_grids.insert("sum_slab1.0_dipclip.grd".to_string(), constant_grid(-15.0));
    bundle.slab_grids.insert("sum_slab1.0_strclip.grd".to_string(), constant_grid(315.0));
    bundle.build_engine(StrecConfig::default()).unwrap()
}

/// Strike-slip solution of the 1992 Landers earthquake.
pub fn landers_tensor() -> MomentTensor {
    MomentTensor::from_angles(341.0, 70.0, 172.0, 7.3).with_provenance("gcmt", "Mwc")
}

/// A shallow thrust.
pub fn thrust_tensor() -> MomentTensor {
    MomentTensor::from_angles(0.0, 20.0, 90.0, 6.0)
}
