//! Focal mechanism classification from principal-axis plunges.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::FocalMechanismConfig;
use super::moment::MomentTensor;

/// Coarse faulting style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocalMechanism {
    /// Reverse (thrust) faulting.
    RS,
    /// Strike-slip faulting.
    SS,
    /// Normal faulting.
    NM,
    /// Oblique or unknown.
    ALL,
}

impl FocalMechanism {
    /// Classifies a mechanism from T, N and P plunges in degrees.
    pub fn from_plunges(t_plunge: f64, n_plunge: f64, p_plunge: f64, config: &FocalMechanismConfig) -> Self {
        if t_plunge >= config.tplunge_rs && n_plunge <= config.bplunge_ds {
            return FocalMechanism::RS;
        }
        if n_plunge >= config.bplunge_ss && (t_plunge - p_plunge).abs() <= config.delplunge_ss {
            return FocalMechanism::SS;
        }
        if p_plunge >= config.pplunge_nm && n_plunge <= config.bplunge_ds {
            return FocalMechanism::NM;
        }
        FocalMechanism::ALL
    }

    /// Classifies a tensor, or returns `ALL` when there is none.
    pub fn classify(tensor: Option<&MomentTensor>, config: &FocalMechanismConfig) -> Self {
        match tensor {
            Some(mt) => Self::from_plunges(mt.t.plunge, mt.n.plunge, mt.p.plunge, config),
            None => FocalMechanism::ALL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FocalMechanism::RS => "RS",
            FocalMechanism::SS => "SS",
            FocalMechanism::NM => "NM",
            FocalMechanism::ALL => "ALL",
        }
    }
}

impl fmt::Display for FocalMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
