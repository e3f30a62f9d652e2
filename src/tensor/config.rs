//! Configuration for focal mechanism classification.

use serde::{Deserialize, Serialize};

/// Plunge thresholds (degrees) used to classify a focal mechanism.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FocalMechanismConfig {
    /// Minimum T-axis plunge for a reverse mechanism.
    pub tplunge_rs: f64,
    /// Maximum N-axis plunge for dip-slip (reverse or normal) mechanisms.
    pub bplunge_ds: f64,
    /// Minimum N-axis plunge for a strike-slip mechanism.
    pub bplunge_ss: f64,
    /// Minimum P-axis plunge for a normal mechanism.
    pub pplunge_nm: f64,
    /// Maximum |T - P| plunge difference for a strike-slip mechanism.
    pub delplunge_ss: f64,
}

impl Default for FocalMechanismConfig {
    fn default() -> Self {
        Self {
            tplunge_rs: 50.0,
            bplunge_ds: 30.0,
            bplunge_ss: 55.0,
            pplunge_nm: 55.0,
            delplunge_ss: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FocalMechanismConfig::default();
        assert_eq!(config.tplunge_rs, 50.0);
        assert_eq!(config.bplunge_ds, 30.0);
        assert!(config.bplunge_ss > config.bplunge_ds);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: FocalMechanismConfig = serde_json::from_str(r#"{"tplunge_rs": 45.0}"#).unwrap();
        assert_eq!(config.tplunge_rs, 45.0);
        assert_eq!(config.delplunge_ss, 20.0);
    }
}
