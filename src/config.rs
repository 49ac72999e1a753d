use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    report::Format,
    sim::Policy,
    workload::DEFAULT_JOB_COUNT,
};

/// Simulation settings, loadable from a JSON file. Missing fields take the
/// reference values: 5000 jobs per input and the five default policies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Jobs expected per input; `null` accepts whatever the input holds.
    pub job_count: Option<usize>,
    pub policies: Vec<Policy>,
    pub parallel: bool,
    pub format: Format,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            job_count: Some(DEFAULT_JOB_COUNT),
            policies: Policy::defaults(),
            parallel: false,
            format: Format::default(),
        }
    }
}

impl SimConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.policies.is_empty() {
            return Err(Error::InvalidPolicy("no policies configured".to_string()));
        }
        self.policies.iter().try_for_each(Policy::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_reference_setup() {
        let config = SimConfig::from_json("{}").unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.job_count, Some(5000));
        assert_eq!(config.policies.len(), 5);
    }

    #[test]
    fn overrides_from_json() {
        let config = SimConfig::from_json(
            r#"{
                "job_count": null,
                "policies": [{"kind": "fifo"}, {"kind": "rr", "quantum": 10}],
                "parallel": true,
                "format": "json"
            }"#,
        )
        .unwrap();
        assert_eq!(config.job_count, None);
        assert_eq!(config.policies, vec![Policy::Fifo, Policy::Rr { quantum: 10 }]);
        assert!(config.parallel);
        assert_eq!(config.format, Format::Json);
    }

    #[test]
    fn rejects_zero_quantum_and_unknown_keys() {
        assert!(SimConfig::from_json(r#"{"policies": [{"kind": "stcf", "slice": 0}]}"#).is_err());
        assert!(SimConfig::from_json(r#"{"policies": []}"#).is_err());
        assert!(matches!(
            SimConfig::from_json(r#"{"quantum": 3}"#),
            Err(Error::Config(_))
        ));
    }
}
