//! Roster loading: built-in default plus JSON file override

use std::path::Path;

use anyhow::{Context, Result};
use podmix_core::{NodePool, Roster};

/// The statically configured production pools. Adjust here (or pass
/// `--roster`) when pools or nodes change.
pub fn default_roster() -> Roster {
    Roster::new(vec![
        NodePool::new(
            "LOC_PRD_31",
            "ocid1.nodepool.oc1.iad.aaaaaaaasohuq3wqggkejptexop2qmryo572wxdp5ovwoyld6n225a2kulgq",
            vec![
                "10.140.13.91".to_string(),
                "10.140.13.66".to_string(),
                "10.140.13.80".to_string(),
                "10.140.13.114".to_string(),
                "10.140.13.102".to_string(),
                "10.140.13.94".to_string(),
                "10.140.13.72".to_string(),
            ],
        ),
        NodePool::new(
            "LOC_PRD_APLICACIONES_31",
            "ocid1.nodepool.oc1.iad.aaaaaaaa3cd533y3wa7kp6paf3xahx7xdzkrfnhoyobhggc4hneyrhzr54sa",
            vec![
                "10.140.13.96".to_string(),
                "10.140.13.120".to_string(),
                "10.140.13.109".to_string(),
                "10.140.13.78".to_string(),
                "10.140.13.118".to_string(),
            ],
        ),
    ])
}

/// Load the roster from a JSON file, or fall back to the built-in
/// default. The roster itself is validated later by the report
/// driver, before any cluster access.
pub fn load(path: Option<&Path>) -> Result<Roster> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read roster file {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse roster file {}", path.display()))
        }
        None => Ok(default_roster()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_roster_is_valid() {
        let roster = default_roster();
        assert!(roster.validate().is_ok());
        assert_eq!(roster.pools.len(), 2);
        assert_eq!(roster.pools[0].nodes.len(), 7);
        assert_eq!(roster.pools[1].nodes.len(), 5);
    }

    #[test]
    fn load_without_path_uses_default() {
        let roster = load(None).unwrap();
        assert_eq!(roster.pools[0].name, "LOC_PRD_31");
    }

    #[test]
    fn load_reads_roster_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"pools":[{{"name":"test","id":"ocid1.x","nodes":["10.0.0.1"]}}]}}"#
        )
        .unwrap();

        let roster = load(Some(file.path())).unwrap();
        assert_eq!(roster.pools.len(), 1);
        assert_eq!(roster.pools[0].name, "test");
    }

    #[test]
    fn load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(load(Some(file.path())).is_err());
    }
}
