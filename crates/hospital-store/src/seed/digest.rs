//! Seed digests
//!
//! The digest is the SHA-256 of the parsed seed re-serialized as JSON, so
//! formatting, comments and key order in the YAML do not change it.

use crate::errors::Result;
use crate::seed::format_v0::SeedV0;
use hospital_core::{ExError, ExErrorKind};
use sha2::{Digest, Sha256};

/// # Errors
/// `Serialization` if the seed cannot be rendered as JSON.
pub fn compute_seed_digest(seed: &SeedV0) -> Result<String> {
    let json = serde_json::to_string(seed).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("seed_digest")
            .with_message(e.to_string())
    })?;
    Ok(hex::encode(Sha256::digest(json.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::parse_seed_str;

    #[test]
    fn test_digest_ignores_yaml_layout() {
        let a = parse_seed_str("schema_version: 0\nhospitals: []\n").unwrap();
        let b = parse_seed_str("# comment\nhospitals: []\nschema_version: 0\n").unwrap();
        assert_eq!(compute_seed_digest(&a).unwrap(), compute_seed_digest(&b).unwrap());
    }

    #[test]
    fn test_digest_changes_with_content() {
        let a = parse_seed_str("schema_version: 0\nhospitals: []\n").unwrap();
        let b = parse_seed_str(
            "schema_version: 0\nhospitals:\n  - { name: H, address: A, phone: '1' }\n",
        )
        .unwrap();
        assert_ne!(compute_seed_digest(&a).unwrap(), compute_seed_digest(&b).unwrap());
    }
}
