//! Configuration types for the search engine.
//!
//! This module selects the pairing backend and curve, maps a requested
//! security level onto a curve, and carries the hash domain-separation tags
//! and identifier prefixes the engine uses.
//!
//! # Example
//!
//! ```rust
//! use edgematch::{BackendConfig, BackendId, CurveId, EngineConfig};
//!
//! let config = EngineConfig::default();
//! config.validate().expect("default config is valid");
//! assert_eq!(config.backend, BackendConfig::new(BackendId::Blst, CurveId::Bls12_381));
//! assert_eq!(CurveId::for_security_level(128).unwrap(), CurveId::Bls12_381);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{BackendError, Error};

/// Default domain-separation tag for H1 (node identity to G1).
pub const DEFAULT_IDENTITY_TAG: &str = "EDGEMATCH-V01-H1-BLS12381G1_XMD:SHA-256_SSWU_RO_";
/// Default domain-separation tag for H2 (group domain and keyword to G1).
pub const DEFAULT_KEYWORD_TAG: &str = "EDGEMATCH-V01-H2-BLS12381G1_XMD:SHA-256_SSWU_RO_";

/// Supported pairing-friendly elliptic curves.
///
/// - **BLS12-381**: A 381-bit curve providing ~128 bits of security.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CurveId {
    /// BLS12-381 curve (~128-bit security)
    Bls12_381,
}

impl CurveId {
    /// Approximate security level of the curve in bits.
    pub fn security_bits(&self) -> u32 {
        match self {
            CurveId::Bls12_381 => 128,
        }
    }

    /// Picks the curve that satisfies a requested security level.
    ///
    /// Any level up to 128 bits is served by BLS12-381. Requests above that
    /// cannot be met by an available curve.
    ///
    /// ```rust
    /// use edgematch::CurveId;
    ///
    /// assert_eq!(CurveId::for_security_level(80).unwrap(), CurveId::Bls12_381);
    /// assert!(CurveId::for_security_level(192).is_err());
    /// assert!(CurveId::for_security_level(0).is_err());
    /// ```
    pub fn for_security_level(bits: u32) -> Result<Self, Error> {
        if bits == 0 {
            return Err(Error::InvalidConfig(
                "security level must be greater than 0".into(),
            ));
        }
        if bits <= CurveId::Bls12_381.security_bits() {
            Ok(CurveId::Bls12_381)
        } else {
            Err(Error::Backend(BackendError::UnsupportedCurve(
                "no available curve offers more than 128-bit security",
            )))
        }
    }
}

/// Cryptographic backend implementations.
///
/// - **blst**: Optimized implementation for BLS12-381 using assembly.
///
/// # Feature Flags
///
/// - `blst` (default): Enable blstrs with BLS12-381
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum BackendId {
    /// blstrs backend (optimized assembly, BLS12-381 only)
    Blst,
}

/// Backend and curve configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// The cryptographic backend to use
    pub backend: BackendId,
    /// The pairing-friendly curve to use
    pub curve: CurveId,
}

impl BackendConfig {
    /// Creates a new backend configuration.
    pub fn new(backend: BackendId, curve: CurveId) -> Self {
        Self { backend, curve }
    }

    /// Validates that this backend/curve combination is compiled in.
    pub fn ensure_supported(&self) -> Result<(), BackendError> {
        match (self.backend, self.curve) {
            (BackendId::Blst, CurveId::Bls12_381) => {
                if cfg!(feature = "blst") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with `blst` feature to use the blstrs backend",
                    ))
                }
            }
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(BackendId::Blst, CurveId::Bls12_381)
    }
}

/// Engine-wide settings.
///
/// # Fields
///
/// - `backend`: Backend and curve configuration
/// - `identity_tag`: hash-to-curve tag for H1 (node ids)
/// - `keyword_tag`: hash-to-curve tag for H2 (group domain ‖ keyword)
/// - `encapsulation_prefix`: prefix of encapsulation ids
/// - `trapdoor_prefix`: prefix of trapdoor ids
///
/// Every engine that must agree on matches has to share the same tags.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub backend: BackendConfig,
    pub identity_tag: String,
    pub keyword_tag: String,
    pub encapsulation_prefix: String,
    pub trapdoor_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            identity_tag: DEFAULT_IDENTITY_TAG.into(),
            keyword_tag: DEFAULT_KEYWORD_TAG.into(),
            encapsulation_prefix: "enc_".into(),
            trapdoor_prefix: "td_".into(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration. Missing fields take their defaults.
    ///
    /// ```rust
    /// use edgematch::EngineConfig;
    ///
    /// let config = EngineConfig::from_json(r#"{"trapdoor_prefix": "search_"}"#).unwrap();
    /// assert_eq!(config.trapdoor_prefix, "search_");
    /// assert_eq!(config.encapsulation_prefix, "enc_");
    /// ```
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfig(format!("unreadable config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// This checks that:
    /// - The backend/curve combination is compiled in
    /// - The H1 and H2 tags are non-empty and distinct
    /// - The id prefixes are distinct and free of the trapdoor delimiter `|`
    pub fn validate(&self) -> Result<(), Error> {
        self.backend.ensure_supported().map_err(Error::Backend)?;
        if self.identity_tag.is_empty() || self.keyword_tag.is_empty() {
            return Err(Error::InvalidConfig(
                "hash domain-separation tags must not be empty".into(),
            ));
        }
        if self.identity_tag == self.keyword_tag {
            return Err(Error::InvalidConfig(
                "identity and keyword hashes need distinct tags".into(),
            ));
        }
        if self.encapsulation_prefix == self.trapdoor_prefix {
            return Err(Error::InvalidConfig(
                "encapsulation and trapdoor ids need distinct prefixes".into(),
            ));
        }
        if self.encapsulation_prefix.contains(['|', '"'])
            || self.trapdoor_prefix.contains(['|', '"'])
        {
            return Err(Error::InvalidConfig(
                "id prefixes must not contain '|' or '\"'".into(),
            ));
        }
        Ok(())
    }
}
