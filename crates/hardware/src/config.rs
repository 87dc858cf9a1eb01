//! Configuration for the vector execution engine.
//!
//! This module defines the configuration consumed by [`Vpu::new`](crate::core::execute::Vpu::new).
//! It provides:
//! 1. **Defaults:** Reset-state constants for the control register and vector length.
//! 2. **Structure:** A flat [`Config`] deserialized from JSON with per-field defaults.
//! 3. **Validation:** Checks that the configured initial MXCSR is writable.
//!
//! Configuration is supplied as JSON or built with `Config::default()`:
//!
//! ```json
//! {
//!     "initial_mxcsr": 8064,
//!     "max_vector_width": "V256",
//!     "trace_instructions": true
//! }
//! ```

use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::core::arch::mxcsr::Mxcsr;
use crate::core::units::vpu::width::VectorWidth;

/// Default configuration constants.
mod defaults {
    use crate::core::arch::mxcsr::MXCSR_DEFAULT;
    use crate::core::units::vpu::width::VectorWidth;

    /// MXCSR at reset: all exceptions masked, round to nearest, no DAZ/FZ.
    pub const INITIAL_MXCSR: u32 = MXCSR_DEFAULT;

    /// Widest supported vector length (AVX-512).
    pub const MAX_VECTOR_WIDTH: VectorWidth = VectorWidth::V512;
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// MXCSR value a fresh control register starts from.
    #[serde(default = "Config::default_initial_mxcsr")]
    pub initial_mxcsr: u32,

    /// Widest vector length accepted; wider packed instructions are rejected.
    #[serde(default = "Config::default_max_vector_width")]
    pub max_vector_width: VectorWidth,

    /// Emit a `trace` event for every executed instruction.
    #[serde(default)]
    pub trace_instructions: bool,
}

impl Config {
    fn default_initial_mxcsr() -> u32 {
        defaults::INITIAL_MXCSR
    }

    fn default_max_vector_width() -> VectorWidth {
        defaults::MAX_VECTOR_WIDTH
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Mxcsr`] if the initial MXCSR sets reserved bits.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for values the engine cannot honor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Mxcsr`] if the initial MXCSR sets reserved bits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let _ = Mxcsr::new(self.initial_mxcsr)?;
        Ok(())
    }

    /// Builds the control register described by `initial_mxcsr`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Mxcsr`] if the value sets reserved bits.
    pub fn mxcsr(&self) -> Result<Mxcsr, ConfigError> {
        Ok(Mxcsr::new(self.initial_mxcsr)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_mxcsr: defaults::INITIAL_MXCSR,
            max_vector_width: defaults::MAX_VECTOR_WIDTH,
            trace_instructions: false,
        }
    }
}
