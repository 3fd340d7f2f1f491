use crate::error::VolSpreadError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), VolSpreadError>;
}

/// Rejects negative, NaN and infinite rates.
pub(crate) fn ensure_rate(section: &str, name: &str, value: f64) -> Result<(), VolSpreadError> {
    if !value.is_finite() || value < 0.0 {
        return Err(VolSpreadError::Configuration(format!(
            "{}.{} must be a finite non-negative number, got {}",
            section, name, value
        )));
    }
    Ok(())
}
