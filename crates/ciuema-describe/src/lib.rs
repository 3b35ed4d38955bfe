pub mod gemini;

use async_trait::async_trait;
use ciuema_core::config::DescribeConfig;
use ciuema_core::error::CiuemaError;
use ciuema_credentials::{describe_api_key, CredentialStore};

/// Shown in place of a description when no generator is configured.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Description generator not configured. Please add a description manually.";

/// Shown in place of a description when generation fails.
pub const FAILED_MESSAGE: &str =
    "Failed to generate description. Please try again or write one manually.";

/// Drafts a catalog description from a species' two names.
#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    async fn generate(
        &self,
        common_name: &str,
        scientific_name: &str,
    ) -> Result<String, CiuemaError>;
}

/// The instruction sent to the text-generation model.
pub fn prompt(common_name: &str, scientific_name: &str) -> String {
    format!(
        "Write a concise, one-paragraph description for the aquatic species \"{common_name}\" \
         (scientific name: {scientific_name}). Focus on its key characteristics, appearance, \
         and natural habitat. The description should be suitable for a laboratory catalog."
    )
}

/// Best-effort description: never fails, falling back to a fixed message when
/// no generator is available or the call errors.
pub async fn describe(
    generator: Option<&dyn DescriptionGenerator>,
    common_name: &str,
    scientific_name: &str,
) -> String {
    let Some(generator) = generator else {
        return NOT_CONFIGURED_MESSAGE.to_string();
    };
    match generator.generate(common_name, scientific_name).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("description generation failed: {e}");
            FAILED_MESSAGE.to_string()
        }
    }
}

/// Build the configured generator, or `None` when it is disabled or no API
/// key is stored.
pub fn from_config(
    config: &DescribeConfig,
    credentials: &dyn CredentialStore,
) -> Result<Option<Box<dyn DescriptionGenerator>>, CiuemaError> {
    if !config.enabled {
        tracing::debug!("description generator disabled in config");
        return Ok(None);
    }
    let Some(api_key) = describe_api_key(credentials) else {
        tracing::warn!("no API key stored, description generation is unavailable");
        return Ok(None);
    };
    let generator = gemini::GeminiGenerator::new(config, api_key)?;
    Ok(Some(Box::new(generator)))
}
