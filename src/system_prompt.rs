//! Assistant instructions
//!
//! The instructions travel out-of-band from the conversation on every reply
//! request. A deployment can replace the built-in persona with a file.

use crate::config::ConfigError;
use std::path::Path;

/// Built-in persona used when no instructions file is configured
const BASE_INSTRUCTIONS: &str = r"You are the friendly website assistant for a small web agency that offers web development, web design, hosting and technical consulting.

Answer visitors' questions about the agency's services, typical project process and how to get in touch. Keep answers short: two or three sentences unless the visitor asks for detail. Use plain language and avoid jargon.

If you do not know something specific, such as prices for a custom project or availability on a date, say so and suggest the visitor use the contact form. Never invent facts about the agency. Politely decline requests unrelated to the agency or its services.";

/// Resolve the instructions text.
///
/// With a path, the file's trimmed contents are used and an empty file is
/// an error. Without one, the built-in persona applies.
pub fn load_instructions(path: Option<&Path>) -> Result<String, ConfigError> {
    let Some(path) = path else {
        return Ok(BASE_INSTRUCTIONS.to_string());
    };

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Instructions {
        path: path.to_path_buf(),
        source,
    })?;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyInstructions(path.to_path_buf()));
    }

    tracing::info!(path = %path.display(), chars = trimmed.chars().count(), "Loaded instructions file");
    Ok(trimmed.to_string())
}
