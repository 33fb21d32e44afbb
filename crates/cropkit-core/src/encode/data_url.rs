//! `data:` URL rendering for handing encoded crops to the page as a string.

use base64::{engine::general_purpose::STANDARD, Engine};

use super::OutputFormat;

/// Wrap encoded bytes as `data:<mime>;base64,<payload>`.
pub fn to_data_url(bytes: &[u8], format: OutputFormat) -> String {
    format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes))
}
