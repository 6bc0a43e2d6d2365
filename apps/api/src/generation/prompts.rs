// Prompt construction for design-to-code generation.
// The design travels as base64 text inside the prompt; no image channel is used.

/// Builds the prompt sent to the generation API.
///
/// `encoded_design` must be the standard (padded) base64 encoding of the uploaded file.
pub fn compose_prompt(framework: &str, encoded_design: &str) -> String {
    format!("Convert the following design into {framework} code:\n\n{encoded_design}")
}
