// Design-to-code generation
// Implements: multipart upload parsing, prompt composition, the generation call.
// All LLM calls go through llm_client — no direct OpenAI calls here.

pub mod frameworks;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod upload;
