/// Represents the provider (backend) used for large language model (LLM)
/// inference.
///
/// This enum distinguishes between different backends such as local Ollama
/// or the Anthropic Messages API.
///
/// Adding more providers in the future (e.g., OpenAI, Mistral API) can be
/// done by extending this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
    /// Anthropic Messages API (Claude family).
    Anthropic,
}
