//! Text-generation provider implementations.

pub mod anthropic;

pub use anthropic::AnthropicProvider;
