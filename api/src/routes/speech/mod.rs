pub mod speech_types;
pub mod synthesize_route;
pub mod transcribe_route;
