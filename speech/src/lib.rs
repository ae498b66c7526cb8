//! Speech collaborators: transcription (Google Speech) and synthesis
//! (ElevenLabs).
//!
//! Both are thin, black-box text↔audio clients with strict input guards:
//! empty audio short-circuits to empty text, and over-long text is
//! rejected before the synthesis service is ever called.

pub mod error;
pub mod stt;
pub mod tts;

pub use error::SpeechError;
pub use stt::SpeechToTextClient;
pub use tts::TextToSpeechClient;
