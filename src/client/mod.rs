//! Client side of the edge: the response envelope and a typed API client.

pub mod api;
pub mod envelope;

pub use api::{ClientError, LabelScore, MoodLensClient, Tone};
pub use envelope::Envelope;
