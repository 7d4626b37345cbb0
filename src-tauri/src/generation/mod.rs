pub mod client;
pub mod download;
pub mod orchestrator;
pub mod types;

pub use client::{GenerationService, HttpGenerationService};
pub use orchestrator::RequestOrchestrator;
pub use types::{GenerationResponse, GenerationResult, GenerationState};
