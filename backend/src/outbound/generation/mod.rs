//! Outbound adapter for the external generation service.

mod dto;
mod http_backend;

pub use http_backend::GenerationHttpBackend;
