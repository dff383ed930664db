mod client;

pub use client::WhisperClient;
