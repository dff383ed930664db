mod client;

pub use client::LanguageToolClient;
