pub mod client;
pub mod error;
pub mod types;

pub use client::{resolve_credential, YouTubeClient};
pub use error::YouTubeError;
