//! YouTube Data API access for vidmatch.
//!
//! The [`traits::VideoService`] trait is the seam the matcher talks to;
//! [`youtube::YouTubeClient`] is the HTTPS implementation and
//! [`lookup`] holds the batching and search helpers built on top of it.

pub mod lookup;
pub mod traits;
pub mod youtube;

pub use traits::{VideoCandidate, VideoService};
pub use youtube::{YouTubeClient, YouTubeError};
