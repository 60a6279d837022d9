//! Concrete API wrappers behind the pipeline's collaborator traits.
//!
//! - [`forem`]: article listing and comment threads
//! - [`youtube`]: video titles via oEmbed
//! - [`spotify`]: token refresh, track search, playlist membership and additions

pub mod forem;
pub mod spotify;
pub mod youtube;

pub use forem::ForemApi;
pub use spotify::SpotifyApi;
pub use youtube::OEmbedApi;
