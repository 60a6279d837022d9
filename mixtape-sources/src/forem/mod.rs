//! Forem community API: the article feed and its comment threads.

pub mod client;

pub use client::{ArticleFeed, ForemApi};
