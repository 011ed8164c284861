//! Load MD3 animated meshes into renderer-ready surfaces.
//!
//! This crate fetches model bytes (over HTTP or from disk), decodes them with
//! [`md3_decode`], and keeps the result in a [`Model`] container that owns
//! the surfaces and their material slots.
//!
//! # Example
//!
//! ```no_run
//! use md3::{Client, MemoryCache, Model};
//!
//! # async fn run() -> md3::Result<()> {
//! let client = Client::with_cache(MemoryCache::new());
//! let mut model: Model<()> = Model::with_base("https://example.com/players/sarge/");
//! model.load(&client, "lower.md3").await?;
//!
//! for surface in model.surfaces() {
//!     println!("{}: {} vertices", surface.name(), surface.mesh().vertex_count());
//! }
//! # Ok(())
//! # }
//! ```

pub mod animation;
pub mod cache;
pub mod client;
pub mod error;
pub mod model;
pub mod path;

pub use animation::{DEFAULT_FRAME_RATE, FrameClock};
pub use cache::{Cache, MemoryCache, NoCache};
pub use client::Client;
pub use error::{Error, Result};
pub use model::{LoadState, Model, SceneNode, Surface};
pub use path::get_absolute_path;

pub use md3_decode::{DecodeError, DecodedModel, DecodedSurface, Header, Mesh, SurfaceHeader};
