//! Model container: decoded surfaces, material slots and scene attachment.

use std::collections::BTreeMap;
use std::time::Duration;

use md3_decode::{DecodedSurface, Header, Mesh, parse_header, parse_surfaces};

use crate::animation::FrameClock;
use crate::cache::Cache;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::path::get_absolute_path;

/// Lifecycle of a [`Model`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing loaded, or the last load failed.
    #[default]
    Empty,
    /// Bytes have been requested from the transport.
    Loading,
    /// The header is decoded and surfaces are being parsed.
    HeaderParsed,
    /// Surfaces are decoded and available.
    Ready,
}

/// Capability of a scene-graph node that can hold model surfaces.
pub trait SceneNode<M> {
    fn add_child(&mut self, surface: &Surface<M>);
}

/// A decoded surface paired with its material.
#[derive(Debug, Clone)]
pub struct Surface<M> {
    index: usize,
    decoded: DecodedSurface,
    /// Mesh of the current frame, when it is not frame 0.
    pose: Option<Mesh>,
    frame: usize,
    material: M,
}

impl<M> Surface<M> {
    fn new(index: usize, decoded: DecodedSurface, material: M) -> Self {
        Self {
            index,
            decoded,
            pose: None,
            frame: 0,
            material,
        }
    }

    /// Position of this surface in file order, which is also its material slot.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.decoded.name
    }

    /// Mesh for the current frame.
    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        self.pose.as_ref().unwrap_or(&self.decoded.mesh)
    }

    #[must_use]
    pub fn material(&self) -> &M {
        &self.material
    }

    #[must_use]
    pub fn frame(&self) -> usize {
        self.frame
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.decoded.frames.len()
    }

    #[must_use]
    pub fn decoded(&self) -> &DecodedSurface {
        &self.decoded
    }

    /// Switch the mesh to another animation frame.
    pub fn set_frame(&mut self, frame: usize) -> Result<()> {
        if frame == self.frame {
            return Ok(());
        }
        self.pose = match frame {
            0 => None,
            _ => Some(self.decoded.mesh_for_frame(frame)?),
        };
        self.frame = frame;
        Ok(())
    }
}

/// An MD3 model: the source buffer, its decoded surfaces and their materials.
///
/// Materials are kept in a sparse slot map keyed by surface index. Slots that
/// are still empty when a surface is built get `M::default()`.
#[derive(Debug, Clone)]
pub struct Model<M> {
    base: Option<String>,
    src: Option<String>,
    state: LoadState,
    buffer: Vec<u8>,
    header: Option<Header>,
    surfaces: Vec<Surface<M>>,
    materials: BTreeMap<usize, M>,
    clock: FrameClock,
    tag: Option<String>,
}

impl<M: Default + Clone> Default for Model<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Default + Clone> Model<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: None,
            src: None,
            state: LoadState::Empty,
            buffer: Vec::new(),
            header: None,
            surfaces: Vec::new(),
            materials: BTreeMap::new(),
            clock: FrameClock::default(),
            tag: None,
        }
    }

    /// Create a model whose relative sources resolve against `base`.
    #[must_use]
    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            base: Some(base.into()),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Absolute locator of the current source, if one was set.
    #[must_use]
    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    /// The raw bytes the current surfaces were decoded from.
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    #[must_use]
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    #[must_use]
    pub fn surfaces(&self) -> &[Surface<M>] {
        &self.surfaces
    }

    #[must_use]
    pub fn surface(&self, index: usize) -> Option<&Surface<M>> {
        self.surfaces.get(index)
    }

    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Name of the tag this model attaches to on its parent.
    pub fn set_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn frame_rate(&self) -> f32 {
        self.clock.frames_per_second
    }

    pub fn set_frame_rate(&mut self, frames_per_second: f32) -> &mut Self {
        self.clock = FrameClock::new(frames_per_second);
        self
    }

    /// Override the material of surface `index`.
    ///
    /// The slot is remembered for future loads and applied immediately if the
    /// surface already exists.
    pub fn set_material(&mut self, material: M, index: usize) {
        if let Some(surface) = self.surfaces.get_mut(index) {
            surface.material = material.clone();
        }
        self.materials.insert(index, material);
    }

    /// Material slot for surface `index`, if one has been assigned.
    #[must_use]
    pub fn material(&self, index: usize) -> Option<&M> {
        self.materials.get(&index)
    }

    /// Register every surface with `node`, in file order.
    pub fn add_surfaces<N: SceneNode<M>>(&self, node: &mut N) {
        for surface in &self.surfaces {
            node.add_child(surface);
        }
    }

    /// Point every surface at the frame shown after `elapsed`.
    pub fn advance_to(&mut self, elapsed: Duration) -> Result<()> {
        let clock = self.clock;
        for surface in &mut self.surfaces {
            let frame = clock.frame_at(elapsed, surface.frame_count());
            surface.set_frame(frame)?;
        }
        Ok(())
    }

    /// Fetch and decode the model at `src`.
    ///
    /// Relative sources are resolved against the model's base locator.
    pub async fn load<C: Cache>(&mut self, client: &Client<C>, src: &str) -> Result<()> {
        let url = match &self.base {
            Some(base) => get_absolute_path(src, base),
            None => src.to_string(),
        };
        self.src = Some(url);
        self.reload(client).await
    }

    /// Discard the current surfaces and fetch the source again.
    pub async fn reload<C: Cache>(&mut self, client: &Client<C>) -> Result<()> {
        let url = self.src.clone().ok_or(Error::NoSource)?;
        self.clear();
        self.state = LoadState::Loading;
        tracing::info!("Loading model from {}", url);

        let bytes = match client.fetch_bytes_from_url(&url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Failed to load model from {}: {}", url, e);
                self.state = LoadState::Empty;
                return Err(e);
            }
        };

        self.load_bytes(bytes)
    }

    /// Decode `bytes` and replace the current surfaces with the result.
    ///
    /// On failure the model is left empty.
    pub fn load_bytes(&mut self, bytes: Vec<u8>) -> Result<()> {
        self.clear();
        match self.decode(bytes) {
            Ok(()) => {
                self.state = LoadState::Ready;
                tracing::info!(
                    "Loaded model: {} bytes, {} surfaces, {} frames",
                    self.buffer.len(),
                    self.surfaces.len(),
                    self.header.map_or(0, |h| h.num_frames)
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to decode model: {}", e);
                self.clear();
                Err(e)
            }
        }
    }

    fn decode(&mut self, bytes: Vec<u8>) -> Result<()> {
        let header = parse_header(&bytes)?;
        self.header = Some(header);
        self.state = LoadState::HeaderParsed;

        let decoded = parse_surfaces(&bytes, &header)?;
        let mut surfaces = Vec::with_capacity(decoded.len());
        for (index, surface) in decoded.into_iter().enumerate() {
            tracing::debug!(
                "Surface {} '{}': {} frames, {} vertices, {} triangles",
                index,
                surface.name,
                surface.frames.len(),
                surface.mesh.vertex_count(),
                surface.mesh.triangle_count()
            );
            let material = self.materials.entry(index).or_default().clone();
            surfaces.push(Surface::new(index, surface, material));
        }

        self.surfaces = surfaces;
        self.buffer = bytes;
        Ok(())
    }

    fn clear(&mut self) {
        self.state = LoadState::Empty;
        self.buffer.clear();
        self.header = None;
        self.surfaces.clear();
    }
}
