//! Render targets and the ordered registry that owns them.

use heapless::Vec;

use super::format::StatusLines;
use crate::error::Error;

/// The three text regions every surface exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    Layer,
    Battery,
    Bluetooth,
}

/// Capability interface implemented by the display toolkit.
///
/// A render pass calls `set_text` once per region and then `commit`.
/// Surfaces that draw into a framebuffer should only push to the panel
/// in `commit`, so the three regions always appear together.
pub trait DisplaySurface {
    fn set_text(&mut self, region: Region, text: &str) -> Result<(), Error>;

    fn commit(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Identity of a registered surface.
///
/// Never shared by two live surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SurfaceId(u32);

/// Result of rendering every registered surface once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderSummary {
    pub rendered: usize,
    pub failed: usize,
}

/// Ordered, fixed-capacity collection of surfaces.
///
/// The registry is the sole owner of each surface: deregistering hands
/// it back to the caller, who drops it to release toolkit resources.
pub struct SurfaceRegistry<S, const N: usize> {
    entries: Vec<(SurfaceId, S), N>,
    next_id: u32,
}

impl<S: DisplaySurface, const N: usize> SurfaceRegistry<S, N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.position(id).is_some()
    }

    /// Append `surface` and paint it once with `lines`.
    ///
    /// The first paint may fail like any other render; the surface stays
    /// registered and is repainted on the next event.
    pub fn register(&mut self, mut surface: S, lines: &StatusLines) -> Result<SurfaceId, Error> {
        if self.entries.is_full() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Surface registry full ({} entries)", N);
            return Err(Error::RegistryFull);
        }

        let id = self.allocate_id();

        if let Err(_e) = render_surface(&mut surface, lines) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Initial render of surface {} failed: {}", id, _e);
        }

        // Capacity was checked above.
        let _ = self.entries.push((id, surface));

        #[cfg(feature = "defmt")]
        defmt::debug!("Surface {} registered ({} live)", id, self.entries.len());

        Ok(id)
    }

    /// Remove the surface with `id`, keeping the order of the rest.
    /// Unknown ids are ignored.
    pub fn deregister(&mut self, id: SurfaceId) -> Option<S> {
        let index = self.position(id)?;
        let (_, surface) = self.entries.remove(index);

        #[cfg(feature = "defmt")]
        defmt::debug!("Surface {} deregistered ({} live)", id, self.entries.len());

        Some(surface)
    }

    /// Drop every registered surface.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Paint every surface in registration order.
    ///
    /// A failing surface is counted and skipped; the rest still render.
    pub fn render_all(&mut self, lines: &StatusLines) -> RenderSummary {
        let mut summary = RenderSummary::default();
        for (_id, surface) in self.entries.iter_mut() {
            match render_surface(surface, lines) {
                Ok(()) => summary.rendered += 1,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Render of surface {} failed: {}", _id, _e);
                    summary.failed += 1;
                }
            }
        }
        summary
    }

    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut S> {
        self.entries
            .iter_mut()
            .find(|(entry, _)| *entry == id)
            .map(|(_, surface)| surface)
    }

    fn position(&self, id: SurfaceId) -> Option<usize> {
        self.entries.iter().position(|(entry, _)| *entry == id)
    }

    /// Next counter value not held by a live surface. At most `N` ids are
    /// live, so the scan ends after `N + 1` steps even after wrap-around.
    fn allocate_id(&mut self) -> SurfaceId {
        loop {
            let id = SurfaceId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            if !self.contains(id) {
                return id;
            }
        }
    }
}

impl<S: DisplaySurface, const N: usize> Default for SurfaceRegistry<S, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Set every region, even after one fails, then commit only a complete
/// frame. Returns the first error.
fn render_surface<S: DisplaySurface>(surface: &mut S, lines: &StatusLines) -> Result<(), Error> {
    let regions = [
        (Region::Layer, &lines.layer),
        (Region::Battery, &lines.battery),
        (Region::Bluetooth, &lines.bluetooth),
    ];

    let mut first_error = None;
    for (region, text) in regions {
        if let Err(e) = surface.set_text(region, text) {
            #[cfg(feature = "defmt")]
            defmt::debug!("set_text({}) failed: {}", region, e);
            first_error = first_error.or(Some(e));
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => surface.commit(),
    }
}
