//! Editing session state machine.

use super::options::{SessionOptions, is_lossy_target, options_from_config};
use crate::brush::{BrushEditor, RasterPoint, ScreenPoint, ViewTransform, Viewport};
use crate::catalog::{Catalog, CatalogEntry, CatalogError, Navigator};
use crate::config::Config;
use crate::mask::MaskStore;
use crate::overlay::OverlayCompositor;
use crate::raster::{self, BinaryRaster, OverlayRaster, RasterError, RawMask};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Lifecycle of the displayed item.
///
/// `Unloaded → Loaded → Editing → Loaded { modified: true }`, then either a save
/// (back to `modified: false`) or navigation, which discards in-memory edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// No item displayed (no catalog, empty catalog, or first load failed)
    Unloaded,
    /// Item displayed; `modified` once strokes exist that are not on disk
    Loaded { modified: bool },
    /// Pointer held down; moves stamp the brush
    Editing,
}

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("no item is loaded")]
    NoItemLoaded,
}

/// Brush cursor outline for the view layer to draw.
///
/// `center` and `radius` are raster coordinates; `screen_center` and
/// `screen_radius` map them through the current view transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorRing {
    pub center: RasterPoint,
    pub radius: i32,
    pub screen_center: ScreenPoint,
    pub screen_radius: f64,
}

/// One interactive editing session over a catalog.
///
/// Owns the catalog, the current position, the mask store, and the display
/// state. Every operation runs to completion on the caller's thread; the
/// overlay is recomposed after each raster change.
pub struct EditSession {
    pub(super) options: SessionOptions,
    pub(super) catalog: Catalog,
    pub(super) navigator: Navigator,
    pub(super) store: MaskStore,
    pub(super) compositor: OverlayCompositor,
    pub(super) brush: BrushEditor,
    pub(super) viewport: Viewport,
    /// Screen size used to fit each newly loaded item; `None` keeps the transform
    pub(super) view_size: Option<(u32, u32)>,
    pub(super) state: EditState,
    pub(super) overlay_visible: bool,
    pub(super) overlay: Option<OverlayRaster>,
    pub(super) cursor: Option<RasterPoint>,
    /// `modified` flag at the last press, restored by recover
    pub(super) modified_at_press: bool,
    /// Whether the active gesture has stamped anything
    pub(super) gesture_stroked: bool,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl EditSession {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            store: MaskStore::new(options.max_cached),
            compositor: OverlayCompositor::new(options.opacity, options.highlight),
            brush: BrushEditor::new(options.default_radius),
            overlay_visible: options.overlay_visible,
            options,
            catalog: Catalog::default(),
            navigator: Navigator::default(),
            viewport: Viewport::identity(),
            view_size: None,
            state: EditState::Unloaded,
            overlay: None,
            cursor: None,
            modified_at_press: false,
            gesture_stroked: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(options_from_config(config))
    }

    /// Discovers the catalog under `root` and displays its first item.
    ///
    /// Returns the number of items. The first mask is decoded before anything
    /// is replaced, so a discovery or decode failure leaves the current item
    /// displayed. An empty catalog replaces the current one, leaves the session
    /// unloaded, and is reported as [`CatalogError::EmptyCatalog`].
    pub fn load_catalog(&mut self, root: &Path) -> Result<usize, SessionError> {
        let catalog = Catalog::discover(root, &self.options.layout)?;

        let mut store = MaskStore::new(self.options.max_cached);
        if let Some(first) = catalog.entries().first() {
            store.load(&first.mask)?;
        }

        self.install(root, catalog, store)?;
        // Served from the snapshot decoded above.
        self.load_current()?;
        Ok(self.catalog.len())
    }

    /// Discovers the catalog under `root` without loading any item.
    ///
    /// The session is left unloaded until the first [`go_to`](Self::go_to), so
    /// a batch over the items can skip ones that fail to decode.
    pub fn open_catalog(&mut self, root: &Path) -> Result<usize, SessionError> {
        let catalog = Catalog::discover(root, &self.options.layout)?;
        self.install(root, catalog, MaskStore::new(self.options.max_cached))?;
        Ok(self.catalog.len())
    }

    fn install(
        &mut self,
        root: &Path,
        catalog: Catalog,
        store: MaskStore,
    ) -> Result<(), SessionError> {
        self.store = store;
        self.overlay = None;
        self.cursor = None;
        self.state = EditState::Unloaded;
        self.navigator = Navigator::new(catalog.len());
        self.catalog = catalog;

        if self.catalog.is_empty() {
            warn!("No image/mask pairs under {}", root.display());
            return Err(CatalogError::EmptyCatalog(root.to_path_buf()).into());
        }
        Ok(())
    }

    /// Loads the item at the navigator's index into the store and display.
    fn load_current(&mut self) -> Result<(), SessionError> {
        let index = self.navigator.index().ok_or(SessionError::NoItemLoaded)?;
        let entry = self.catalog.get(index)?;

        if matches!(self.state, EditState::Loaded { modified: true }) {
            debug!("Discarding unsaved edits");
        }

        let mask = self.store.load(&entry.mask)?;
        info!(
            "Loaded {} ({}/{})",
            entry.image_name(),
            index + 1,
            self.catalog.len()
        );

        if let Some((view_w, view_h)) = self.view_size {
            self.viewport = Viewport::fit(mask.width(), mask.height(), view_w, view_h);
        }

        self.state = EditState::Loaded { modified: false };
        self.modified_at_press = false;
        self.gesture_stroked = false;
        self.recompose();
        Ok(())
    }

    /// Applies `step` to the navigator and reloads; restores the index if the load fails.
    fn navigate(&mut self, step: impl FnOnce(&mut Navigator) -> bool) -> Result<bool, SessionError> {
        let previous = self.navigator;
        if !step(&mut self.navigator) {
            return Ok(false);
        }
        if let Err(err) = self.load_current() {
            self.navigator = previous;
            return Err(err);
        }
        Ok(true)
    }

    /// Displays the next item. `Ok(false)` at the last item or with no catalog.
    pub fn advance(&mut self) -> Result<bool, SessionError> {
        self.navigate(Navigator::advance)
    }

    /// Displays the previous item. `Ok(false)` at the first item or with no catalog.
    pub fn retreat(&mut self) -> Result<bool, SessionError> {
        self.navigate(Navigator::retreat)
    }

    /// Jumps to `index` and displays it.
    pub fn go_to(&mut self, index: usize) -> Result<(), SessionError> {
        let previous = self.navigator;
        self.navigator.go_to(index)?;
        if let Err(err) = self.load_current() {
            self.navigator = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Writes the binary export of the working raster and returns its path.
    ///
    /// The save directory is created when missing. After the write the cached
    /// snapshot for this mask is replaced, so revisiting shows the saved state.
    pub fn save_current(&mut self) -> Result<PathBuf, SessionError> {
        let entry = self.current_entry().ok_or(SessionError::NoItemLoaded)?;
        let mask = self.store.current().ok_or(SessionError::NoItemLoaded)?;

        let export = self.compositor.to_binary_export(mask);
        raster::ensure_directory_exists(&self.options.save_directory(self.catalog.root()))?;
        let path = self.options.save_path(self.catalog.root(), entry);
        if is_lossy_target(&path) {
            warn!(
                "Saving {} with a lossy encoder; values may not stay 0/255",
                path.display()
            );
        }
        raster::save_binary(&export, &path)?;
        info!("Saved {}", path.display());

        self.store.commit();
        match self.state {
            EditState::Loaded { .. } => self.state = EditState::Loaded { modified: false },
            EditState::Editing | EditState::Unloaded => {}
        }
        // Recovering after a save diverges from the file on disk.
        if self.store.has_recovery_point() {
            self.modified_at_press = true;
        }
        Ok(path)
    }

    /// Flips overlay visibility and returns the new value.
    pub fn toggle_overlay_visible(&mut self) -> bool {
        self.overlay_visible = !self.overlay_visible;
        debug!("Overlay visible: {}", self.overlay_visible);
        self.overlay_visible
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Sets the eraser radius. No range is enforced here.
    pub fn set_brush_radius(&mut self, radius: i32) {
        self.brush.set_radius(radius);
        debug!("Brush radius: {}", radius);
    }

    pub fn brush_radius(&self) -> i32 {
        self.brush.radius()
    }

    /// Overlay for the current item; `None` while hidden or with nothing loaded.
    pub fn current_overlay(&self) -> Option<&OverlayRaster> {
        if !self.overlay_visible {
            return None;
        }
        self.overlay.as_ref()
    }

    /// Binary export of the working raster, without writing it.
    pub fn current_export(&self) -> Option<BinaryRaster> {
        self.store
            .current()
            .map(|mask| self.compositor.to_binary_export(mask))
    }

    pub fn current_mask(&self) -> Option<&RawMask> {
        self.store.current()
    }

    /// Catalog entry of the displayed item.
    pub fn current_entry(&self) -> Option<&CatalogEntry> {
        if self.state == EditState::Unloaded {
            return None;
        }
        let index = self.navigator.index()?;
        self.catalog.get(index).ok()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.navigator.index()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_modified(&self) -> bool {
        match self.state {
            EditState::Loaded { modified } => modified,
            EditState::Editing => self.modified_at_press || self.gesture_stroked,
            EditState::Unloaded => false,
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Cursor outline at the last pointer position, drawn at twice the brush radius.
    pub fn cursor_ring(&self) -> Option<CursorRing> {
        self.cursor.map(|center| {
            let radius = self.brush.radius().saturating_mul(2);
            CursorRing {
                center,
                radius,
                screen_center: self
                    .viewport
                    .scene_to_screen(f64::from(center.x), f64::from(center.y)),
                screen_radius: f64::from(radius) * self.viewport.scale,
            }
        })
    }

    /// Records the view size and refits the displayed item into it.
    ///
    /// Later loads are fitted to the same size.
    pub fn set_view_size(&mut self, width: u32, height: u32) {
        self.view_size = Some((width, height));
        if let Some(mask) = self.store.current() {
            self.viewport = Viewport::fit(mask.width(), mask.height(), width, height);
        }
        debug!("View size {}x{}, scale {:.3}", width, height, self.viewport.scale);
    }

    /// Replaces the view transform (zoom/pan from the view layer).
    pub fn set_view_transform(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Identity transform, kept across loads.
    pub fn reset_view(&mut self) {
        self.view_size = None;
        self.viewport = Viewport::identity();
    }

    pub fn view_transform(&self) -> &dyn ViewTransform {
        &self.viewport
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub(super) fn recompose(&mut self) {
        self.overlay = self
            .store
            .current()
            .map(|mask| self.compositor.to_overlay(mask));
    }
}
