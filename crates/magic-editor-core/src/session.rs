//! Editor session: binds one editing surface to the core for its lifetime.
//!
//! The session owns the current [`StyleSnapshot`] and the content store. It is
//! created empty, a surface is attached (seeding the document from the store),
//! surface events are fed through [`EditorSession::handle_event`], and the
//! surface is handed back on [`EditorSession::detach`].
//!
//! Without an attached surface every editing operation is a no-op.

use magic_editor_common::{ContentStore, EditorConfig, EditorError, PersistMode};

use crate::export::export_html;
use crate::material::{self, MaterialPlacement};
use crate::projector::project_styles;
use crate::surface::{EditingSurface, SurfaceEvent};
use crate::types::StyleSnapshot;
use crate::writer;

type StyleObserver = Box<dyn FnMut(&StyleSnapshot)>;

pub struct EditorSession<S, St> {
    config: EditorConfig,
    store: St,
    surface: Option<S>,
    styles: StyleSnapshot,
    style_observers: Vec<StyleObserver>,
}

impl<S, St> EditorSession<S, St>
where
    S: EditingSurface,
    St: ContentStore,
{
    pub fn new(config: EditorConfig, store: St) -> Self {
        Self {
            config,
            store,
            surface: None,
            styles: StyleSnapshot::default(),
            style_observers: Vec::new(),
        }
    }

    /// Bind `surface`, load the stored document into it and project styles once.
    ///
    /// A store that can't be read is logged and the configured default content
    /// is used instead. A previously attached surface is dropped.
    pub fn attach(&mut self, mut surface: S) {
        let key = self.config.storage_key.as_str();
        let content = match self.store.load(key) {
            Ok(Some(content)) => content,
            Ok(None) => {
                tracing::debug!(key, "no stored content, using default");
                self.config.default_content.clone()
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to load stored content, using default");
                self.config.default_content.clone()
            }
        };

        surface.chain().set_content(content).run();
        if self.surface.replace(surface).is_some() {
            tracing::debug!("replaced attached surface");
        }
        self.refresh_styles();
    }

    /// Unbind the surface and reset the snapshot to defaults.
    pub fn detach(&mut self) -> Option<S> {
        self.styles = StyleSnapshot::default();
        self.surface.take()
    }

    /// React to a surface event.
    ///
    /// `Update` persists the document (exported or raw, per config).
    /// `SelectionUpdate` re-projects styles and notifies observers.
    pub fn handle_event(&mut self, event: SurfaceEvent) -> Result<(), EditorError> {
        let Some(surface) = self.surface.as_ref() else {
            tracing::trace!(?event, "no surface attached, ignoring event");
            return Ok(());
        };

        match event {
            SurfaceEvent::Update => {
                let html = match self.config.persist {
                    PersistMode::Exported => export_html(&surface.html()),
                    PersistMode::Raw => surface.html(),
                };
                let key = self.config.storage_key.as_str();
                self.store.save(key, &html).map_err(|err| {
                    tracing::warn!(key, error = %err, "autosave failed");
                    err
                })?;
                tracing::trace!(key, bytes = html.len(), "autosaved content");
            }
            SurfaceEvent::SelectionUpdate => self.refresh_styles(),
        }
        Ok(())
    }

    /// Set a style property on the selection. See [`writer::apply_style`].
    pub fn apply_style(&mut self, property: &str, value: &str) {
        let Some(surface) = self.surface.as_mut() else {
            tracing::trace!(property, "no surface attached, style not applied");
            return;
        };
        let snapshot = writer::apply_style(surface, property, value);
        self.publish(snapshot);
    }

    /// Insert a material fragment. See [`material::insert_material`].
    pub fn insert_material(&mut self, html: &str) -> Option<MaterialPlacement> {
        let Some(surface) = self.surface.as_mut() else {
            tracing::trace!("no surface attached, material not inserted");
            return None;
        };
        Some(material::insert_material(surface, html))
    }

    /// Replace the whole document, e.g. with a template.
    pub fn replace_content(&mut self, html: &str) {
        if let Some(surface) = self.surface.as_mut() {
            material::replace_content(surface, html);
        }
    }

    /// Exported HTML of the current document, empty without a surface.
    pub fn html(&self) -> String {
        self.surface
            .as_ref()
            .map(|surface| export_html(&surface.html()))
            .unwrap_or_default()
    }

    /// Register an observer called with every new snapshot.
    pub fn subscribe_styles(&mut self, observer: impl FnMut(&StyleSnapshot) + 'static) {
        self.style_observers.push(Box::new(observer));
    }

    /// Current style snapshot.
    pub fn styles(&self) -> &StyleSnapshot {
        &self.styles
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    fn refresh_styles(&mut self) {
        if let Some(surface) = self.surface.as_ref() {
            let snapshot = project_styles(surface);
            self.publish(snapshot);
        }
    }

    fn publish(&mut self, snapshot: StyleSnapshot) {
        self.styles = snapshot;
        for observer in &mut self.style_observers {
            observer(&self.styles);
        }
    }
}
