//! App module - contains the main application state and logic

mod preview;
mod settings_modal;
mod state;
mod upload;

use state::{PreviewState, UploadZone};

use crate::constants::MAX_UPLOAD_BYTES;
use crate::decoder::ImageDecoder;
use crate::settings::Settings;
use crate::templates::TemplateId;
use crate::theme;
use eframe::egui;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // Owns the decode workers; the decoder only holds a handle
    _runtime: tokio::runtime::Runtime,
    pub(crate) decoder: ImageDecoder,
    pub(crate) preview: PreviewState,
    pub(crate) upload_zone: UploadZone,
    // Background screenshots, None when the asset is missing or unreadable
    pub(crate) backgrounds: HashMap<TemplateId, Option<egui::TextureHandle>>,
    pub(crate) assets_dir: PathBuf,
    pub(crate) assets_dir_str: String,
    pub(crate) last_browse_dir: Option<PathBuf>,
    pub(crate) enforce_upload_limit: bool,
    pub(crate) show_settings: bool,
    // Window geometry, saved on exit
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> std::io::Result<Self> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Phosphor icons for card titles and placeholders
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("image-decode")
            .enable_all()
            .build()?;

        let mut decoder = ImageDecoder::new(runtime.handle().clone());
        decoder.set_upload_limit(settings.enforce_upload_limit.then_some(MAX_UPLOAD_BYTES));

        let assets_dir = settings.assets_dir_or_default();
        info!(path = %assets_dir.display(), "Using assets directory");

        Ok(Self {
            _runtime: runtime,
            decoder,
            preview: PreviewState::default(),
            upload_zone: UploadZone::default(),
            backgrounds: HashMap::new(),
            assets_dir_str: assets_dir.to_string_lossy().to_string(),
            assets_dir,
            last_browse_dir: settings.last_browse_dir(),
            enforce_upload_limit: settings.enforce_upload_limit,
            show_settings: false,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        })
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            assets_dir: Some(self.assets_dir_str.clone()),
            last_browse_dir: self
                .last_browse_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            enforce_upload_limit: self.enforce_upload_limit,
        };
        settings.save(&self.data_dir);
    }

    /// Hand finished decodes to the preview state
    pub fn poll_decodes(&mut self) {
        for decoded in self.decoder.poll() {
            let name = decoded.name.clone();
            if self.preview.accept(decoded) {
                debug!(
                    name = %name,
                    ticket = self.preview.shown_ticket(),
                    latest = self.decoder.last_ticket(),
                    "Preview updated"
                );
            }
        }
    }

    pub fn set_upload_limit_enforced(&mut self, enforced: bool) {
        self.enforce_upload_limit = enforced;
        self.decoder.set_upload_limit(enforced.then_some(MAX_UPLOAD_BYTES));
        self.save_settings();
    }

    /// Point at a new assets directory and drop cached backgrounds
    pub fn set_assets_dir(&mut self, dir: PathBuf) {
        info!(path = %dir.display(), "Assets directory changed");
        self.assets_dir_str = dir.to_string_lossy().to_string();
        self.assets_dir = dir;
        self.backgrounds.clear();
        self.save_settings();
    }
}
