use std::path::Path;

use eframe::egui;
use image::DynamicImage;

use crate::crop;
use crate::drag::{DragController, DragState, PointerEvent};
use crate::geometry::Point;
use crate::hit_test::Zone;
use crate::render;
use crate::selection::SelectionRect;
use crate::viewport::ViewportState;

/// Application state. The selection engine state (`viewport`, `selection`,
/// `controller`) exists only while an image is loaded and is replaced
/// wholesale on the next load.
#[derive(Default)]
pub struct QuickcropApp {
    image: Option<DynamicImage>,
    texture: Option<egui::TextureHandle>,
    viewport: Option<ViewportState>,
    selection: Option<SelectionRect>,
    controller: DragController,
    cropped: Option<DynamicImage>,
    cropped_texture: Option<egui::TextureHandle>,
}

impl QuickcropApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn load_from_path(&mut self, ctx: &egui::Context, path: &Path, avail: egui::Vec2) {
        match image::open(path) {
            Ok(img) => {
                let viewport = ViewportState::fit(img.width(), img.height(), avail.x, avail.y);
                log::info!(
                    "loaded {} ({}x{}), scale factor {:.4}",
                    path.display(),
                    img.width(),
                    img.height(),
                    viewport.scale_factor
                );
                self.texture = Some(load_texture(ctx, "image", &img));
                self.image = Some(img);
                self.selection = Some(SelectionRect::initial(&viewport));
                self.viewport = Some(viewport);
                self.controller = DragController::default();
                self.cropped = None;
                self.cropped_texture = None;
            }
            Err(err) => log::warn!("failed to open {}: {err}", path.display()),
        }
    }

    fn extract_current(&mut self, ctx: &egui::Context) {
        match crop::request_export(
            self.image.as_ref(),
            self.selection.as_ref(),
            self.viewport.as_ref(),
        ) {
            Ok((sample, _name)) => {
                log::info!("extracted {}x{} sample", sample.width(), sample.height());
                self.cropped_texture = Some(load_texture(ctx, "cropped", &sample));
                self.cropped = Some(sample);
            }
            Err(err) => log::warn!("crop request ignored: {err}"),
        }
    }

    fn save_cropped(&self) {
        let Some(sample) = &self.cropped else {
            log::warn!("save request ignored: nothing cropped yet");
            return;
        };
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Image", &["png", "jpg", "jpeg", "bmp"])
            .set_file_name(crop::EXPORT_FILE_NAME)
            .save_file()
        {
            match sample.save(&path) {
                Ok(()) => log::info!("saved cropped image to {}", path.display()),
                Err(err) => log::warn!("failed to save image: {err}"),
            }
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) -> Option<std::path::PathBuf> {
        let mut pending_load = None;

        ui.horizontal(|ui| {
            if ui.button("Open Image…").clicked() {
                pending_load = rfd::FileDialog::new()
                    .add_filter("Image", &["png", "jpg", "jpeg", "bmp"])
                    .pick_file();
            }
            if ui.button("Crop").clicked() {
                self.extract_current(ui.ctx());
            }
            if self.cropped.is_some() && ui.button("Save Cropped Image…").clicked() {
                self.save_cropped();
            }

            if let (Some(rect), Some(viewport)) = (self.selection.as_ref(), self.viewport.as_ref())
            {
                let (x, y, w, h) = crop::source_region(rect, viewport);
                ui.small(format!(
                    "Selection: {}x{} at ({}, {})",
                    w.round() as u32,
                    h.round() as u32,
                    x.round() as u32,
                    y.round() as u32,
                ));
            }
        });

        pending_load
    }

    /// The interactive display surface: translates egui pointer input into
    /// engine events, then repaints from the updated state.
    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (Some(texture), Some(viewport)) = (self.texture.as_ref(), self.viewport) else {
            return;
        };
        let Some(mut rect) = self.selection else {
            return;
        };

        let size = egui::vec2(viewport.display_width as f32, viewport.display_height as f32);
        let (canvas_rect, response) = ui.allocate_exact_size(size, egui::Sense::drag());
        let origin = canvas_rect.min;
        let to_local = |pos: egui::Pos2| {
            Point::new(
                (pos.x - origin.x).round() as i32,
                (pos.y - origin.y).round() as i32,
            )
        };

        let mut events: Vec<PointerEvent> = Vec::new();
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(PointerEvent::Down(to_local(pos)));
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                // Leaving the surface mid-drag cancels like a release.
                if canvas_rect.contains(pos) {
                    events.push(PointerEvent::Move(to_local(pos)));
                } else {
                    events.push(PointerEvent::Leave);
                }
            }
        }
        if response.drag_stopped() {
            events.push(PointerEvent::Up);
        }
        if events.is_empty() {
            if let Some(pos) = response.hover_pos() {
                events.push(PointerEvent::Move(to_local(pos)));
            }
        }

        for event in events {
            let update = self.controller.handle(event, rect, &viewport);
            rect = update.rect;
            if self.controller.state() == DragState::Idle {
                let icon = cursor_for(update.hover);
                ui.ctx().output_mut(|o| o.cursor_icon = icon);
            }
        }
        self.selection = Some(rect);

        let painter = ui.painter_at(canvas_rect);
        render::paint(&painter, origin, texture, &viewport, &rect);
    }

    fn preview(&self, ui: &mut egui::Ui) {
        let Some(texture) = &self.cropped_texture else {
            return;
        };
        ui.separator();
        ui.label("Cropped:");
        let size = texture.size_vec2();
        let avail = ui.available_size();
        let scale = (avail.x / size.x).min(avail.y / size.y).min(1.0);
        ui.image((texture.id(), size * scale));
    }
}

impl eframe::App for QuickcropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut pending_load = self.toolbar(ui);

            // Dropped files load the same way as the file picker.
            if let Some(path) = ctx.input(|i| {
                i.raw
                    .dropped_files
                    .first()
                    .and_then(|file| file.path.clone())
            }) {
                pending_load = Some(path);
            }

            ui.separator();

            let avail = ui.available_size();
            if let Some(path) = pending_load {
                self.load_from_path(ctx, &path, avail);
            }

            self.canvas(ui);
            self.preview(ui);
        });
    }
}

fn load_texture(ctx: &egui::Context, name: &str, image: &DynamicImage) -> egui::TextureHandle {
    let size = [image.width() as _, image.height() as _];
    let buffer = image.to_rgba8();
    let pixels = buffer.as_flat_samples();
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}

fn cursor_for(zone: Option<Zone>) -> egui::CursorIcon {
    match zone {
        Some(Zone::TopLeft) => egui::CursorIcon::ResizeNorthWest,
        Some(Zone::BottomLeft) => egui::CursorIcon::ResizeSouthWest,
        Some(Zone::TopRight) => egui::CursorIcon::ResizeNorthEast,
        Some(Zone::BottomRight) => egui::CursorIcon::ResizeSouthEast,
        Some(Zone::Left) => egui::CursorIcon::ResizeWest,
        Some(Zone::Right) => egui::CursorIcon::ResizeEast,
        Some(Zone::Top) => egui::CursorIcon::ResizeNorth,
        Some(Zone::Bottom) => egui::CursorIcon::ResizeSouth,
        Some(Zone::Interior) => egui::CursorIcon::Move,
        None => egui::CursorIcon::Default,
    }
}
