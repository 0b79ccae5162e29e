//! `egui` front end
//!
//! Each preview window is an `egui::Window` inside a single native
//! viewport. [`EguiHighgui`] keeps the last image shown in every window and
//! the slider state; [`MorphApp`] turns key presses and slider moves into
//! controller events once per frame.

use crate::controller::{MorphController, PreviewKind};
use crate::highgui::{Event, Highgui, KEY_ESC, LoopState};
use crate::{DemoError, DemoResult};
use eframe::egui;
use morphdemo_core::{Pix, color};
use std::cell::RefCell;
use std::rc::Rc;

/// Convert an image to an `egui` RGB image. 8 bpp input is shown as gray.
pub fn pix_to_color_image(pix: &Pix) -> DemoResult<egui::ColorImage> {
    let rgb = pix.convert_to_32()?;
    let (w, h) = (rgb.width() as usize, rgb.height() as usize);
    let mut bytes = Vec::with_capacity(w * h * 3);
    for y in 0..rgb.height() {
        for &word in &rgb.row_data(y)[..w] {
            let (r, g, b) = color::extract_rgb(word);
            bytes.extend_from_slice(&[r, g, b]);
        }
    }
    Ok(egui::ColorImage::from_rgb([w, h], &bytes))
}

#[derive(Default)]
struct Trackbar {
    name: String,
    value: u32,
    max: u32,
}

#[derive(Default)]
struct PreviewWindow {
    name: String,
    trackbar: Option<Trackbar>,
    pending: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
}

/// [`Highgui`] backed by `egui` windows
#[derive(Default)]
pub struct EguiHighgui {
    windows: Vec<PreviewWindow>,
}

impl EguiHighgui {
    pub fn new() -> Self {
        Self::default()
    }

    fn window_mut(&mut self, name: &str) -> DemoResult<&mut PreviewWindow> {
        self.windows
            .iter_mut()
            .find(|w| w.name == name)
            .ok_or_else(|| DemoError::Gui(format!("no window named '{name}'")))
    }

    /// Whether some window holds an image not yet uploaded as a texture
    fn has_pending(&self) -> bool {
        self.windows.iter().any(|w| w.pending.is_some())
    }

    /// Draw every window. Returns the slider moves made this frame.
    fn draw(&mut self, ctx: &egui::Context) -> Vec<Event> {
        let mut moved = Vec::new();
        for (i, window) in self.windows.iter_mut().enumerate() {
            let offset = 20.0 + 40.0 * i as f32;
            egui::Window::new(window.name.as_str())
                .default_pos([offset, offset])
                .resizable(false)
                .show(ctx, |ui| {
                    if let Some(bar) = window.trackbar.as_mut() {
                        let slider = egui::Slider::new(&mut bar.value, 0..=bar.max)
                            .text(bar.name.as_str());
                        if ui.add(slider).changed()
                            && let Some(kind) = PreviewKind::from_window_name(&window.name)
                        {
                            moved.push(Event::Trackbar {
                                window: kind,
                                position: bar.value,
                            });
                        }
                    }
                    if let Some(image) = window.pending.take() {
                        match window.texture.as_mut() {
                            Some(texture) => texture.set(image, egui::TextureOptions::default()),
                            None => {
                                window.texture = Some(ui.ctx().load_texture(
                                    window.name.as_str(),
                                    image,
                                    egui::TextureOptions::default(),
                                ));
                            }
                        }
                    }
                    if let Some(texture) = window.texture.as_ref() {
                        ui.image(egui::load::SizedTexture::from_handle(texture));
                    }
                });
        }
        moved
    }
}

impl Highgui for EguiHighgui {
    fn named_window(&mut self, name: &str) -> DemoResult<()> {
        if !self.windows.iter().any(|w| w.name == name) {
            self.windows.push(PreviewWindow {
                name: name.to_string(),
                ..Default::default()
            });
        }
        Ok(())
    }

    fn create_trackbar(
        &mut self,
        trackbar: &str,
        window: &str,
        value: u32,
        max: u32,
    ) -> DemoResult<()> {
        self.window_mut(window)?.trackbar = Some(Trackbar {
            name: trackbar.to_string(),
            value: value.min(max),
            max,
        });
        Ok(())
    }

    fn show_image(&mut self, window: &str, image: &Pix) -> DemoResult<()> {
        let color_image = pix_to_color_image(image)?;
        self.window_mut(window)?.pending = Some(color_image);
        Ok(())
    }

    fn destroy_window(&mut self, name: &str) -> DemoResult<()> {
        self.windows.retain(|w| w.name != name);
        Ok(())
    }
}

/// Key code for an `egui` key press; letters follow the shift state.
fn key_code(key: egui::Key, modifiers: egui::Modifiers) -> Option<i32> {
    match key {
        egui::Key::Escape => Some(KEY_ESC),
        egui::Key::Space => Some(b' ' as i32),
        other => match other.name().as_bytes() {
            [c] if c.is_ascii_alphanumeric() => {
                let c = if modifiers.shift {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                };
                Some(c as i32)
            }
            _ => None,
        },
    }
}

/// The `eframe` application
pub struct MorphApp {
    controller: MorphController,
    display: EguiHighgui,
    started: bool,
    error: Rc<RefCell<Option<DemoError>>>,
}

impl MorphApp {
    fn new(controller: MorphController, error: Rc<RefCell<Option<DemoError>>>) -> Self {
        MorphApp {
            controller,
            display: EguiHighgui::new(),
            started: false,
            error,
        }
    }

    fn step(&mut self, ctx: &egui::Context) -> DemoResult<LoopState> {
        if !self.started {
            self.controller.open_windows(&mut self.display)?;
            self.controller.refresh_all(&mut self.display)?;
            self.started = true;
        }

        let keys: Vec<i32> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => key_code(*key, *modifiers),
                    _ => None,
                })
                .collect()
        });
        for code in keys {
            if self.controller.dispatch(Event::Key(code), &mut self.display)?
                == LoopState::Terminated
            {
                return Ok(LoopState::Terminated);
            }
        }

        for event in self.display.draw(ctx) {
            self.controller.dispatch(event, &mut self.display)?;
        }
        // Images produced after this frame's draw need another frame
        if self.display.has_pending() {
            ctx.request_repaint();
        }
        Ok(LoopState::Running)
    }
}

impl eframe::App for MorphApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let terminated = match self.step(ctx) {
            Ok(LoopState::Running) => false,
            Ok(LoopState::Terminated) => {
                log::info!("quit requested");
                true
            }
            Err(e) => {
                log::error!("{}", e);
                *self.error.borrow_mut() = Some(e);
                true
            }
        };
        if terminated {
            if let Err(e) = self.controller.close_windows(&mut self.display) {
                log::warn!("closing windows: {}", e);
            }
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

/// Run the viewer until ESC or the native window is closed.
pub fn run_viewer(controller: MorphController) -> DemoResult<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280., 800.]),
        ..Default::default()
    };
    let error = Rc::new(RefCell::new(None));
    let app_error = Rc::clone(&error);
    eframe::run_native(
        "Morphology demo",
        options,
        Box::new(move |_cc| Ok(Box::new(MorphApp::new(controller, app_error)))),
    )
    .map_err(|e| DemoError::Gui(e.to_string()))?;

    match error.borrow_mut().take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
