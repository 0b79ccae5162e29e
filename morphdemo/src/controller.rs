//! Morphology demo controller
//!
//! Owns the source image, the shared destination buffer, the four slider
//! positions and the current structuring-element shape. Every preview is
//! computed into the same destination buffer and handed to the display
//! right away, so only the most recent preview's pixels are kept.
//!
//! A slider position `p` maps to the signed radius `n = p - max_iters`.
//! The element is a `(2|n| + 1)` square anchored at its center and the
//! sign of `n` picks the operation:
//!
//! | Window          | n < 0    | n >= 0    |
//! |-----------------|----------|-----------|
//! | Open/Close      | open     | close     |
//! | Erode/Dilate    | erode    | dilate    |
//! | Gradient        | gradient | gradient  |
//! | TopHat/BlackHat | top-hat  | black-hat |

use crate::config::DemoConfig;
use crate::highgui::{Command, Event, EventSource, Highgui, LoopState};
use crate::DemoResult;
use log::{debug, info, warn};
use morphdemo_core::Pix;
use morphdemo_morph::{ElementShape, MorphOp, MorphResult, Sel, morphology_ex_into};

/// Label of the slider in every preview window
pub const TRACKBAR_NAME: &str = "iterations";

/// One of the four preview windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewKind {
    OpenClose,
    ErodeDilate,
    Gradient,
    TopHatBlackHat,
}

impl PreviewKind {
    /// All previews, in the order they are recomputed.
    pub const ALL: [PreviewKind; 4] = [
        Self::OpenClose,
        Self::ErodeDilate,
        Self::Gradient,
        Self::TopHatBlackHat,
    ];

    /// Title of the preview window
    pub fn window_name(self) -> &'static str {
        match self {
            Self::OpenClose => "Open/Close",
            Self::ErodeDilate => "Erode/Dilate",
            Self::Gradient => "Gradient",
            Self::TopHatBlackHat => "TopHat/BlackHat",
        }
    }

    /// Look a preview up by window title
    pub fn from_window_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.window_name() == name)
    }

    /// Operation shown for a signed radius
    pub fn op(self, radius: i32) -> MorphOp {
        let negative = radius < 0;
        match self {
            Self::OpenClose if negative => MorphOp::Open,
            Self::OpenClose => MorphOp::Close,
            Self::ErodeDilate if negative => MorphOp::Erode,
            Self::ErodeDilate => MorphOp::Dilate,
            Self::Gradient => MorphOp::Gradient,
            Self::TopHatBlackHat if negative => MorphOp::TopHat,
            Self::TopHatBlackHat => MorphOp::BlackHat,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::OpenClose => 0,
            Self::ErodeDilate => 1,
            Self::Gradient => 2,
            Self::TopHatBlackHat => 3,
        }
    }
}

/// Signed radius for a slider position, saturating at the `i32` range
pub fn signed_radius(position: u32, max_iters: u32) -> i32 {
    let n = i64::from(position) - i64::from(max_iters);
    n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Side length of the square element for a signed radius, saturating
pub fn element_size(radius: i32) -> u32 {
    radius.unsigned_abs().saturating_mul(2).saturating_add(1)
}

/// Build the structuring element for a slider position
///
/// The element is `element_size` square with its origin at `(|n|, |n|)`.
pub fn resolve_element(position: u32, max_iters: u32, shape: ElementShape) -> MorphResult<Sel> {
    let size = element_size(signed_radius(position, max_iters));
    Sel::create_shaped(shape, size, size)
}

/// The demo's state and event handling
#[derive(Debug)]
pub struct MorphController {
    src: Pix,
    dst: Pix,
    positions: [u32; 4],
    shape: ElementShape,
    max_iters: u32,
}

impl MorphController {
    /// Create a controller for a loaded image.
    ///
    /// The image is promoted to 32 bpp RGB. All sliders start at
    /// `max_iters`, i.e. radius 0. Fails if `config` does not validate.
    pub fn new(src: &Pix, config: &DemoConfig) -> DemoResult<Self> {
        config.validate()?;
        let src = src.convert_to_32()?;
        let dst = src.deep_clone();
        Ok(MorphController {
            src,
            dst,
            positions: [config.max_iters; 4],
            shape: config.initial_shape,
            max_iters: config.max_iters,
        })
    }

    /// The source image (32 bpp)
    pub fn source(&self) -> &Pix {
        &self.src
    }

    /// The shared destination buffer, holding the last computed preview
    pub fn dst(&self) -> &Pix {
        &self.dst
    }

    pub fn shape(&self) -> ElementShape {
        self.shape
    }

    pub fn set_shape(&mut self, shape: ElementShape) {
        self.shape = shape;
    }

    pub fn max_iters(&self) -> u32 {
        self.max_iters
    }

    /// Highest slider position
    pub fn slider_max(&self) -> u32 {
        self.max_iters.saturating_mul(2).saturating_add(1)
    }

    /// Current slider position of a preview
    pub fn position(&self, kind: PreviewKind) -> u32 {
        self.positions[kind.index()]
    }

    /// Move a slider; positions beyond the range are clamped.
    pub fn set_position(&mut self, kind: PreviewKind, position: u32) {
        let max = self.slider_max();
        let clamped = if position > max {
            warn!(
                "{}: position {} out of range, clamped to {}",
                kind.window_name(),
                position,
                max
            );
            max
        } else {
            position
        };
        self.positions[kind.index()] = clamped;
    }

    /// Signed radius of a preview's slider
    pub fn radius(&self, kind: PreviewKind) -> i32 {
        signed_radius(self.position(kind), self.max_iters)
    }

    /// Create the four windows and their sliders.
    pub fn open_windows(&self, display: &mut dyn Highgui) -> DemoResult<()> {
        for kind in PreviewKind::ALL {
            display.named_window(kind.window_name())?;
        }
        for kind in PreviewKind::ALL {
            display.create_trackbar(
                TRACKBAR_NAME,
                kind.window_name(),
                self.position(kind),
                self.slider_max(),
            )?;
        }
        info!(
            "opened {} preview windows, slider range [0, {}]",
            PreviewKind::ALL.len(),
            self.slider_max()
        );
        Ok(())
    }

    /// Destroy the four windows.
    pub fn close_windows(&self, display: &mut dyn Highgui) -> DemoResult<()> {
        for kind in PreviewKind::ALL {
            display.destroy_window(kind.window_name())?;
        }
        Ok(())
    }

    /// Recompute one preview into the shared buffer and show it.
    pub fn recompute(&mut self, kind: PreviewKind, display: &mut dyn Highgui) -> DemoResult<()> {
        let position = self.position(kind);
        let radius = signed_radius(position, self.max_iters);
        let op = kind.op(radius);
        debug!(
            "{}: position {} radius {} shape {} op {}",
            kind.window_name(),
            position,
            radius,
            self.shape,
            op
        );
        let sel = resolve_element(position, self.max_iters, self.shape)?;
        morphology_ex_into(&self.src, &sel, op, &mut self.dst)?;
        display.show_image(kind.window_name(), &self.dst)
    }

    /// Recompute all four previews in window order.
    pub fn refresh_all(&mut self, display: &mut dyn Highgui) -> DemoResult<()> {
        for kind in PreviewKind::ALL {
            self.recompute(kind, display)?;
        }
        Ok(())
    }

    /// Apply a key press to the shape selector.
    pub fn handle_key(&mut self, code: i32) -> LoopState {
        let command = Command::from_key(code);
        debug!("key {} -> {:?}", code, command);
        match command {
            Command::Quit => return LoopState::Terminated,
            Command::SetShape(shape) => self.shape = shape,
            Command::CycleShape => self.shape = self.shape.next(),
            Command::Ignore => {}
        }
        LoopState::Running
    }

    /// Handle one event.
    ///
    /// A key press updates the shape (or quits) and then redraws all four
    /// previews. A slider move redraws only its own preview.
    pub fn dispatch(&mut self, event: Event, display: &mut dyn Highgui) -> DemoResult<LoopState> {
        match event {
            Event::Key(code) => {
                let state = self.handle_key(code);
                if state == LoopState::Running {
                    self.refresh_all(display)?;
                }
                Ok(state)
            }
            Event::Trackbar { window, position } => {
                self.set_position(window, position);
                self.recompute(window, display)?;
                Ok(LoopState::Running)
            }
        }
    }

    /// Run the blocking event loop until ESC or the end of input.
    ///
    /// Opens the windows, draws every preview, then feeds events to
    /// [`MorphController::dispatch`]. The windows are destroyed on exit.
    pub fn run(
        &mut self,
        events: &mut dyn EventSource,
        display: &mut dyn Highgui,
    ) -> DemoResult<()> {
        self.open_windows(display)?;
        self.refresh_all(display)?;
        while let Some(event) = events.wait_event() {
            if self.dispatch(event, display)? == LoopState::Terminated {
                info!("quit requested");
                break;
            }
        }
        self.close_windows(display)
    }
}
