//! Display and input seam
//!
//! The controller talks to windows only through [`Highgui`] and receives
//! input only through [`EventSource`], so the same code drives the `egui`
//! viewer and the headless backends in [`headless`].

use crate::DemoResult;
use crate::controller::PreviewKind;
use morphdemo_core::Pix;
use morphdemo_morph::ElementShape;

/// Key code of the escape key
pub const KEY_ESC: i32 = 27;

/// Window operations the demo needs from a GUI toolkit
pub trait Highgui {
    /// Create a window; creating an existing window is a no-op.
    fn named_window(&mut self, name: &str) -> DemoResult<()>;

    /// Attach an integer slider with range `[0, max]` to a window.
    fn create_trackbar(&mut self, trackbar: &str, window: &str, value: u32, max: u32)
    -> DemoResult<()>;

    /// Display an image in a window.
    ///
    /// Implementations must copy what they need before returning; the
    /// buffer is overwritten by the next recompute.
    fn show_image(&mut self, window: &str, image: &Pix) -> DemoResult<()>;

    /// Destroy a window.
    fn destroy_window(&mut self, name: &str) -> DemoResult<()>;
}

/// Input delivered to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key press; only the low byte of the code is significant
    Key(i32),
    /// A slider was moved to `position`
    Trackbar { window: PreviewKind, position: u32 },
}

/// Blocking source of input events
pub trait EventSource {
    /// Block until the next event. `None` means the input is closed.
    fn wait_event(&mut self) -> Option<Event>;
}

/// What a key press asks the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the event loop
    Quit,
    /// Select a structuring element shape
    SetShape(ElementShape),
    /// Advance to the next shape in the cycle
    CycleShape,
    /// Nothing; the previews are still redrawn
    Ignore,
}

impl Command {
    /// Decode a key code. Only the low byte is compared.
    pub fn from_key(code: i32) -> Self {
        match (code & 0xff) as u8 {
            27 => Command::Quit,
            b'e' => Command::SetShape(ElementShape::Ellipse),
            b'r' => Command::SetShape(ElementShape::Rect),
            b'c' => Command::SetShape(ElementShape::Cross),
            b' ' => Command::CycleShape,
            _ => Command::Ignore,
        }
    }
}

/// State of the event loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Backends that need no display: a scripted event queue and a display
/// that records every call.
pub mod headless {
    use super::{Event, EventSource, Highgui};
    use crate::DemoResult;
    use morphdemo_core::Pix;
    use std::collections::VecDeque;

    /// Replays a fixed list of events, then reports the input closed.
    #[derive(Debug, Default)]
    pub struct ScriptedEvents {
        events: VecDeque<Event>,
    }

    impl ScriptedEvents {
        pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
            ScriptedEvents {
                events: events.into_iter().collect(),
            }
        }

        /// Events not yet delivered
        pub fn remaining(&self) -> usize {
            self.events.len()
        }
    }

    impl EventSource for ScriptedEvents {
        fn wait_event(&mut self) -> Option<Event> {
            self.events.pop_front()
        }
    }

    /// One recorded display call
    #[derive(Debug, Clone)]
    pub enum Call {
        NamedWindow(String),
        CreateTrackbar {
            trackbar: String,
            window: String,
            value: u32,
            max: u32,
        },
        /// The image is a deep copy taken at the time of the call
        ShowImage { window: String, image: Pix },
        DestroyWindow(String),
    }

    /// Display that records calls and tracks which windows are open.
    #[derive(Debug, Default)]
    pub struct RecordingHighgui {
        pub calls: Vec<Call>,
        open: Vec<String>,
    }

    impl RecordingHighgui {
        pub fn new() -> Self {
            Self::default()
        }

        /// Names of windows created and not yet destroyed
        pub fn open_windows(&self) -> &[String] {
            &self.open
        }

        /// Number of windows ever created
        pub fn windows_created(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::NamedWindow(_)))
                .count()
        }

        /// Number of windows destroyed
        pub fn windows_destroyed(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, Call::DestroyWindow(_)))
                .count()
        }

        /// Images shown, in order, with their window names
        pub fn shown(&self) -> impl Iterator<Item = (&str, &Pix)> {
            self.calls.iter().filter_map(|c| match c {
                Call::ShowImage { window, image } => Some((window.as_str(), image)),
                _ => None,
            })
        }

        /// The most recent image shown in `window`
        pub fn last_shown(&self, window: &str) -> Option<&Pix> {
            self.shown()
                .filter(|(w, _)| *w == window)
                .map(|(_, p)| p)
                .last()
        }
    }

    impl Highgui for RecordingHighgui {
        fn named_window(&mut self, name: &str) -> DemoResult<()> {
            self.calls.push(Call::NamedWindow(name.to_string()));
            if !self.open.iter().any(|w| w == name) {
                self.open.push(name.to_string());
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
            self.calls.push(Call::CreateTrackbar {
                trackbar: trackbar.to_string(),
                window: window.to_string(),
                value,
                max,
            });
            Ok(())
        }

        fn show_image(&mut self, window: &str, image: &Pix) -> DemoResult<()> {
            self.calls.push(Call::ShowImage {
                window: window.to_string(),
                image: image.deep_clone(),
            });
            Ok(())
        }

        fn destroy_window(&mut self, name: &str) -> DemoResult<()> {
            self.calls.push(Call::DestroyWindow(name.to_string()));
            self.open.retain(|w| w != name);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_commands() {
        assert_eq!(Command::from_key(KEY_ESC), Command::Quit);
        assert_eq!(
            Command::from_key('e' as i32),
            Command::SetShape(ElementShape::Ellipse)
        );
        assert_eq!(
            Command::from_key('r' as i32),
            Command::SetShape(ElementShape::Rect)
        );
        assert_eq!(
            Command::from_key('c' as i32),
            Command::SetShape(ElementShape::Cross)
        );
        assert_eq!(Command::from_key(' ' as i32), Command::CycleShape);
        assert_eq!(Command::from_key('x' as i32), Command::Ignore);
        assert_eq!(Command::from_key('E' as i32), Command::Ignore);
    }

    #[test]
    fn test_only_low_byte_counts() {
        // Modifier bits above the low byte are ignored
        assert_eq!(Command::from_key(0x10_0000 | KEY_ESC), Command::Quit);
        assert_eq!(Command::from_key(0x100 | 'c' as i32), Command::SetShape(ElementShape::Cross));
        assert_eq!(Command::from_key(-1), Command::Ignore);
    }

    #[test]
    fn test_scripted_events() {
        let mut events = headless::ScriptedEvents::new([Event::Key(1), Event::Key(2)]);
        assert_eq!(events.wait_event(), Some(Event::Key(1)));
        assert_eq!(events.remaining(), 1);
        assert_eq!(events.wait_event(), Some(Event::Key(2)));
        assert_eq!(events.wait_event(), None);
    }
}
