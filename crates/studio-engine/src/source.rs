//! Capture source and pane layout state.

use tracing::{debug, info, warn};

use studio_ipc::{DisplayMode, SourceMode, SourceSnapshot};

use crate::error::InvalidOperation;
use crate::SessionResult;

/// Owns the source selection and the layout that depends on it.
///
/// Layout lives next to the source so a source change can never leave a
/// display mode pointing at a pane that no longer exists.
#[derive(Debug, Clone, Default)]
pub struct SourceController {
    source: SourceMode,
    screen_with_audio: bool,
    display_mode: DisplayMode,
    stream_error: Option<String>,
    acquiring: bool,
}

impl SourceController {
    /// Create a controller on the camera source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a capture source.
    ///
    /// Returns true if the source changed and the media layer must be asked
    /// for it.
    pub fn set_source(&mut self, mode: SourceMode) -> bool {
        if mode == self.source {
            return false;
        }

        let previous = self.source;
        self.source = mode;
        if !mode.has_screen() {
            self.display_mode = DisplayMode::Default;
        }
        self.stream_error = None;
        self.acquiring = true;

        info!(
            previous = previous.name(),
            current = mode.name(),
            "Source changed"
        );
        true
    }

    /// Flip screen audio capture.
    ///
    /// Returns the new flag when it applies to the running capture, or None
    /// while the source has no screen and the flag is inert.
    pub fn toggle_screen_audio(&mut self) -> Option<bool> {
        self.screen_with_audio = !self.screen_with_audio;
        self.stream_error = None;

        debug!(enabled = self.screen_with_audio, "Screen audio toggled");
        self.source.has_screen().then_some(self.screen_with_audio)
    }

    /// Rearrange the panes.
    ///
    /// Returns true if the layout changed or a stored error was cleared.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> SessionResult<bool> {
        if !self.source.has_screen() {
            return Err(InvalidOperation::NoSecondaryPane.into());
        }

        let cleared = self.stream_error.take().is_some();
        if mode == self.display_mode {
            return Ok(cleared);
        }

        self.display_mode = mode;
        debug!(mode = mode.name(), "Display mode changed");
        Ok(true)
    }

    /// Store a media failure for the operator to see.
    pub fn report_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(%message, "Stream error");
        self.stream_error = Some(message);
        self.acquiring = false;
    }

    /// Dismiss the stored error. Returns true if there was one.
    pub fn clear_error(&mut self) -> bool {
        self.stream_error.take().is_some()
    }

    /// Note that the media layer is running the requested source.
    pub fn mark_acquired(&mut self) -> bool {
        std::mem::replace(&mut self.acquiring, false)
    }

    /// Active capture mode.
    pub fn source(&self) -> SourceMode {
        self.source
    }

    /// Pane arrangement.
    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Screen audio flag, even while inert.
    pub fn screen_with_audio(&self) -> bool {
        self.screen_with_audio
    }

    /// Last stored media failure.
    pub fn stream_error(&self) -> Option<&str> {
        self.stream_error.as_deref()
    }

    /// Get the current source state.
    pub fn snapshot(&self) -> SourceSnapshot {
        SourceSnapshot {
            source: self.source,
            screen_with_audio: self.screen_with_audio,
            display_mode: self.display_mode,
            stream_error: self.stream_error.clone(),
            acquiring: self.acquiring,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;

    #[test]
    fn test_starts_on_camera_with_default_layout() {
        let controller = SourceController::new();
        assert_eq!(controller.source(), SourceMode::Camera);
        assert_eq!(controller.display_mode(), DisplayMode::Default);
        assert!(!controller.screen_with_audio());
        assert!(controller.stream_error().is_none());
    }

    #[test]
    fn test_leaving_both_resets_display_mode() {
        for mode in DisplayMode::ALL {
            let mut controller = SourceController::new();
            controller.set_source(SourceMode::Both);
            controller.set_display_mode(mode).unwrap();

            assert!(controller.set_source(SourceMode::Camera));
            assert_eq!(controller.display_mode(), DisplayMode::Default);
        }
    }

    #[test]
    fn test_switching_between_screen_modes_keeps_layout() {
        let mut controller = SourceController::new();
        controller.set_source(SourceMode::Both);
        controller.set_display_mode(DisplayMode::ScreenLarge).unwrap();

        controller.set_source(SourceMode::Screen);
        assert_eq!(controller.display_mode(), DisplayMode::ScreenLarge);
    }

    #[test]
    fn test_display_mode_rejected_on_camera() {
        let mut controller = SourceController::new();

        for mode in DisplayMode::ALL {
            assert_eq!(
                controller.set_display_mode(mode),
                Err(SessionError::InvalidOperation(
                    InvalidOperation::NoSecondaryPane
                ))
            );
            assert_eq!(controller.display_mode(), DisplayMode::Default);
        }
    }

    #[test]
    fn test_same_display_mode_reports_no_change() {
        let mut controller = SourceController::new();
        controller.set_source(SourceMode::Screen);

        assert_eq!(controller.set_display_mode(DisplayMode::Default), Ok(false));
        assert_eq!(controller.set_display_mode(DisplayMode::VideoLarge), Ok(true));

        controller.report_error("capture lost");
        assert_eq!(controller.set_display_mode(DisplayMode::VideoLarge), Ok(true));
        assert!(controller.stream_error().is_none());
    }

    #[test]
    fn test_same_source_is_a_no_op() {
        let mut controller = SourceController::new();
        controller.report_error("camera busy");

        assert!(!controller.set_source(SourceMode::Camera));
        assert_eq!(controller.stream_error(), Some("camera busy"));
    }

    #[test]
    fn test_screen_audio_inert_on_camera() {
        let mut controller = SourceController::new();

        assert_eq!(controller.toggle_screen_audio(), None);
        assert!(controller.screen_with_audio());

        controller.set_source(SourceMode::Screen);
        assert_eq!(controller.toggle_screen_audio(), Some(false));
        assert_eq!(controller.toggle_screen_audio(), Some(true));
    }

    #[test]
    fn test_screen_audio_survives_camera_round_trip() {
        let mut controller = SourceController::new();
        controller.set_source(SourceMode::Both);
        controller.toggle_screen_audio();

        controller.set_source(SourceMode::Camera);
        assert!(controller.screen_with_audio());
        controller.set_source(SourceMode::Both);
        assert!(controller.snapshot().screen_with_audio);
    }

    #[test]
    fn test_camera_toggle_audio_and_layout_scenario() {
        let mut controller = SourceController::new();

        controller.toggle_screen_audio();
        let result = controller.set_display_mode(DisplayMode::VideoLarge);

        assert!(controller.screen_with_audio());
        assert!(result.is_err());
        assert_eq!(controller.display_mode(), DisplayMode::Default);
    }

    #[test]
    fn test_error_lifecycle() {
        let mut controller = SourceController::new();
        controller.set_source(SourceMode::Screen);
        assert!(controller.snapshot().acquiring);

        controller.report_error("permission denied");
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.stream_error.as_deref(), Some("permission denied"));
        assert!(!snapshot.acquiring);

        assert!(controller.clear_error());
        assert!(!controller.clear_error());
    }

    #[test]
    fn test_source_change_clears_error_and_acquires() {
        let mut controller = SourceController::new();
        controller.report_error("camera busy");

        controller.set_source(SourceMode::Both);
        assert!(controller.stream_error().is_none());
        assert!(controller.mark_acquired());
        assert!(!controller.mark_acquired());
    }
}
