//! Viewport classification.

use serde::{Deserialize, Serialize};

/// Default width below which the layout is compact, in CSS pixels.
pub const DEFAULT_COMPACT_BREAKPOINT_PX: u32 = 500;

/// Tells whether the sidebar renders in the compact layout.
#[cfg_attr(test, mockall::automock)]
pub trait ViewportClassifier {
    /// Whether the compact layout is active.
    fn is_compact_layout(&self) -> bool;
}

/// Width breakpoints used to classify the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    /// Widths strictly below this are compact.
    pub compact_below_px: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            compact_below_px: DEFAULT_COMPACT_BREAKPOINT_PX,
        }
    }
}

impl Breakpoints {
    /// Classify a viewport width.
    #[must_use]
    pub fn classify(&self, width_px: f64) -> bool {
        width_px < f64::from(self.compact_below_px)
    }
}

/// A viewport with a known width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredViewport {
    /// Breakpoints in effect.
    pub breakpoints: Breakpoints,
    /// Current width in CSS pixels.
    pub width_px: f64,
}

impl ViewportClassifier for MeasuredViewport {
    fn is_compact_layout(&self) -> bool {
        self.breakpoints.classify(self.width_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_breakpoint() {
        assert_eq!(Breakpoints::default().compact_below_px, 500);
    }

    #[test]
    fn test_classify_boundary() {
        let breakpoints = Breakpoints::default();
        assert!(breakpoints.classify(320.0));
        assert!(breakpoints.classify(499.5));
        assert!(!breakpoints.classify(500.0));
        assert!(!breakpoints.classify(1280.0));
    }

    #[test]
    fn test_measured_viewport() {
        let phone = MeasuredViewport {
            breakpoints: Breakpoints::default(),
            width_px: 390.0,
        };
        let desktop = MeasuredViewport {
            width_px: 1440.0,
            ..phone
        };
        assert!(phone.is_compact_layout());
        assert!(!desktop.is_compact_layout());
    }
}
