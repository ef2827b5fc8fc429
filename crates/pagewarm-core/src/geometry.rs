//! Vertical page geometry.
//!
//! The page is modeled as a single column, so boxes only need a vertical
//! extent. All coordinates are document-space CSS pixels; the viewport is a
//! window [scroll_y, scroll_y + height) over that column.

/// A vertical box in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top edge offset from the document top.
    pub top: f64,
    /// Height of the box.
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Bottom edge offset (exclusive).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// The visible window over the page column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Current scroll offset (document y of the viewport top).
    pub scroll_y: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, height: f64) -> Self {
        Self { scroll_y, height }
    }

    /// Viewport bottom edge in document coordinates.
    pub fn bottom(&self) -> f64 {
        self.scroll_y + self.height
    }

    /// True if `rect` intersects the viewport expanded by `margin` on both
    /// vertical edges. A positive margin triggers before the box is visible.
    pub fn intersects_with_margin(&self, rect: &Rect, margin: f64) -> bool {
        rect.bottom() > self.scroll_y - margin && rect.top < self.bottom() + margin
    }

    /// Fraction of `rect` visible inside the viewport after pulling the
    /// viewport's bottom edge up by `bottom_margin`. Zero-height boxes count
    /// as fully visible once their edge is inside the window.
    pub fn visible_fraction(&self, rect: &Rect, bottom_margin: f64) -> f64 {
        let win_top = self.scroll_y;
        let win_bottom = self.bottom() - bottom_margin;
        if win_bottom <= win_top {
            return 0.0;
        }
        let overlap = rect.bottom().min(win_bottom) - rect.top.max(win_top);
        if overlap <= 0.0 {
            return 0.0;
        }
        if rect.height <= 0.0 {
            return 1.0;
        }
        (overlap / rect.height).min(1.0)
    }

    /// True if `rect` straddles the horizontal probe line `offset` pixels
    /// below the viewport top (top at or above the line, bottom at or below).
    pub fn straddles_probe_line(&self, rect: &Rect, offset: f64) -> bool {
        let line = self.scroll_y + offset;
        rect.top <= line && rect.bottom() >= line
    }
}
