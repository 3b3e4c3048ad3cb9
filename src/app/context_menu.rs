//! Context menu overlay for a single result.
//!
//! The menu is opened by a right-click over a row and offers three actions on
//! that row's result. Its position is clamped against the viewport so the menu
//! never renders partially off-screen.

use crate::domain::SearchResult;

/// Default menu width estimate, in host units.
pub const DEFAULT_MENU_WIDTH: u32 = 200;

/// Default menu height estimate, in host units.
pub const DEFAULT_MENU_HEIGHT: u32 = 150;

/// Size of the host surface the menu is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Estimated size of the rendered menu, used for clamping and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuGeometry {
    pub width: u32,
    pub height: u32,
}

impl Default for MenuGeometry {
    fn default() -> Self {
        Self {
            width: DEFAULT_MENU_WIDTH,
            height: DEFAULT_MENU_HEIGHT,
        }
    }
}

/// Entries of the context menu, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Open,
    ShowInFolder,
    CopyPath,
}

impl MenuItem {
    pub const ALL: [Self; 3] = [Self::Open, Self::ShowInFolder, Self::CopyPath];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::ShowInFolder => "Show in Folder",
            Self::CopyPath => "Copy Full Path",
        }
    }
}

/// Context menu state: visibility, clamped position and target result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextMenu {
    visible: bool,
    left: u32,
    top: u32,
    target: Option<SearchResult>,
    geometry: MenuGeometry,
}

impl ContextMenu {
    #[must_use]
    pub fn new(geometry: MenuGeometry) -> Self {
        Self {
            geometry,
            ..Self::default()
        }
    }

    /// Shows the menu for `target` at the pointer position.
    ///
    /// The requested coordinates are clamped so that the menu's estimated
    /// bounds stay inside `viewport`: `left = min(x, width - menu_width)` and
    /// `top = min(y, height - menu_height)`, saturating at zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flashfind::app::{ContextMenu, MenuGeometry, Viewport};
    /// use flashfind::domain::SearchResult;
    ///
    /// let mut menu = ContextMenu::new(MenuGeometry::default());
    /// let viewport = Viewport { width: 800, height: 600 };
    /// menu.open(790, 10, SearchResult::file("/tmp/a", 0, 0, 0), viewport);
    /// assert!(menu.left() <= 800 - 200);
    /// ```
    pub fn open(&mut self, x: u32, y: u32, target: SearchResult, viewport: Viewport) {
        self.left = x.min(viewport.width.saturating_sub(self.geometry.width));
        self.top = y.min(viewport.height.saturating_sub(self.geometry.height));
        self.target = Some(target);
        self.visible = true;
        tracing::debug!(left = self.left, top = self.top, "context menu opened");
    }

    /// Hides the menu. Closing an already closed menu is a no-op.
    ///
    /// Returns `true` when the menu was visible.
    pub fn close(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        self.visible = false;
        self.target = None;
        tracing::debug!("context menu closed");
        true
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub const fn left(&self) -> u32 {
        self.left
    }

    #[must_use]
    pub const fn top(&self) -> u32 {
        self.top
    }

    #[must_use]
    pub const fn geometry(&self) -> MenuGeometry {
        self.geometry
    }

    /// Result the menu was opened on, while visible.
    #[must_use]
    pub fn target(&self) -> Option<&SearchResult> {
        self.target.as_ref().filter(|_| self.visible)
    }

    /// Returns `true` if the point lies inside the visible menu bounds.
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.visible
            && x >= self.left
            && x < self.left.saturating_add(self.geometry.width)
            && y >= self.top
            && y < self.top.saturating_add(self.geometry.height)
    }

    /// Maps a point inside the menu to the entry under it.
    ///
    /// The menu height is split evenly between the entries.
    #[must_use]
    pub fn item_at(&self, x: u32, y: u32) -> Option<MenuItem> {
        if !self.contains(x, y) || self.geometry.height == 0 {
            return None;
        }
        let rows = MenuItem::ALL.len() as u32;
        let index = (y - self.top) * rows / self.geometry.height;
        MenuItem::ALL.get(index as usize).copied()
    }
}
