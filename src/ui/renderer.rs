//! ANSI frame rendering.
//!
//! Produces a complete frame as a `String` so the host can write it in a
//! single syscall and tests can inspect it without a terminal.

use super::format::truncate;
use super::viewmodel::{compute_viewmodel, ContextMenuView, UIViewModel, LIST_TOP};
use crate::app::AppState;
use std::fmt::Write as _;

const CLEAR: &str = "\u{1b}[2J";
const RESET: &str = "\u{1b}[0m";
const REVERSE: &str = "\u{1b}[7m";
const DIM: &str = "\u{1b}[2m";
const BOLD: &str = "\u{1b}[1m";

const PROMPT: &str = "> ";
const SPINNER: &str = " ⟳";

/// Moves the cursor to a zero-based cell.
fn goto(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{};{}H", row + 1, col + 1);
}

/// Renders `state` on a `rows` × `cols` surface.
///
/// Returns the frame and the view model it was drawn from; the host keeps the
/// latter for pointer hit testing until the next frame.
///
/// # Example
///
/// ```rust
/// use flashfind::app::AppState;
/// use flashfind::ui::render;
///
/// let (frame, viewmodel) = render(&AppState::default(), 24, 80, 0);
/// assert!(frame.contains("> "));
/// assert!(viewmodel.display_items.is_empty());
/// ```
#[must_use]
pub fn render(state: &AppState, rows: usize, cols: usize, now: i64) -> (String, UIViewModel) {
    let viewmodel = compute_viewmodel(state, rows, cols, now);
    let frame = render_viewmodel(&viewmodel, cols);
    (frame, viewmodel)
}

/// Paints a view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, cols: usize) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str(CLEAR);

    goto(&mut out, 0, 0);
    let _ = write!(out, "{BOLD}{PROMPT}{RESET}{}", vm.search_bar.query);
    if vm.search_bar.loading {
        let _ = write!(out, "{DIM}{SPINNER}{RESET}");
    }

    goto(&mut out, 1, 0);
    let _ = write!(out, "{DIM}{}{RESET}", "─".repeat(cols));

    if let Some(empty) = &vm.empty_state {
        goto(&mut out, LIST_TOP, 2);
        let _ = write!(out, "{DIM}{}{RESET}", truncate(&empty.message, cols.saturating_sub(2)));
    }

    for (offset, item) in vm.display_items.iter().enumerate() {
        goto(&mut out, LIST_TOP + offset, 0);
        let name = truncate(&item.name, cols.saturating_sub(2));
        let used = 4 + name.chars().count();
        let meta = truncate(&item.meta, cols.saturating_sub(used));
        if item.is_selected {
            let padding = cols.saturating_sub(used + meta.chars().count());
            let _ = write!(out, "{REVERSE}  {name}  {meta}{}{RESET}", " ".repeat(padding));
        } else {
            let _ = write!(out, "  {name}  {DIM}{meta}{RESET}");
        }
    }

    if let Some(menu) = &vm.context_menu {
        render_menu(&mut out, menu);
    }

    let cursor_col = PROMPT.len() + vm.search_bar.query.chars().count();
    goto(&mut out, 0, cursor_col);
    out
}

fn render_menu(out: &mut String, menu: &ContextMenuView) {
    let width = menu.width as usize;
    let rows_per_item = (menu.height as usize / menu.items.len().max(1)).max(1);

    for (i, item) in menu.items.iter().enumerate() {
        for line in 0..rows_per_item {
            goto(out, menu.top as usize + i * rows_per_item + line, menu.left as usize);
            let label = if line == 0 { item.label() } else { "" };
            let cell = truncate(&format!(" {label}"), width);
            let padding = width.saturating_sub(cell.chars().count());
            let _ = write!(out, "{REVERSE}{cell}{}{RESET}", " ".repeat(padding));
        }
    }
}
