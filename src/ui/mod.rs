//! UI module - terminal rendering and input
//!
//! Structure:
//! - `canvas.rs` - Clipped drawing primitives over a buffer
//! - `draw.rs` - Selector rendering
//! - `text.rs` - Markup-aware width and trimming
//! - `theme.rs` - Color themes and presets
//! - `keymap.rs` - Key names and key event translation
//! - `terminal.rs` - Crossterm frontend for the drivers

pub mod canvas;
pub mod draw;
pub mod keymap;
pub mod terminal;
pub mod text;
pub mod theme;

pub use draw::draw;
pub use keymap::Keymap;
pub use terminal::TerminalFrontend;
pub use theme::Theme;
