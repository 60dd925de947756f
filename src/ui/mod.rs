pub mod palette_view;
pub mod text;

pub use palette_view::{PaletteTheme, PaletteView, RenderFrame};
pub use text::{Color, Span, SpanLine, Style};
