pub mod app;
pub mod focus;
pub mod input;
pub mod redraw;
pub mod render;
pub mod selection;
pub mod session;
pub mod text_entry;
pub mod theme;

pub use app::run;
