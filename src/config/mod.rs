pub mod post;
pub mod presets;
