pub mod plan;
pub mod post;
pub mod recorder;
