pub mod scrub_bar;
pub mod viewport;
