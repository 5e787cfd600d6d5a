//! Foundation module - 2D math shared by the renderers

pub mod math;
