pub mod app;
pub mod sphere;
