pub mod apply;
pub mod gates;
