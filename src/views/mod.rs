pub mod manager;
pub mod render;
pub mod switcher;
