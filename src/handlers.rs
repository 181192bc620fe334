pub mod health;
pub mod heatmap;
pub mod index;
