pub mod health;
pub mod text;
pub mod video;
