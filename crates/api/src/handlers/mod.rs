pub mod fallback;
pub mod resource;
