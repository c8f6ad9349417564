pub mod exp;
pub mod extract;
pub mod item;
pub mod overlay;
pub mod preprocess;
pub mod text;
pub mod typo;
