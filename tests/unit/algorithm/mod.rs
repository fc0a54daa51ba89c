pub mod orientation;
pub mod propagation;
pub mod rough;
