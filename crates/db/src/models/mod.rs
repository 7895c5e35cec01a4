pub mod category;
pub mod device;
pub mod game;
pub mod select;
