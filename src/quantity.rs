#[macro_use]
pub mod macros;

pub mod charge;
pub mod electric;
pub mod proportions;
pub mod time;
