#[macro_use]
mod macros;

pub mod cost;
pub mod energy;
pub mod measure;
pub mod power;
pub mod time;
