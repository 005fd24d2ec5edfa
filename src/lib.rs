#![allow(clippy::many_single_char_names)]

pub mod acceleration;
pub mod camera;
pub mod error;
pub mod lighting;
pub mod material;
pub mod math;
pub mod obj;
pub mod object;
pub mod render;
pub mod world;

pub use error::{Error, Result};
