//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod components;
pub mod input;
pub mod item;
pub mod movement;
pub mod pursuit;
pub mod sanity;
pub mod state;

pub use self::components::*;
pub use self::input::*;
pub use self::item::*;
pub use self::movement::*;
pub use self::pursuit::*;
pub use self::sanity::*;
pub use self::state::*;
