//! Coin Arena library
//!
//! A small top-down arcade game: move around, shoot boxes, collect the coins
//! they drop, and spend them on upgrades while standing in the shop zone.
//!
//! The rules live in [`session::GameSession`], which runs without Bevy's
//! scheduler and is driven by the plugins in [`menu`], [`arcade`] and
//! [`audio`].

pub mod arcade;
pub mod audio;
pub mod combat;
pub mod config;
pub mod constants;
pub mod economy;
pub mod entities;
pub mod error;
pub mod feedback;
pub mod graphics;
pub mod input;
pub mod menu;
pub mod profile;
pub mod render;
pub mod rendering;
pub mod save;
pub mod session;
pub mod shop;
