//! A small cooperative disease-spread board game: a pawn travels between connected cities,
//! treating infection cubes and curing the disease, while infections and outbreaks spread
//! at the end of every turn.

pub mod board;
pub mod card;
pub mod city;
pub mod event;
pub mod game;
pub mod game_phase;
pub mod manager;
pub mod player;
pub mod rules;

#[macro_use]
extern crate lazy_static;
#[cfg(test)]
#[macro_use]
extern crate smallvec;
