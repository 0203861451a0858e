//! Board and scoring rules of a route-claiming train game.
//!
//! A [`board::Board`] holds cities and the routes between them, which players claim one by one.
//! Destination tickets are dealt from a [`ticket::TicketPool`], and [`score::score`] turns claimed
//! routes and completed tickets into points.
//!
//! Nothing in here locks: whoever owns a board or a pool serializes its mutations.

pub mod board;
pub mod card;
pub mod city;
pub mod config;
pub mod error;
pub mod player;
pub mod score;
pub mod standard;
pub mod ticket;
