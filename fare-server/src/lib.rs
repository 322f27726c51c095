//! Transit fare planner server.
//!
//! A web application that answers: "I need to travel on this many days,
//! which combination of tickets is cheapest?"

pub mod cache;
pub mod domain;
pub mod fares;
pub mod planner;
pub mod web;
