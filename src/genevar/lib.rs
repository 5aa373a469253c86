#[macro_use] extern crate serde_derive;
#[macro_use] extern crate lazy_static;

pub mod types;
pub mod data_types;
pub mod bio;
pub mod links;
pub mod provider;
pub mod lookup;
pub mod web;
