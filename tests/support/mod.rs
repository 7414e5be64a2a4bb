#![allow(dead_code)]

pub mod listing;
pub mod socket_guard;
