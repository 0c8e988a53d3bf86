#![no_std]
extern crate alloc;

pub mod config;
pub mod message;
pub mod question;
