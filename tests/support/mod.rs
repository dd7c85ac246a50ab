#![allow(dead_code)]

pub mod handlers;
