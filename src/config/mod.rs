// src/config/mod.rs

pub mod rules;
