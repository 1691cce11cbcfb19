// src/core/mod.rs
pub mod catalog;
pub mod engine;
pub mod extractor;
pub mod generator;
pub mod identifier;
pub mod irregular;
pub mod orthography;
pub mod types;
pub mod validator;
