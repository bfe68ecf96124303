pub mod config;
pub mod deck;
pub mod domain;
pub mod player;
pub mod storage;
pub mod upload;
