pub mod admin;
pub mod artists;
pub mod charts;
pub mod entries;
pub mod mixes;
