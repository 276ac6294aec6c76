pub mod booth;
pub mod config;
pub mod pool;
pub mod selection;
pub mod sequencer;
