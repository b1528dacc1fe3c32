//! FRP Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, integration
//! tests and benches can use `frp_tetris::{core,input,pipeline,term,types}`.

pub use frp_tetris_core as core;
pub use frp_tetris_input as input;
pub use frp_tetris_pipeline as pipeline;
pub use frp_tetris_term as term;
pub use frp_tetris_types as types;
