//! 黑白棋引擎
//!
//! 包含:
//! - 对外调用约定 (Playable)
//! - 引擎外观：棋盘状态、合法走法缓存、AI 搜索
//! - 双方计时
//! - 棋局存储

pub mod engine;
pub mod game;
pub mod playable;
pub mod storage;

pub use engine::{EngineConfig, OthelloEngine};
pub use game::GameTimer;
pub use playable::Playable;
pub use storage::{GameSnapshot, StorageManager};
