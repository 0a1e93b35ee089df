//! 黑白棋 AI 引擎
//!
//! 包含:
//! - 多项加权的棋局评估函数
//! - 固定深度、单边界剪枝的 Minimax 搜索

mod evaluate;
mod search;

pub use evaluate::{weights, Evaluator, Features, POSITION_WEIGHTS};
pub use search::{AiConfig, AiEngine, Difficulty, SearchResult};
