//! 搜索引擎
//!
//! 固定深度的 Minimax 搜索，只沿用父节点传下来的单一边界做剪枝。
//! 叶子节点始终从根节点走子方的视角评估。

use othello_protocol::{Board, Move, MoveGenerator, Side, DEFAULT_SEARCH_DEPTH};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluate::Evaluator;

/// 搜索初始最优值的绝对值
const UNBOUNDED: f64 = 10_000_000.0;

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// 简单：depth=2
    Easy,
    /// 中等：depth=4
    Medium,
    /// 困难：depth=6
    Hard,
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    pub max_depth: u8,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let max_depth = match difficulty {
            Difficulty::Easy => 2,
            Difficulty::Medium => DEFAULT_SEARCH_DEPTH,
            Difficulty::Hard => 6,
        };
        Self {
            difficulty,
            max_depth,
        }
    }

    /// 指定深度（难度仅作标记）
    pub fn with_depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// 搜索结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// 根视角下的评估值
    pub value: f64,
    /// 最佳走法，无合法走法或深度为 0 时为 None
    pub best_move: Option<Move>,
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            nodes_searched: 0,
        }
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 按配置深度搜索最佳走法
    pub fn search(&mut self, board: &Board, side: Side) -> Option<Move> {
        self.search_to_depth(board, side, self.config.max_depth)
            .best_move
    }

    /// 搜索到指定深度
    ///
    /// 根节点为最大化层，初始边界为根局面的静态评估值。
    pub fn search_to_depth(&mut self, board: &Board, side: Side, depth: u8) -> SearchResult {
        self.nodes_searched = 0;

        let root_value = Evaluator::evaluate(board, side);
        let result = self.alpha_beta(board, depth, true, root_value, side, side);

        debug!(
            "search side={} depth={} nodes={} value={:.3} move={:?}",
            side,
            depth,
            self.nodes_searched,
            result.value,
            result.best_move.map(|m| m.position)
        );

        result
    }

    /// 单边界 Alpha-Beta 搜索
    ///
    /// `bound` 为父节点当前的最优值；本节点的最优值一旦在本节点方向上
    /// 达到或越过它即停止枚举兄弟走法。
    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        maximizing: bool,
        bound: f64,
        to_move: Side,
        perspective: Side,
    ) -> SearchResult {
        self.nodes_searched += 1;

        let moves = MoveGenerator::legal_moves(board, to_move);

        if depth == 0 || moves.is_empty() {
            return SearchResult {
                value: Evaluator::evaluate(board, perspective),
                best_move: None,
            };
        }

        let sign = if maximizing { 1.0 } else { -1.0 };
        let mut best_value = -sign * UNBOUNDED;
        let mut best_move = None;

        for mv in moves {
            let mut child = board.clone();
            // 生成的走法必然合法
            if MoveGenerator::apply_move(&mut child, mv).is_err() {
                continue;
            }

            let result = self.alpha_beta(
                &child,
                depth - 1,
                !maximizing,
                best_value,
                to_move.opponent(),
                perspective,
            );

            if result.value * sign > best_value * sign {
                best_value = result.value;
                best_move = Some(mv);

                if best_value * sign >= bound * sign {
                    break;
                }
            }
        }

        SearchResult {
            value: best_value,
            best_move,
        }
    }

    /// 获取搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

impl Default for AiEngine {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}
