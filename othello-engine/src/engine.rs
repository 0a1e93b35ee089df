//! 引擎门面
//!
//! 持有当前棋盘、走子方、计时器和棋谱，实现 [`Playable`] 约定。

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use othello_ai::{AiConfig, AiEngine};
use othello_protocol::{
    Board, ExternalGrid, GameRecord, GameResult, Move, MoveGenerator, MoveRecord, OthelloError,
    Position, Side, ENGINE_NAME, NO_MOVE,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::game::GameTimer;
use crate::playable::Playable;

/// 引擎配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 对外报告的名称
    pub name: String,
    /// 搜索配置
    pub ai: AiConfig,
    /// 外部棋盘含未知编码时报错，而不是按空格处理
    pub strict_input: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: ENGINE_NAME.to_string(),
            ai: AiConfig::default(),
            strict_input: false,
        }
    }
}

impl EngineConfig {
    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

/// 某方的合法走法缓存，棋盘或走子方变化后显式刷新
#[derive(Debug, Clone)]
struct LegalMoveCache {
    side: Side,
    moves: Vec<Move>,
}

impl LegalMoveCache {
    fn compute(board: &Board, side: Side) -> Self {
        Self {
            side,
            moves: MoveGenerator::legal_moves(board, side),
        }
    }
}

/// 黑白棋引擎
pub struct OthelloEngine {
    config: EngineConfig,
    board: Board,
    side_to_move: Side,
    pending: LegalMoveCache,
    timer: GameTimer,
    ai: AiEngine,
    record: GameRecord,
}

impl OthelloEngine {
    /// 从初始局面创建
    pub fn new(config: EngineConfig) -> Self {
        Self::from_board(Board::initial(), Side::FIRST, config)
    }

    /// 从任意局面创建
    pub fn from_board(board: Board, side_to_move: Side, config: EngineConfig) -> Self {
        let record = GameRecord::from_board(
            config.name.clone(),
            config.name.clone(),
            &board,
            side_to_move,
        );
        Self {
            pending: LegalMoveCache::compute(&board, side_to_move),
            ai: AiEngine::new(config.ai.clone()),
            timer: GameTimer::restore(Duration::ZERO, Duration::ZERO, side_to_move),
            config,
            board,
            side_to_move,
            record,
        }
    }

    /// 用恢复的计时器和棋谱重建（见 `storage`）
    pub(crate) fn with_state(
        board: Board,
        side_to_move: Side,
        timer: GameTimer,
        record: GameRecord,
        config: EngineConfig,
    ) -> Self {
        Self {
            pending: LegalMoveCache::compute(&board, side_to_move),
            ai: AiEngine::new(config.ai.clone()),
            timer,
            config,
            board,
            side_to_move,
            record,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board_state(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    /// 某方的合法走法（返回副本）
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        if self.pending.side == side {
            self.pending.moves.clone()
        } else {
            MoveGenerator::legal_moves(&self.board, side)
        }
    }

    /// 落子
    ///
    /// 重新生成合法走法并检查落点，成功后刷新对方的合法走法缓存，
    /// 并把秒表交给对方。返回翻转的棋子数。
    pub fn try_play(&mut self, position: Position, side: Side) -> Result<usize, OthelloError> {
        let mv = Move::new(position, side);
        let legal = MoveGenerator::legal_moves(&self.board, side);
        if !legal.contains(&mv) {
            warn!("Rejected illegal move: {}", mv);
            return Err(OthelloError::IllegalMove {
                row: position.row,
                col: position.col,
                side,
            });
        }

        let flipped = MoveGenerator::apply_move(&mut self.board, mv)?;
        let elapsed_ms = self.timer.elapsed(side).as_millis() as u64;
        self.record
            .add_move(MoveRecord::new(mv, flipped).with_elapsed(elapsed_ms));
        info!("{} played {} flipping {}", side, position, flipped);

        self.hand_over(side.opponent());
        Ok(flipped)
    }

    /// 无合法走法时弃权，把回合交给对方
    pub fn pass(&mut self, side: Side) -> Result<(), OthelloError> {
        if MoveGenerator::has_legal_move(&self.board, side) {
            return Err(OthelloError::PassNotAllowed { side });
        }

        let elapsed_ms = self.timer.elapsed(side).as_millis() as u64;
        self.record
            .add_move(MoveRecord::pass(side).with_elapsed(elapsed_ms));
        info!("{} passes", side);

        self.hand_over(side.opponent());
        Ok(())
    }

    /// 载入外部棋盘，按配置选择宽松或严格转换
    pub fn load_external(&mut self, grid: &ExternalGrid, side: Side) -> Result<(), OthelloError> {
        let board = if self.config.strict_input {
            Board::try_from_external(grid)?
        } else {
            Board::from_external(grid)
        };

        self.board = board;
        self.side_to_move = side;
        self.pending = LegalMoveCache::compute(&self.board, side);

        // 秒表跟随新的走子方，已终局的棋盘不计时
        self.timer.switch_to(side);
        if self.is_game_over() {
            self.timer.pause();
        } else {
            self.timer.resume();
        }
        Ok(())
    }

    /// 载入给定棋盘后搜索下一步
    pub fn compute_next_move(
        &mut self,
        grid: &ExternalGrid,
        depth: u8,
        side: Side,
    ) -> Result<Option<Move>, OthelloError> {
        self.load_external(grid, side)?;
        let result = self.ai.search_to_depth(&self.board, side, depth);
        Ok(result.best_move)
    }

    /// 用配置深度为当前走子方搜索，深度为 0 时退回第一个合法走法
    pub fn suggest_move(&mut self) -> Option<Move> {
        if self.ai.config().max_depth == 0 {
            return self.pending.moves.first().copied();
        }
        self.ai.search(&self.board, self.side_to_move)
    }

    /// 某方棋子数
    pub fn piece_count(&self, side: Side) -> usize {
        self.board.count(side)
    }

    pub fn is_game_over(&self) -> bool {
        MoveGenerator::is_game_over(&self.board)
    }

    /// 对局结束后的结果
    pub fn result(&self) -> Option<GameResult> {
        self.is_game_over()
            .then(|| GameResult::from_board(&self.board))
    }

    /// 回合交接：刷新缓存、切换秒表，终局时记录结果并停表
    fn hand_over(&mut self, next: Side) {
        self.side_to_move = next;
        self.pending = LegalMoveCache::compute(&self.board, next);
        self.timer.switch_to(next);

        if let Some(result) = self.result() {
            self.record.set_result(result);
            self.timer.pause();
            info!("Game over: {}", result);
        }
    }
}

impl Default for OthelloEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Playable for OthelloEngine {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn is_playable(&self, row: i32, col: i32, is_white: bool) -> bool {
        let Some(position) = Position::from_external(row, col) else {
            return false;
        };
        let side = Side::from_white_flag(is_white);
        MoveGenerator::legal_moves(&self.board, side).contains(&Move::new(position, side))
    }

    fn play_move(&mut self, row: i32, col: i32, is_white: bool) -> bool {
        let Some(position) = Position::from_external(row, col) else {
            warn!("Rejected off-board move: ({}, {})", row, col);
            return false;
        };
        self.try_play(position, Side::from_white_flag(is_white))
            .is_ok()
    }

    fn next_move(&mut self, game: &ExternalGrid, level: u8, is_white_turn: bool) -> (i32, i32) {
        let side = Side::from_white_flag(is_white_turn);
        match self.compute_next_move(game, level, side) {
            Ok(Some(mv)) => mv.position.to_external(),
            Ok(None) => NO_MOVE,
            Err(e) => {
                warn!("Failed to load board: {}", e);
                NO_MOVE
            }
        }
    }

    fn score(&self, is_white: bool) -> i32 {
        self.piece_count(Side::from_white_flag(is_white)) as i32
    }

    fn board(&self) -> ExternalGrid {
        self.board.to_external()
    }

    fn elapsed(&self, is_white: bool) -> Duration {
        self.timer.elapsed(Side::from_white_flag(is_white))
    }
}
