//! 棋谱记录格式
//!
//! 支持 JSON 格式的棋谱存储

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{ProtocolError, Result};
use crate::layout::{Layout, INITIAL_LAYOUT};
use crate::moves::{Move, MoveGenerator};
use crate::notation::Notation;
use crate::piece::{Position, Side};

/// 棋谱版本
pub const RECORD_VERSION: &str = "1.0";

/// 游戏结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// 白方胜
    WhiteWin { white: u8, black: u8 },
    /// 黑方胜
    BlackWin { white: u8, black: u8 },
    /// 平局
    Draw { white: u8, black: u8 },
}

impl GameResult {
    /// 按棋子数判定结果
    pub fn from_board(board: &Board) -> Self {
        let white = board.count(Side::White) as u8;
        let black = board.count(Side::Black) as u8;
        match MoveGenerator::leader(board) {
            Some(Side::White) => GameResult::WhiteWin { white, black },
            Some(Side::Black) => GameResult::BlackWin { white, black },
            None => GameResult::Draw { white, black },
        }
    }

    /// 胜方
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameResult::WhiteWin { .. } => Some(Side::White),
            GameResult::BlackWin { .. } => Some(Side::Black),
            GameResult::Draw { .. } => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::WhiteWin { white, black } => write!(f, "white wins {}-{}", white, black),
            GameResult::BlackWin { white, black } => write!(f, "black wins {}-{}", black, white),
            GameResult::Draw { white, black } => write!(f, "draw {}-{}", white, black),
        }
    }
}

/// 游戏元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    /// 白方玩家名
    pub white_player: String,
    /// 黑方玩家名
    pub black_player: String,
    /// 游戏日期
    pub date: String,
    /// 游戏结果
    pub result: Option<GameResult>,
}

/// 走法记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 走子方
    pub side: Side,
    /// 落子位置 [row, col]，弃权时为 None
    pub position: Option<[u8; 2]>,
    /// 坐标记法，弃权记为 `pass`
    pub notation: String,
    /// 本步翻转的棋子数
    pub flipped: usize,
    /// 走棋后该方累计用时（毫秒）
    pub elapsed_ms: Option<u64>,
}

impl MoveRecord {
    /// 创建落子记录
    pub fn new(mv: Move, flipped: usize) -> Self {
        Self {
            side: mv.side,
            position: Some([mv.position.row, mv.position.col]),
            notation: Notation::move_to_notation(&mv),
            flipped,
            elapsed_ms: None,
        }
    }

    /// 创建弃权记录
    pub fn pass(side: Side) -> Self {
        Self {
            side,
            position: None,
            notation: "pass".to_string(),
            flipped: 0,
            elapsed_ms: None,
        }
    }

    /// 附加累计用时
    pub fn with_elapsed(mut self, elapsed_ms: u64) -> Self {
        self.elapsed_ms = Some(elapsed_ms);
        self
    }

    /// 是否为弃权
    pub fn is_pass(&self) -> bool {
        self.position.is_none()
    }

    /// 还原走法
    pub fn to_move(&self) -> Option<Move> {
        let [row, col] = self.position?;
        Position::new(row, col).map(|pos| Move::new(pos, self.side))
    }
}

/// 保存信息（用于中途保存的棋局）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveInfo {
    /// 保存时间
    pub saved_at: DateTime<Utc>,
    /// 当前走子方
    pub side_to_move: Side,
    /// 白方累计用时（毫秒）
    pub white_elapsed_ms: u64,
    /// 黑方累计用时（毫秒）
    pub black_elapsed_ms: u64,
}

/// 完整的棋谱记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// 版本号
    pub version: String,
    /// 元数据
    pub metadata: GameMetadata,
    /// 初始局面布局
    pub initial_layout: String,
    /// 走法列表
    pub moves: Vec<MoveRecord>,
    /// 保存信息（可选，用于中途保存）
    pub save_info: Option<SaveInfo>,
}

impl GameRecord {
    /// 创建新的棋谱记录
    pub fn new(white_player: String, black_player: String) -> Self {
        Self {
            version: RECORD_VERSION.to_string(),
            metadata: GameMetadata {
                white_player,
                black_player,
                date: Utc::now().format("%Y-%m-%d").to_string(),
                result: None,
            },
            initial_layout: INITIAL_LAYOUT.to_string(),
            moves: Vec::new(),
            save_info: None,
        }
    }

    /// 从自定义局面创建
    pub fn from_board(white_player: String, black_player: String, board: &Board, side: Side) -> Self {
        let mut record = Self::new(white_player, black_player);
        record.initial_layout = Layout::format(board, Some(side));
        record
    }

    /// 添加走法
    pub fn add_move(&mut self, mv: MoveRecord) {
        self.moves.push(mv);
    }

    /// 设置游戏结果
    pub fn set_result(&mut self, result: GameResult) {
        self.metadata.result = Some(result);
    }

    /// 重放全部走法，得到最终局面
    pub fn replay(&self) -> Result<Board> {
        let (mut board, _) = Layout::parse(&self.initial_layout)?;
        for mv in self.moves.iter().filter_map(MoveRecord::to_move) {
            MoveGenerator::apply_move(&mut board, mv)?;
        }
        Ok(board)
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self> {
        let record: GameRecord = serde_json::from_str(json)?;
        if record.version != RECORD_VERSION {
            return Err(ProtocolError::VersionMismatch {
                expected: RECORD_VERSION.to_string(),
                actual: record.version,
            });
        }
        Ok(record)
    }

    /// 生成文本棋谱（每行一个回合）
    pub fn to_transcript(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("White: {}\n", self.metadata.white_player));
        output.push_str(&format!("Black: {}\n", self.metadata.black_player));

        for (i, mv) in self.moves.iter().enumerate() {
            let round = i / 2 + 1;
            if i % 2 == 0 {
                output.push_str(&format!("{}. {}", round, mv.notation));
            } else {
                output.push_str(&format!("  {}\n", mv.notation));
            }
        }
        if self.moves.len() % 2 == 1 {
            output.push('\n');
        }

        if let Some(result) = self.metadata.result {
            output.push_str(&format!("Result: {}\n", result));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> GameRecord {
        let mut record = GameRecord::new("engine".to_string(), "host".to_string());
        let mut board = Board::initial();

        let first = Move::new(Position::new_unchecked(2, 3), Side::Black);
        let flipped = MoveGenerator::apply_move(&mut board, first).unwrap();
        record.add_move(MoveRecord::new(first, flipped).with_elapsed(120));

        let second = MoveGenerator::legal_moves(&board, Side::White)[0];
        let flipped = MoveGenerator::apply_move(&mut board, second).unwrap();
        record.add_move(MoveRecord::new(second, flipped));

        record
    }

    #[test]
    fn test_game_record_json() {
        let mut record = sample_record();
        record.set_result(GameResult::from_board(&Board::initial()));

        let json = record.to_json().unwrap();
        let parsed = GameRecord::from_json(&json).unwrap();

        assert_eq!(parsed.metadata.white_player, "engine");
        assert_eq!(parsed.moves, record.moves);
        assert_eq!(parsed.metadata.result, Some(GameResult::Draw { white: 2, black: 2 }));
    }

    #[test]
    fn test_version_mismatch() {
        let mut record = sample_record();
        record.version = "0.1".to_string();
        let json = serde_json::to_string(&record).unwrap();

        assert!(matches!(
            GameRecord::from_json(&json),
            Err(ProtocolError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_replay() {
        let mut record = sample_record();
        record.add_move(MoveRecord::pass(Side::Black));

        let board = record.replay().unwrap();
        assert_eq!(board.count(Side::White) + board.count(Side::Black), 6);
    }

    #[test]
    fn test_move_record() {
        let mv = Move::new(Position::new_unchecked(2, 3), Side::Black);
        let record = MoveRecord::new(mv, 1);

        assert_eq!(record.notation, "d3");
        assert_eq!(record.to_move(), Some(mv));
        assert!(!record.is_pass());
        assert!(MoveRecord::pass(Side::White).is_pass());
        assert_eq!(MoveRecord::pass(Side::White).to_move(), None);
    }

    #[test]
    fn test_transcript() {
        let mut record = sample_record();
        record.add_move(MoveRecord::pass(Side::Black));
        record.set_result(GameResult::BlackWin { white: 10, black: 54 });

        let text = record.to_transcript();
        assert!(text.contains("1. d3"));
        assert!(text.contains("2. pass"));
        assert!(text.contains("black wins 54-10"));
    }

    #[test]
    fn test_result_from_board() {
        let mut board = Board::initial();
        MoveGenerator::apply_move(
            &mut board,
            Move::new(Position::new_unchecked(2, 3), Side::Black),
        )
        .unwrap();

        let result = GameResult::from_board(&board);
        assert_eq!(result, GameResult::BlackWin { white: 1, black: 4 });
        assert_eq!(result.winner(), Some(Side::Black));
    }
}
