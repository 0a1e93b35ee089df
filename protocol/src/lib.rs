//! 黑白棋共享协议库
//!
//! 包含:
//! - 格子、棋盘、位置、方向等核心数据结构
//! - 外部整数编码与棋盘的互相转换
//! - 走法生成和翻转规则
//! - 文本布局与坐标记法
//! - 棋谱格式 (JSON)

mod board;
mod constants;
mod error;
mod layout;
mod moves;
mod notation;
mod piece;
mod record;

pub use board::Board;
pub use constants::*;
pub use error::{OthelloError, ProtocolError, Result};
pub use layout::{Layout, INITIAL_LAYOUT};
pub use moves::{Move, MoveGenerator};
pub use notation::Notation;
pub use piece::{Cell, Direction, Position, Side};
pub use record::{GameMetadata, GameRecord, GameResult, MoveRecord, SaveInfo, RECORD_VERSION};
