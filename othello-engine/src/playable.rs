//! 对外调用约定
//!
//! 宿主（比赛调度程序）只通过这组方法与引擎交互。
//! 坐标：`play_move`/`is_playable` 的第一个参数是棋盘数组的第一维，
//! 与 `next_move` 返回值的第一项相同，返回值可以原样传回落子。
//! 无合法走法时 `next_move` 返回 `(-1, -1)`。

use std::time::Duration;

use othello_protocol::ExternalGrid;

/// 可对弈的引擎
pub trait Playable {
    /// 引擎名称
    fn name(&self) -> &str;

    /// 查询落子是否合法（每次重新生成合法走法）
    fn is_playable(&self, row: i32, col: i32, is_white: bool) -> bool;

    /// 落子，非法时返回 false 且棋盘不变
    fn play_move(&mut self, row: i32, col: i32, is_white: bool) -> bool;

    /// 载入给定棋盘并搜索到 `level` 层，返回 `(row, col)`
    fn next_move(&mut self, game: &ExternalGrid, level: u8, is_white_turn: bool) -> (i32, i32);

    /// 某方棋子数
    fn score(&self, is_white: bool) -> i32;

    /// 当前棋盘快照（外部编码）
    fn board(&self) -> ExternalGrid;

    /// 某方累计用时
    fn elapsed(&self, is_white: bool) -> Duration;
}
