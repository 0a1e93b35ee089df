//! 对局计时
//!
//! 每方一个累计用时的秒表，任一时刻只有走子方的秒表在走。
//! 唯一的例外是终局：双方都无棋可走后两块秒表都停止，
//! 终局时间不计入任何一方。

use std::time::{Duration, Instant};

use othello_protocol::Side;

/// 游戏计时器
#[derive(Debug)]
pub struct GameTimer {
    /// 白方已累计用时（不含当前段）
    white_elapsed: Duration,
    /// 黑方已累计用时（不含当前段）
    black_elapsed: Duration,
    /// 正在计时的一方
    running: Side,
    /// 当前计时段开始时间，暂停时为 None
    segment_start: Option<Instant>,
}

impl GameTimer {
    /// 创建新计时器，先手方开始计时
    pub fn new() -> Self {
        Self::restore(Duration::ZERO, Duration::ZERO, Side::FIRST)
    }

    /// 从保存的累计用时恢复，并立即开始为 `running` 计时
    pub fn restore(white_elapsed: Duration, black_elapsed: Duration, running: Side) -> Self {
        Self {
            white_elapsed,
            black_elapsed,
            running,
            segment_start: Some(Instant::now()),
        }
    }

    /// 获取某方累计用时
    pub fn elapsed(&self, side: Side) -> Duration {
        let base = match side {
            Side::White => self.white_elapsed,
            Side::Black => self.black_elapsed,
        };

        match self.segment_start {
            Some(start) if side == self.running => base + start.elapsed(),
            _ => base,
        }
    }

    /// 白方累计用时
    pub fn white_elapsed(&self) -> Duration {
        self.elapsed(Side::White)
    }

    /// 黑方累计用时
    pub fn black_elapsed(&self) -> Duration {
        self.elapsed(Side::Black)
    }

    /// 把秒表切换给 `side`
    pub fn switch_to(&mut self, side: Side) {
        if side == self.running {
            return;
        }

        self.commit_segment();
        self.running = side;
        if self.segment_start.is_some() {
            self.segment_start = Some(Instant::now());
        }
    }

    /// 暂停计时器
    pub fn pause(&mut self) {
        if self.segment_start.is_some() {
            self.commit_segment();
            self.segment_start = None;
        }
    }

    /// 恢复计时器
    pub fn resume(&mut self) {
        if self.segment_start.is_none() {
            self.segment_start = Some(Instant::now());
        }
    }

    /// 当前计时的一方，暂停时为 None
    pub fn running_side(&self) -> Option<Side> {
        self.segment_start.map(|_| self.running)
    }

    /// 是否暂停
    pub fn is_paused(&self) -> bool {
        self.segment_start.is_none()
    }

    /// 把当前计时段累加到归属方
    fn commit_segment(&mut self) {
        if let Some(start) = self.segment_start {
            let segment = start.elapsed();
            match self.running {
                Side::White => self.white_elapsed += segment,
                Side::Black => self.black_elapsed += segment,
            }
            self.segment_start = Some(Instant::now());
        }
    }
}

impl Default for GameTimer {
    fn default() -> Self {
        Self::new()
    }
}
