//! 棋局存储
//!
//! 快照保存棋盘、走子方、双方累计用时和棋谱，恢复后计时从保存点继续。

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use othello_protocol::{Board, ExternalGrid, GameRecord, ProtocolError, SaveInfo, Side};
use serde::{Deserialize, Serialize};

use crate::engine::{EngineConfig, OthelloEngine};
use crate::game::GameTimer;

/// 棋局快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// 棋盘（外部编码）
    pub board: ExternalGrid,
    /// 当前走子方
    pub side_to_move: Side,
    /// 白方累计用时（毫秒）
    pub white_elapsed_ms: u64,
    /// 黑方累计用时（毫秒）
    pub black_elapsed_ms: u64,
    /// 棋谱
    pub record: GameRecord,
}

impl GameSnapshot {
    /// 从引擎当前状态生成快照
    pub fn capture(engine: &OthelloEngine) -> Self {
        let timer = engine.timer();
        let white_elapsed_ms = timer.white_elapsed().as_millis() as u64;
        let black_elapsed_ms = timer.black_elapsed().as_millis() as u64;

        let mut record = engine.record().clone();
        record.save_info = Some(SaveInfo {
            saved_at: Utc::now(),
            side_to_move: engine.side_to_move(),
            white_elapsed_ms,
            black_elapsed_ms,
        });

        Self {
            board: engine.board_state().to_external(),
            side_to_move: engine.side_to_move(),
            white_elapsed_ms,
            black_elapsed_ms,
            record,
        }
    }

    /// 恢复为引擎，计时器从保存的累计用时继续
    pub fn restore(&self, config: EngineConfig) -> OthelloEngine {
        let mut timer = GameTimer::restore(
            Duration::from_millis(self.white_elapsed_ms),
            Duration::from_millis(self.black_elapsed_ms),
            self.side_to_move,
        );
        if self.record.metadata.result.is_some() {
            timer.pause();
        }

        OthelloEngine::with_state(
            Board::from_external(&self.board),
            self.side_to_move,
            timer,
            self.record.clone(),
            config,
        )
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }

    /// 紧凑二进制编码
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProtocolError> {
        Ok(bincode::serialize(self)?)
    }

    /// 从二进制解码
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// 存储管理器
pub struct StorageManager {
    saves_dir: PathBuf,
}

impl StorageManager {
    /// 使用默认目录创建
    pub fn new() -> Result<Self> {
        Self::with_dir(get_saves_directory()?)
    }

    /// 使用指定目录创建
    pub fn with_dir(saves_dir: PathBuf) -> Result<Self> {
        // 确保目录存在
        if !saves_dir.exists() {
            fs::create_dir_all(&saves_dir)
                .with_context(|| format!("Failed to create saves directory: {:?}", saves_dir))?;
        }

        Ok(Self { saves_dir })
    }

    pub fn saves_dir(&self) -> &Path {
        &self.saves_dir
    }

    /// 保存快照，返回文件名
    pub fn save(&self, snapshot: &GameSnapshot) -> Result<String> {
        let timestamp = snapshot
            .record
            .save_info
            .as_ref()
            .map(|info| info.saved_at)
            .unwrap_or_else(Utc::now);
        let filename = generate_filename(&timestamp, &snapshot.record);
        let filepath = self.saves_dir.join(&filename);

        let json_content = snapshot.to_json().context("Failed to serialize snapshot")?;

        fs::write(&filepath, json_content)
            .with_context(|| format!("Failed to write file: {:?}", filepath))?;

        Ok(filename)
    }

    /// 加载快照
    pub fn load(&self, game_id: &str) -> Result<GameSnapshot> {
        let filepath = self.saves_dir.join(game_id);

        if !filepath.exists() {
            anyhow::bail!("Saved game not found: {}", game_id);
        }

        let content = fs::read_to_string(&filepath)
            .with_context(|| format!("Failed to read file: {:?}", filepath))?;

        GameSnapshot::from_json(&content).context("Failed to parse saved game")
    }

    /// 列出所有保存的棋局（按文件名排序）
    pub fn list(&self) -> Result<Vec<String>> {
        let mut games = Vec::new();
        let entries = fs::read_dir(&self.saves_dir)
            .with_context(|| format!("Failed to read directory: {:?}", self.saves_dir))?;

        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                    games.push(name.to_string());
                }
            }
        }

        games.sort();
        Ok(games)
    }

    /// 删除保存的棋局
    pub fn delete(&self, game_id: &str) -> Result<()> {
        let filepath = self.saves_dir.join(game_id);
        fs::remove_file(&filepath)
            .with_context(|| format!("Failed to delete file: {:?}", filepath))
    }
}

/// 获取默认存储目录
fn get_saves_directory() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Could not determine data directory")?;
    Ok(base.join("othello-engine").join("saves"))
}

/// 生成文件名：时间戳_白方_vs_黑方.json
fn generate_filename(timestamp: &DateTime<Utc>, record: &GameRecord) -> String {
    let sanitize = |name: &str| -> String {
        name.chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect()
    };

    format!(
        "{}_{}_vs_{}.json",
        timestamp.format("%Y%m%d_%H%M%S%3f"),
        sanitize(&record.metadata.white_player),
        sanitize(&record.metadata.black_player)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playable::Playable;
    use tempfile::TempDir;

    fn played_engine() -> OthelloEngine {
        let mut engine = OthelloEngine::default();
        assert!(engine.play_move(3, 2, false));
        let (row, col) = engine.legal_moves(Side::White)[0].position.to_external();
        assert!(engine.play_move(row, col, true));
        engine
    }

    #[test]
    fn test_snapshot_restore() {
        let engine = played_engine();
        let snapshot = GameSnapshot::capture(&engine);

        assert_eq!(snapshot.side_to_move, Side::Black);
        assert!(snapshot.record.save_info.is_some());

        let restored = snapshot.restore(EngineConfig::default());
        assert_eq!(restored.board(), engine.board());
        assert_eq!(restored.side_to_move(), Side::Black);
        assert_eq!(restored.record().moves.len(), 2);
        assert_eq!(restored.timer().running_side(), Some(Side::Black));
        assert!(
            restored.elapsed(true) >= Duration::from_millis(snapshot.white_elapsed_ms)
        );
    }

    #[test]
    fn test_snapshot_encodings() {
        let snapshot = GameSnapshot::capture(&played_engine());

        let json = snapshot.to_json().unwrap();
        let from_json = GameSnapshot::from_json(&json).unwrap();
        assert_eq!(from_json.board, snapshot.board);
        assert_eq!(from_json.record.moves, snapshot.record.moves);

        let bytes = snapshot.to_bytes().unwrap();
        let from_bytes = GameSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(from_bytes.board, snapshot.board);
        assert_eq!(from_bytes.white_elapsed_ms, snapshot.white_elapsed_ms);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let storage = StorageManager::with_dir(dir.path().join("saves")).unwrap();

        let snapshot = GameSnapshot::capture(&played_engine());
        let id = storage.save(&snapshot).unwrap();
        assert!(id.ends_with(".json"));
        assert_eq!(storage.list().unwrap(), vec![id.clone()]);

        let loaded = storage.load(&id).unwrap();
        assert_eq!(loaded.board, snapshot.board);
        assert_eq!(loaded.side_to_move, snapshot.side_to_move);

        storage.delete(&id).unwrap();
        assert!(storage.list().unwrap().is_empty());
    }

    #[test]
    fn test_load_missing() {
        let dir = TempDir::new().unwrap();
        let storage = StorageManager::with_dir(dir.path().to_path_buf()).unwrap();
        assert!(storage.load("missing.json").is_err());
    }

    #[test]
    fn test_filename_sanitized() {
        let record = GameRecord::new("a b".to_string(), "c/d".to_string());
        let name = generate_filename(&Utc::now(), &record);
        assert!(name.ends_with("_a_b_vs_c_d.json"));
    }
}
