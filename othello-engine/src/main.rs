use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use othello_engine::{EngineConfig, GameSnapshot, OthelloEngine, Playable, StorageManager};
use othello_protocol::{Layout, Position, Side, NO_MOVE};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 黑白棋引擎自对弈
#[derive(Parser, Debug)]
#[command(name = "othello-engine")]
#[command(about = "Othello engine self-play", long_about = None)]
struct Cli {
    /// 黑方搜索深度（默认使用配置中的深度）
    #[arg(long)]
    black_depth: Option<u8>,

    /// 白方搜索深度（默认使用配置中的深度）
    #[arg(long)]
    white_depth: Option<u8>,

    /// 引擎配置文件 (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 对局结束后保存快照
    #[arg(long)]
    save: bool,

    /// 快照目录（默认使用系统数据目录）
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// 最多走多少手（含弃权）
    #[arg(long, default_value_t = 128)]
    max_plies: usize,
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("othello_engine=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let black_depth = cli.black_depth.unwrap_or(config.ai.max_depth);
    let white_depth = cli.white_depth.unwrap_or(config.ai.max_depth);

    let mut engine = OthelloEngine::new(config);
    info!(
        "{} self-play: black depth {}, white depth {}",
        engine.name(),
        black_depth,
        white_depth
    );

    let mut plies = 0;
    while !engine.is_game_over() && plies < cli.max_plies {
        let side = engine.side_to_move();
        let depth = match side {
            Side::Black => black_depth,
            Side::White => white_depth,
        };

        let grid = engine.board();
        let (row, col) = engine.next_move(&grid, depth, side.is_white());
        if (row, col) == NO_MOVE {
            // 深度为 0 时调用约定不给出走法，改用配置深度
            match engine.suggest_move() {
                Some(mv) => {
                    let (row, col) = mv.position.to_external();
                    play(&mut engine, row, col, side)?;
                }
                None => engine
                    .pass(side)
                    .with_context(|| format!("{} failed to pass", side))?,
            }
        } else {
            play(&mut engine, row, col, side)?;
        }

        plies += 1;
    }

    if !engine.is_game_over() {
        warn!("Stopped after {} plies", plies);
    }

    println!("{}", engine.board_state());
    println!(
        "{}",
        Layout::format(engine.board_state(), Some(engine.side_to_move()))
    );
    println!("{}", engine.record().to_transcript());
    println!(
        "black {} ({:.2?}) / white {} ({:.2?})",
        engine.score(false),
        engine.elapsed(false),
        engine.score(true),
        engine.elapsed(true)
    );
    if let Some(result) = engine.result() {
        println!("{}", result);
    }

    if cli.save {
        let storage = match cli.save_dir {
            Some(dir) => StorageManager::with_dir(dir)?,
            None => StorageManager::new()?,
        };
        let id = storage.save(&GameSnapshot::capture(&engine))?;
        info!("Saved game to {:?}", storage.saves_dir().join(&id));
    }

    Ok(())
}

/// 通过调用约定落子，坐标顺序与 `next_move` 的返回值一致
fn play(engine: &mut OthelloEngine, row: i32, col: i32, side: Side) -> Result<()> {
    if !engine.play_move(row, col, side.is_white()) {
        let position = Position::from_external(row, col);
        anyhow::bail!("Engine produced an illegal move for {}: {:?}", side, position);
    }
    Ok(())
}
