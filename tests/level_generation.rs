//! Integration tests for the full generation pipeline.

use stagecraft::config::{GOAL_ZONE, MAX_GAP_WIDTH};
use stagecraft::generation::utils::{validate_headroom, validate_level};
use stagecraft::{
    deserialize_grid, GenerationConfig, LevelGenerator, PipelineStage, Position, StageError,
    StageResult, Theme, TileType,
};

#[test]
fn test_level_one_layout() -> StageResult<()> {
    let level = LevelGenerator::default().generate_dynamic_level(1)?;
    let grid = &level.grid;

    for x in [18, 35, 52, 75, 95] {
        assert_eq!(grid.get(x, 13), TileType::PipeTopLeft, "pipe cap at {x}");
        assert_eq!(grid.get(x + 1, 13), TileType::PipeTopRight);
        assert!(!grid.get(x, 12).is_pipe());
    }
    for x in [30, 50, 65, 85] {
        assert_eq!(grid.get(x, 13), TileType::Enemy, "enemy at {x}");
    }
    for (x, y) in [(40, 4), (70, 4), (55, 5)] {
        assert_eq!(grid.get(x, y), TileType::QuestionBlock, "question block at ({x}, {y})");
    }
    assert_eq!(level.report.active_theme, "classic");
    assert_eq!(level.report.difficulty_label, "Beginner");
    Ok(())
}

#[test]
fn test_level_eight_is_underground() -> StageResult<()> {
    let level = LevelGenerator::default().generate_dynamic_level(8)?;
    assert_eq!(Theme::active_for_level(8), Some(Theme::Underground));
    assert_eq!(level.report.active_theme, "underground");
    assert!(level.grid.pipe_tops().len() >= 4);
    assert!(level
        .grid
        .floor_gaps()
        .iter()
        .all(|gap| gap.width <= MAX_GAP_WIDTH));
    Ok(())
}

#[test]
fn test_same_level_same_grid() -> StageResult<()> {
    let generator = LevelGenerator::default();
    let first = generator.generate_serialized(50)?;
    let second = generator.generate_serialized(50)?;
    assert_eq!(first, second);

    let other = generator.generate_serialized(51)?;
    assert_ne!(first, other);
    Ok(())
}

#[test]
fn test_goal_is_always_placed() -> StageResult<()> {
    let generator = LevelGenerator::default();
    for level_number in [1, 2, 8, 15, 22, 100, 999] {
        let grid = generator.generate_dynamic_level(level_number)?.grid;
        let pole_x = grid.width as i32 - 3;
        for y in 5..=13 {
            assert_eq!(grid.get(pole_x, y), TileType::Flagpole);
        }
        assert_eq!(grid.get(pole_x + 1, 5), TileType::Flag);
    }
    Ok(())
}

#[test]
fn test_coin_count() -> StageResult<()> {
    let generator = LevelGenerator::default();
    for level_number in 1..=30 {
        let level = generator.generate_dynamic_level(level_number)?;
        let coins = level.grid.count(TileType::Coin);
        assert!((6..=12).contains(&coins), "level {level_number} has {coins} coins");
        assert_eq!(coins, level.report.coins.placed);
    }
    Ok(())
}

#[test]
fn test_structural_guarantees_hold() -> StageResult<()> {
    let generator = LevelGenerator::default();
    for level_number in 1..=60 {
        let level = generator.generate_dynamic_level(level_number)?;
        validate_level(&level.grid)?;
    }
    Ok(())
}

#[test]
fn test_mountain_gaps_are_narrow() -> StageResult<()> {
    let generator = LevelGenerator::default();
    for level_number in 15..=21 {
        let level = generator.generate_through(level_number, PipelineStage::Structure)?;
        assert_eq!(level.report.active_theme, "mountain");
        assert!(level.grid.floor_gaps().iter().all(|gap| gap.width <= 2));
    }
    Ok(())
}

#[test]
fn test_headroom_after_safety() -> StageResult<()> {
    let generator = LevelGenerator::default();
    for level_number in 1..=60 {
        let level = generator.generate_through(level_number, PipelineStage::Safety)?;
        validate_headroom(&level.grid)?;
    }
    Ok(())
}

#[test]
fn test_goal_zone_left_alone_by_later_passes() -> StageResult<()> {
    let generator = LevelGenerator::default();
    let goal = generator.generate_through(23, PipelineStage::Goal)?.grid;
    let done = generator.generate_dynamic_level(23)?.grid;
    let zone_start = (goal.width - GOAL_ZONE) as i32;
    for x in zone_start..goal.width as i32 {
        for y in 0..goal.height as i32 {
            assert_eq!(goal.get(x, y), done.get(x, y), "({x}, {y}) changed");
        }
    }
    Ok(())
}

#[test]
fn test_level_one_is_reachable() -> StageResult<()> {
    let level = LevelGenerator::default().generate_dynamic_level(1)?;
    assert_eq!(level.report.reachable, Some(true));

    let config = GenerationConfig {
        check_reachability: false,
        ..GenerationConfig::new()
    };
    let level = LevelGenerator::new(config)?.generate_dynamic_level(1)?;
    assert_eq!(level.report.reachable, None);
    Ok(())
}

#[test]
fn test_level_zero_is_an_error() {
    let result = LevelGenerator::default().generate_serialized(0);
    assert!(matches!(result, Err(StageError::InvalidLevel(0))));
}

#[test]
fn test_serialized_level_parses_back() -> StageResult<()> {
    let level = LevelGenerator::default().generate_dynamic_level(33)?;
    let grid = deserialize_grid(&level.serialized_grid()?)?;
    assert_eq!(grid, level.grid);
    assert_eq!(grid.width, 120);
    assert_eq!(grid.height, 15);
    assert_eq!(grid.at(Position::new(0, 14)), TileType::Ground);
    Ok(())
}

#[test]
fn test_report_json() -> StageResult<()> {
    let level = LevelGenerator::default().generate_dynamic_level(4)?;
    let value: serde_json::Value = serde_json::from_str(&level.to_json()?)?;
    assert_eq!(value["report"]["level_number"], 4);
    assert_eq!(value["report"]["stage"], "coins");
    assert_eq!(value["grid"].as_array().map(Vec::len), Some(15));
    Ok(())
}
