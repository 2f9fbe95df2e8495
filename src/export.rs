use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::state::{League, Player};
use crate::view::TABLE_HEADER;

/// Writes the table as currently displayed into a timestamped workbook under `dir`.
pub fn export_player_table(dir: &Path, league: League, players: &[Player]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed creating export dir {}", dir.display()))?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let file = format!(
        "players_{}_{stamp}.xlsx",
        league.wire_value().to_lowercase()
    );
    let path = dir.join(file);
    write_player_workbook(&path, players)?;
    Ok(path)
}

pub fn write_player_workbook(path: &Path, players: &[Player]) -> Result<()> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Players")?;
        write_header(sheet)?;
        for (idx, player) in players.iter().enumerate() {
            write_player(sheet, idx as u32 + 1, player)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

fn write_header(sheet: &mut Worksheet) -> Result<()> {
    for (col, title) in TABLE_HEADER.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *title)
            .with_context(|| format!("write header ({col})"))?;
    }
    Ok(())
}

fn write_player(sheet: &mut Worksheet, row: u32, player: &Player) -> Result<()> {
    let text = [&player.player_name, &player.team_name, &player.league];
    for (col, value) in text.iter().enumerate() {
        sheet
            .write_string(row, col as u16, value.as_str())
            .with_context(|| format!("write cell ({row},{col})"))?;
    }
    let numbers = [player.minutes, player.goals, player.xg];
    for (offset, value) in numbers.iter().enumerate() {
        let col = (text.len() + offset) as u16;
        sheet
            .write_number(row, col, *value)
            .with_context(|| format!("write cell ({row},{col})"))?;
    }
    Ok(())
}
