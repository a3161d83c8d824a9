use clap::ValueEnum;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ColumnConstraint, Table, Width};

use crate::stats::UserStat;

const HEADER: [&str; 4] = ["id", "userName", "comments", "commits"];
const COLUMN_WIDTHS: [u16; 4] = [10, 15, 10, 10];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width table
    #[default]
    Table,
    /// JSON array of per-user stats
    Json,
}

pub fn render(stats: &[UserStat], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(stats)),
        OutputFormat::Json => Ok(render_json(stats)?),
    }
}

pub fn render_table(stats: &[UserStat]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(HEADER)
        .set_constraints(
            COLUMN_WIDTHS.map(|w| ColumnConstraint::Absolute(Width::Fixed(w))),
        );

    for stat in stats {
        table.add_row(vec![
            stat.id.to_string(),
            stat.user_name.clone(),
            stat.comments_count.to_string(),
            stat.commits_count.to_string(),
        ]);
    }

    table.to_string()
}

pub fn render_json(stats: &[UserStat]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(stats)
}
