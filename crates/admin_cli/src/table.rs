use std::io::{self, Write};

use backoffice::{Grid, GridRow, Rgb};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

const GAP: &str = "  ";

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{cell}{}", " ".repeat(width.saturating_sub(len)))
}

/// Writes the grid as aligned text columns. `colors` tints each row.
pub fn print<R: GridRow>(grid: &Grid<R>, colors: Option<&[Rgb]>) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if grid.is_empty() {
        writeln!(out, "(no records)")?;
        return Ok(());
    }

    let header = grid.header();
    let rows = grid.cell_rows();
    let mut widths: Vec<usize> = header.iter().map(|title| title.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join(GAP)
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", line(header.iter().map(|t| t.to_string()).collect()))?;
    let rule = widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1);
    writeln!(out, "{}", "-".repeat(rule))?;

    for (index, row) in rows.into_iter().enumerate() {
        let text = line(row);
        match colors.and_then(|colors| colors.get(index)) {
            Some(&Rgb { r, g, b }) => queue!(
                out,
                SetForegroundColor(Color::Rgb { r, g, b }),
                Print(text),
                ResetColor,
                Print("\n")
            )?,
            None => writeln!(out, "{text}")?,
        }
    }
    writeln!(out, "{} record(s)", grid.len())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_by_characters() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("é", 2), "é ");
        assert_eq!(pad("long", 2), "long");
    }
}
