//! Roster documents rendered with printpdf's built-in Helvetica.
//!
//! Layout is a single column on A4: a title block followed by a
//! `# / Name / Position / Jersey` table. Tables that run past the bottom
//! margin continue on a new page with the header repeated.

use chrono::Utc;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ClientError, ClientResult};
use crate::models::{Player, Team, parse_hex_color};

pub const GLOBAL_FILE_NAME: &str = "global_players.pdf";
pub const LEAGUE_FILE_NAME: &str = "league_rosters.pdf";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const ROW_HEIGHT: f32 = 7.0;
const NAME_MAX_CHARS: usize = 38;
const COLUMNS: [(f32, &str); 4] = [
    (20.0, "#"),
    (32.0, "Name"),
    (115.0, "Position"),
    (170.0, "Jersey"),
];

type Row = [String; 4];

struct PdfBuilder {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PdfBuilder {
    fn new(title: &str) -> ClientResult<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ClientError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ClientError::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn text_at(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        if self.y - size * 0.5 < MARGIN {
            self.new_page();
        }
        self.text_at(text, size, MARGIN, bold);
        self.y -= size * 0.45 + 3.0;
    }

    fn colored_line(&mut self, text: &str, size: f32, color: Option<&str>) {
        let rgb = color.and_then(parse_hex_color);
        if let Some((r, g, b)) = rgb {
            self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
        }
        self.line(text, size, true);
        if rgb.is_some() {
            self.layer
                .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        }
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn table_header(&mut self) {
        for (x, label) in COLUMNS {
            self.text_at(label, 10.0, x, true);
        }
        self.y -= ROW_HEIGHT;
    }

    fn table(&mut self, rows: &[Row]) {
        if rows.is_empty() {
            self.line("No players", 10.0, false);
            return;
        }
        if rows_fitting(self.y) < 2 {
            self.new_page();
        }
        self.table_header();
        for row in rows {
            if self.y - ROW_HEIGHT < MARGIN {
                self.new_page();
                self.table_header();
            }
            for ((x, _), cell) in COLUMNS.iter().zip(row.iter()) {
                self.text_at(cell, 10.0, *x, false);
            }
            self.y -= ROW_HEIGHT;
        }
    }

    fn generated_line(&mut self) {
        let stamp = Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
        self.line(&format!("Generated {}", stamp), 9.0, false);
    }

    fn finish(self) -> ClientResult<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| ClientError::Pdf(e.to_string()))
    }
}

/// Table rows (header included) that fit between `y` and the bottom margin.
fn rows_fitting(y: f32) -> usize {
    if y <= MARGIN {
        return 0;
    }
    ((y - MARGIN) / ROW_HEIGHT).floor() as usize
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

fn roster_rows(players: &[Player]) -> Vec<Row> {
    players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            [
                (i + 1).to_string(),
                truncate(&p.player_name, NAME_MAX_CHARS),
                p.position.clone(),
                p.jersey_label(),
            ]
        })
        .collect()
}

fn team_section(builder: &mut PdfBuilder, team: &Team, players: &[Player]) {
    builder.colored_line(&team.team_name, 16.0, team.team_color.as_deref());
    if let Some(description) = team.description.as_deref().filter(|d| !d.trim().is_empty()) {
        builder.line(&truncate(description, 90), 10.0, false);
    }
    builder.line(&format!("Players: {}", players.len()), 10.0, false);
    builder.gap(2.0);
    builder.table(&roster_rows(players));
}

pub fn export_team_roster(team: &Team, players: &[Player]) -> ClientResult<Vec<u8>> {
    let mut builder = PdfBuilder::new(&format!("{} Roster", team.team_name))?;
    builder.line("Team Roster", 20.0, true);
    builder.generated_line();
    builder.gap(4.0);
    team_section(&mut builder, team, players);
    builder.finish()
}

pub fn export_global_players(players: &[Player]) -> ClientResult<Vec<u8>> {
    let mut builder = PdfBuilder::new("Global Players")?;
    builder.line("Global Players", 20.0, true);
    builder.generated_line();
    builder.line(
        &format!("{} players without a team", players.len()),
        10.0,
        false,
    );
    builder.gap(4.0);
    builder.table(&roster_rows(players));
    builder.finish()
}

/// One section per team; every team after the first starts on a new page.
pub fn export_league(rosters: &[(Team, Vec<Player>)]) -> ClientResult<Vec<u8>> {
    let mut builder = PdfBuilder::new("League Rosters")?;
    builder.line("League Rosters", 20.0, true);
    builder.generated_line();
    let total: usize = rosters.iter().map(|(_, players)| players.len()).sum();
    builder.line(
        &format!("{} teams, {} players", rosters.len(), total),
        10.0,
        false,
    );
    builder.gap(4.0);

    for (index, (team, players)) in rosters.iter().enumerate() {
        if index > 0 {
            builder.new_page();
        }
        team_section(&mut builder, team, players);
    }
    builder.finish()
}

/// `<team>_roster.pdf` with anything outside `[A-Za-z0-9_-]` replaced by `_`.
pub fn team_file_name(team_name: &str) -> String {
    let stem: String = team_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "team_roster.pdf".to_string()
    } else {
        format!("{}_roster.pdf", stem)
    }
}

pub fn write_pdf(path: &Path, bytes: &[u8]) -> ClientResult<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path.to_path_buf())
}
