use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use watchly_models::{CatalogItem, ItemDetail, MediaType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message("success", "✓".green().to_string(), msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            _ => self.print_json(&json!({ "type": "info", "message": msg.as_ref() })),
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message("warning", "⚠".yellow().to_string(), msg.as_ref());
    }

    /// Errors are shown even in quiet mode.
    pub fn error(&self, msg: impl AsRef<str>) {
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            _ => self.print_json(&json!({ "type": "error", "message": msg.as_ref() })),
        }
    }

    fn message(&self, kind: &str, marker: String, msg: &str) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", marker, msg),
            _ => self.print_json(&json!({ "type": kind, "message": msg })),
        }
    }

    /// Structured payload; ignored in human mode.
    pub fn json(&self, data: &serde_json::Value) {
        if !self.is_human() {
            self.print_json(data);
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(data).unwrap_or_default()),
            _ => println!("{}", serde_json::to_string(data).unwrap_or_default()),
        }
    }

    pub fn catalog_section(&self, heading: &str, items: &[CatalogItem]) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("{} ({})", heading.bold(), items.len());
        if items.is_empty() {
            println!("  nothing to show");
            return;
        }
        println!("{}", catalog_table(items));
    }

    pub fn detail(&self, detail: &ItemDetail) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("{}", detail.title.bold());
        for (label, value) in detail_lines(detail) {
            println!("  {:<10} {}", label.dimmed(), value);
        }
        if let Some(plot) = &detail.plot_summary {
            println!();
            println!("{}", plot);
        }
    }
}

fn media_type_label(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "movie",
        MediaType::TvSeries => "tv series",
        MediaType::Other => "other",
    }
}

pub fn catalog_table(items: &[CatalogItem]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Title", "Type"]);
    for item in items {
        table.add_row(vec![
            Cell::new(item.id),
            Cell::new(item.display_title()),
            Cell::new(media_type_label(item.media_type)),
        ]);
    }
    table
}

/// Label/value pairs for the fields that are present.
pub fn detail_lines(detail: &ItemDetail) -> Vec<(&'static str, String)> {
    let mut lines = vec![("ID", detail.id.to_string())];
    if let Some(media_type) = detail.media_type {
        lines.push(("Type", media_type_label(media_type).to_string()));
    }
    if let Some(year) = detail.year {
        lines.push(("Year", year.to_string()));
    }
    if let Some(date) = detail.release_date {
        lines.push(("Released", date.format("%Y-%m-%d").to_string()));
    }
    if let Some(runtime) = detail.runtime_label() {
        lines.push(("Runtime", runtime));
    }
    if let Some(genres) = detail.genres_label() {
        lines.push(("Genres", genres));
    }
    if let Some(rating) = detail.user_rating {
        lines.push(("Rating", format!("{:.1}/10", rating)));
    }
    if let Some(score) = detail.critic_score {
        lines.push(("Critics", score.to_string()));
    }
    if let Some(trailer) = &detail.trailer_url {
        lines.push(("Trailer", trailer.clone()));
    }
    if let Some(poster) = &detail.poster_url {
        lines.push(("Poster", poster.clone()));
    }
    lines
}
