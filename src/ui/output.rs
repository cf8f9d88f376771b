use crate::config::TableConfig;
use crate::error::{ReaderError, UserFriendlyError};
use crate::extractor::QueryReport;
use crate::scanner::WorkshopItem;
use crate::ui::table::{TableColumn, TableRenderer};
use console::{style, Emoji, Term};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => eprintln!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => eprintln!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => eprintln!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!("  {}", style(message).dim());
                    } else {
                        eprintln!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => eprintln!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        eprintln!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => eprintln!("STARTING: {}", operation),
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &ReaderError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    eprintln!(
                        "{}",
                        serde_json::json!({
                            "type": "suggestion",
                            "message": suggestion
                        })
                    );
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    // Results
    pub fn print_report(&self, report: &QueryReport, table: &TableConfig) {
        match self.mode {
            OutputMode::Human => {
                print!("{}", self.render_table(report, table));
                for warning in &report.warnings {
                    self.warning(warning);
                }
                self.debug(&report.display_summary());
            }
            OutputMode::Json => {
                let json_output = serde_json::to_string_pretty(&report.to_json())
                    .unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => {
                print!("{}", render_plain(report, table));
                for warning in &report.warnings {
                    self.warning(warning);
                }
            }
        }
    }

    pub fn render_table(&self, report: &QueryReport, table: &TableConfig) -> String {
        let columns = TableColumn::for_fields(&report.fields, table, &report.rows);
        TableRenderer::new(self.use_colors)
            .with_header(table.show_header)
            .render(&columns, &report.rows)
    }

    pub fn print_item_list(&self, items: &[WorkshopItem]) {
        match self.mode {
            OutputMode::Json => {
                let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&ids).unwrap_or_else(|_| "[]".to_string())
                );
            }
            _ => {
                for item in items {
                    println!("{}", item.id);
                }
            }
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (CHECKMARK, style(message).green().bold()),
                MessageType::Error => (CROSS, style(message).red().bold()),
                MessageType::Warning => (WARNING, style(message).yellow().bold()),
                MessageType::Info => (INFO, style(message).cyan()),
            };
            eprintln!("{}{}", emoji, styled);
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };
            eprintln!("{} {}", prefix, message);
        }
    }

    // Status messages go to stderr so stdout holds only the result document.
    fn print_json_message(&self, level: &str, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({
                "type": "message",
                "level": level,
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

/// Tab separated header and rows, without styling.
fn render_plain(report: &QueryReport, table: &TableConfig) -> String {
    let mut out = String::new();

    if table.show_header {
        let headers: Vec<String> = report.fields.iter().map(|f| table.header_for(f)).collect();
        out.push_str(&headers.join("\t"));
        out.push('\n');
    }

    for row in &report.rows {
        out.push_str(&row.values.join("\t"));
        out.push('\n');
    }

    out
}
