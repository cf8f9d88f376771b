pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod locate;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{
    AlignmentPolicy, CliOverrides, ColumnConfig, Config, QueryConfig, TableConfig, WorkshopConfig,
};
pub use error::{ReaderError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    annotate_type, parse_line, read_values, Aggregator, ConfigExtractor, ItemConfig, KeyData,
    QueryReport, Row, ValueExporter,
};
pub use locate::{default_candidates, validate_root, RootLocator};
pub use scanner::{WorkshopItem, WorkshopScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::{Path, PathBuf};

/// Main library interface: one configured reader per invocation.
pub struct RivalsReader {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    allow_prompt: bool,
}

impl RivalsReader {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(output_mode == OutputMode::Human && !quiet);

        Self {
            config,
            output_formatter,
            progress_manager,
            allow_prompt: true,
        }
    }

    /// Create a RivalsReader instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbose, cli_args.quiet)
            .with_prompt(!cli_args.no_input))
    }

    pub fn with_prompt(mut self, allow: bool) -> Self {
        self.allow_prompt = allow;
        self
    }

    /// Resolve the workshop folder from the configuration, the default locations or the user
    pub fn resolve_root(&self) -> Result<PathBuf> {
        let locator = RootLocator::new(&self.config.workshop).with_prompt(self.allow_prompt);
        let root = locator.resolve(self.config.workshop.root.as_deref())?;

        self.output_formatter
            .info(&format!("Using workshop folder: {}", root.display()));
        Ok(root)
    }

    /// List the workshop items under `root`; an empty folder only warns
    pub fn list_workshop_items(&self, root: &Path) -> Result<Vec<WorkshopItem>> {
        self.output_formatter.start_operation("Listing workshop items");

        let scanner = WorkshopScanner::new(&self.config.workshop)?;
        let (items, stats) = scanner.scan_with_statistics(root)?;
        self.output_formatter.debug(&stats.display_summary());

        if items.is_empty() {
            self.output_formatter.warning(&format!(
                "No workshop items found in {}; subscribe in Steam or pass another --root",
                root.display()
            ));
        }

        Ok(items)
    }

    /// Read the configured fields from every item and build the rows
    pub fn query(&self, root: &Path, items: &[WorkshopItem]) -> Result<QueryReport> {
        self.output_formatter.start_operation("Reading config files");

        let fields = &self.config.query.fields;
        let aggregator = Aggregator::new(self.extractor(), self.config.query.alignment);

        let pb = self.progress_manager.create_item_progress(items.len() as u64);
        let outcome = aggregator.get_key_data(items, fields, |item| {
            ui::progress::update_item_progress(&pb, &item.id)
        });
        ui::progress::finish_item_progress(&pb);
        let outcome = outcome?;

        let mut report = QueryReport::new(root.to_path_buf(), fields.clone(), items.len());
        report.rows = outcome.key_data.to_rows()?;
        report.items_skipped = outcome.items_skipped;
        report.warnings = outcome.warnings;

        Ok(report)
    }

    /// Full workflow: locate, enumerate, query
    pub fn run_query(&self) -> Result<QueryReport> {
        let root = self.resolve_root()?;
        let items = self.list_workshop_items(&root)?;
        self.query(&root, &items)
    }

    /// Write every value of the export field to `path`, one per line
    pub fn export_values<P: AsRef<Path>>(
        &self,
        items: &[WorkshopItem],
        path: P,
        force: bool,
    ) -> Result<ExportSummary> {
        let field = &self.config.query.export_field;
        let aggregator = Aggregator::new(self.extractor(), self.config.query.alignment);
        let (values, warnings) = aggregator.collect_values(items, field);

        let path = ValueExporter::new()
            .with_force_overwrite(force)
            .write_values(&values, path)?;

        Ok(ExportSummary {
            path,
            field: field.clone(),
            values_written: values.len(),
            warnings,
        })
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &ReaderError) {
        self.output_formatter.print_user_friendly_error(error);
    }

    fn extractor(&self) -> ConfigExtractor {
        ConfigExtractor::new(self.config.workshop.config_file.clone())
    }
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub field: String,
    pub values_written: usize,
    pub warnings: Vec<String>,
}

/// Read `fields` from every item under `root` with default settings
pub fn read_workshop<P: AsRef<Path>>(root: P, fields: &[&str]) -> Result<Vec<Row>> {
    let mut config = Config::default();
    config.workshop.root = Some(root.as_ref().to_path_buf());
    config.query.fields = fields.iter().map(|f| f.to_string()).collect();
    config.validate()?;

    let reader = RivalsReader::new(config, OutputMode::Plain, 0, true).with_prompt(false);
    Ok(reader.run_query()?.rows)
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
