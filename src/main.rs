use clap::Parser;
use rivals_reader::{
    ui, Cli, OutputFormatter, OutputMode, ReaderError, Result, RivalsReader, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    ui::init_logger(cli.verbosity_level(), cli.quiet);

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let reader = match RivalsReader::from_cli(&cli) {
        Ok(reader) => reader,
        Err(e) => {
            print_startup_error(&e);
            return exit_code(&e);
        }
    };

    match execute(&cli, &reader) {
        Ok(()) => 0,
        Err(e) => {
            reader.handle_error(&e);
            exit_code(&e)
        }
    }
}

fn execute(cli: &Cli, reader: &RivalsReader) -> Result<()> {
    let formatter = reader.output_formatter();

    let root = reader.resolve_root()?;
    let items = reader.list_workshop_items(&root)?;

    if cli.list {
        formatter.print_item_list(&items);
    } else {
        let report = reader.query(&root, &items)?;
        formatter.print_report(&report, &reader.config().table);
    }

    if let Some(ref export_path) = cli.export {
        let summary = reader.export_values(&items, export_path, cli.force)?;

        // The table run already reported unreadable items.
        if cli.list {
            for warning in &summary.warnings {
                formatter.warning(warning);
            }
        }

        formatter.success(&format!(
            "Wrote {} '{}' values to {}",
            summary.values_written,
            summary.field,
            summary.path.display()
        ));
    }

    Ok(())
}

fn exit_code(error: &ReaderError) -> i32 {
    match error {
        ReaderError::Config { .. } => 2,
        ReaderError::PathNotFound { .. } | ReaderError::InvalidPath { .. } => 3,
        ReaderError::InvalidFolder { .. } => 4,
        ReaderError::FileUnreadable { .. } => 5,
        ReaderError::MisalignedField { .. } | ReaderError::FieldLengthMismatch { .. } => 6,
        ReaderError::OutputExists { .. } => 8,
        ReaderError::Cancelled => 130,
        ReaderError::Io(_) => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "rivals-reader.toml".to_string());

    match RivalsReader::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  rivals-reader --config {}", config_path);
            println!("\nEdit the file to set your workshop folder, fields and columns.");
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &ReaderError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli::try_parse_from([
            "rivals-reader",
            "--generate-config",
            "--config",
            config_path.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(handle_generate_config(&cli), 0);
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[workshop]"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&ReaderError::Cancelled), 130);
        assert_eq!(
            exit_code(&ReaderError::PathNotFound {
                path: "x".to_string()
            }),
            3
        );
        assert_eq!(
            exit_code(&ReaderError::MisalignedField {
                item: "A".to_string(),
                field: "url".to_string(),
                matches: 0,
            }),
            6
        );
        assert_eq!(
            exit_code(&ReaderError::Config {
                message: "bad".to_string()
            }),
            2
        );
    }

    #[test]
    fn test_execute_list_and_export() {
        let root = TempDir::new().unwrap();
        let item = root.path().join("A");
        fs::create_dir(&item).unwrap();
        fs::write(item.join("config.ini"), "name=\"Foo\"\n").unwrap();

        let out_dir = TempDir::new().unwrap();
        let out_file = out_dir.path().join("names.txt");

        let cli = Cli::try_parse_from([
            "rivals-reader",
            "--root",
            root.path().to_str().unwrap(),
            "--list",
            "--export",
            out_file.to_str().unwrap(),
            "--output-format",
            "plain",
            "--no-input",
            "--quiet",
        ])
        .unwrap();

        let reader = RivalsReader::from_cli(&cli).unwrap();
        execute(&cli, &reader).unwrap();
        assert_eq!(fs::read_to_string(&out_file).unwrap(), "Foo\n");
    }
}
