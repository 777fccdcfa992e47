use charset_table_rs::{CharsetTable, Config, EditableTable};
use std::env;
use std::fs;

/// Builds a charset_table from an editable equivalence table.
///
/// Usage: cargo run --example main <table.tsv> [config.toml]
///
/// Set `RUST_LOG=debug` to see the pipeline stages.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <table.tsv> [config.toml]", args[0]);
        std::process::exit(1);
    }

    let text = fs::read_to_string(&args[1]).unwrap_or_else(|err| {
        eprintln!("Cannot read \"{}\": {}", args[1], err);
        std::process::exit(1);
    });

    let config = match args.get(2) {
        Some(path) => {
            let toml = fs::read_to_string(path).unwrap_or_else(|err| {
                eprintln!("Cannot read \"{}\": {}", path, err);
                std::process::exit(1);
            });
            Config::from_toml_str(&toml).unwrap_or_else(|err| {
                eprintln!("{}: {}", path, err);
                std::process::exit(1);
            })
        }
        None => Config::default(),
    };

    let table = EditableTable::parse(&text).unwrap_or_else(|err| {
        eprintln!("{}: {}", args[1], err);
        std::process::exit(1);
    });

    // Classification is left to whoever produced the table
    let charset = CharsetTable::build(table.classes(), &config, |_| false).unwrap_or_else(|err| {
        eprintln!("{}", err);
        std::process::exit(1);
    });

    match charset.render() {
        Ok(rendered) => print!("{}", rendered),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }

    // Compute statistics
    let stats = charset.stats();

    eprintln!("\n=== Statistics ===");
    eprintln!("Equivalence classes: {}", table.len());
    eprintln!("Index tokens: {}", stats.index_tokens);
    eprintln!("Fold tokens: {} ({} ranges)", stats.fold_tokens, stats.fold_ranges);
    eprintln!("Codepoints indexed: {}", stats.codepoints_indexed);
    eprintln!("Codepoints folded: {}", stats.codepoints_folded);
    eprintln!("Tokens per codepoint: {:.2}%", stats.compaction_ratio());
}
