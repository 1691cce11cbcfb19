use conjugator_core::core::orthography;
use conjugator_core::{
    all_patterns, extract_root_letters, identify_pattern, Cell, ConjugationEngine,
    ConjugationRequest, EngineConfig, Paradigm, Tense,
};
use crossterm::{
    cursor::MoveTo,
    execute,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use std::io::{self, stdin, stdout, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "conjugator.toml";

fn main() -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let config_path = std::env::var_os("CONJUGATOR_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_PATH));
    let config = match EngineConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %config_path.display(), error = %e, "bad config, using defaults");
            EngineConfig::default()
        }
    };
    let engine = ConjugationEngine::from_file_or_new(config);

    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    print_help();

    loop {
        print!("\n{} ", ">".bold());
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let parts: Vec<&str> = input.split_whitespace().collect();

        match parts.as_slice() {
            [] => continue,
            ["exit"] | ["quit"] => break,
            ["help"] => print_help(),
            ["patterns"] => print_patterns(),
            ["identify", word] => print_identification(word),
            ["json", args @ ..] => match engine.conjugate(&request_from(args)) {
                Ok(paradigm) => match serde_json::to_string_pretty(&paradigm) {
                    Ok(json) => println!("{json}"),
                    Err(e) => println!("{}", e.to_string().red()),
                },
                Err(e) => println!("{}", e.to_string().red()),
            },
            ["save", verb_id, args @ ..] => {
                match engine.build_record(verb_id, &request_from(args)) {
                    Ok(record) => println!("cached record {}", record.verb_id.green()),
                    Err(e) => println!("{}", e.to_string().red()),
                }
            }
            ["show", verb_id] => match engine.get_record(verb_id) {
                Some(record) => match serde_json::to_string_pretty(&record) {
                    Ok(json) => println!("{json}"),
                    Err(e) => println!("{}", e.to_string().red()),
                },
                None => println!("no record {}", verb_id.yellow()),
            },
            args => match engine.conjugate(&request_from(args)) {
                Ok(paradigm) => print_paradigm(&paradigm),
                Err(e) => println!("{}", e.to_string().red()),
            },
        }
    }

    println!("\nSaving cache...");
    match engine.save_cache() {
        Ok(()) => info!(path = %engine.config().cache.snapshot_path.display(), "cache saved"),
        Err(e) => eprintln!("[ERROR] Could not save cache: {e}"),
    }
    Ok(())
}

/// `<root or verb> [pattern] [irregularity,...]`
fn request_from(args: &[&str]) -> ConjugationRequest {
    let mut request = match args.first() {
        // Three bare letters (marks aside) is a root; anything else is a verb.
        Some(word) if conjugator_core::Root::parse(word).is_ok() && !is_vocalized(word) => {
            ConjugationRequest::for_root(*word)
        }
        Some(word) => ConjugationRequest::for_surface_form(*word),
        None => ConjugationRequest::default(),
    };
    if let Some(pattern) = args.get(1) {
        request = request.with_pattern(*pattern);
    }
    if let Some(tags) = args.get(2) {
        request = request.with_irregularities(tags.split(',').filter(|t| !t.is_empty()));
    }
    request
}

fn is_vocalized(word: &str) -> bool {
    orthography::strip_marks(word) != word
}

fn print_help() {
    println!("{}", "Arabic Verb Conjugator".bold());
    println!("---------------------------------------------------------------");
    println!("  <root|verb> [form1..form10] [hollow,defective,doubled]");
    println!("  identify <verb>     pattern and root of an inflected verb");
    println!("  json <root> ...     paradigm as JSON");
    println!("  save <id> <root> ...  build, validate and cache a record");
    println!("  show <id>           cached record");
    println!("  patterns            the ten forms");
    println!("  exit                save the cache and quit");
}

fn print_patterns() {
    for info in all_patterns() {
        println!(
            "  {:<7} {:<9} {}  {}",
            info.id.as_str().cyan(),
            info.name,
            info.pattern,
            info.description.dim()
        );
    }
}

fn print_identification(word: &str) {
    let pattern = identify_pattern(word);
    match extract_root_letters(word) {
        Ok(root) => println!(
            "  {} -> {} ({})",
            word,
            pattern.as_str().cyan(),
            root.iter().collect::<String>().green()
        ),
        Err(e) => println!("  {} -> {} ({})", word, pattern.as_str().cyan(), e.to_string().red()),
    }
}

fn print_paradigm(paradigm: &Paradigm) {
    let info = paradigm.pattern.info();
    println!(
        "\n{} {}  {}",
        paradigm.root.to_string().green().bold(),
        info.name.cyan(),
        info.pattern
    );
    if !paradigm.irregularities.is_empty() {
        let tags: Vec<_> = paradigm.irregularities.iter().map(|i| i.as_str()).collect();
        println!("  irregular: {}", tags.join(", ").yellow());
    }
    for tense in Tense::ALL {
        println!("\n  {}", format!("{tense:?}").bold());
        for cell in Cell::paradigm(tense) {
            let form = paradigm.conjugations.get(cell).unwrap_or("-");
            println!(
                "    {:<8} {:<10} {:<10} {}",
                format!("{:?}", cell.person),
                format!("{:?}", cell.number),
                format!("{:?}", cell.gender),
                form
            );
        }
    }
}
