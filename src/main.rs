use chrono::Utc;
use clap::{Arg, ArgMatches, Command};
use log::LevelFilter;
use phishlens::config::Config;
use phishlens::detection::build_manual_scan;
use phishlens::model::{DetectionRule, RiskLevel};
use phishlens::report;
use phishlens::rules::{repository_for, validate_rules};
use phishlens::statistics::{recent, summarize};
use phishlens::store::{seed_if_empty, JsonFileScanStore, ScanQuery, ScanStore};
use std::io::Read;
use std::process;

fn main() {
    let matches = Command::new("phishlens")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Explainable rule-based phishing analysis for email content")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("phishlens.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the configuration and rule set")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("analyze")
                .long("analyze")
                .value_name("FILE")
                .help("Analyze email text from FILE ('-' reads stdin) and store the result")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("scans")
                .long("scans")
                .help("List scan history, newest first")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("risk")
                .long("risk")
                .value_name("LEVEL")
                .help("Only list scans with this risk level (high, medium, safe)")
                .value_parser(["high", "medium", "safe"])
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .value_name("TEXT")
                .help("Only list scans whose subject or sender contains TEXT")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("show")
                .long("show")
                .value_name("ID")
                .help("Show one scan with highlighted evidence")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .help("Show counts by risk level and the most recent scans")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("clear")
                .long("clear")
                .help("Remove all stored scans (demo data is reseeded if enabled)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print machine-readable JSON instead of text")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        init_logging(LevelFilter::Info);
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("phishlens.yaml");

    let config = match Config::load_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(1);
        }
    };

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        config.log_level().unwrap_or(LevelFilter::Info)
    };
    init_logging(log_level);

    if let Err(e) = run(&matches, &config) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn run(matches: &ArgMatches, config: &Config) -> anyhow::Result<()> {
    let repository = repository_for(config.rules_path.as_deref());
    let rules = repository.load_rules()?;
    let json = matches.get_flag("json");

    if matches.get_flag("test-config") {
        return test_config(config, &rules, &repository.source());
    }

    let mut store = JsonFileScanStore::open(&config.store_path)?;
    if config.seed_demo_data {
        seed_if_empty(&mut store, &rules, Utc::now())?;
    }

    if let Some(input) = matches.get_one::<String>("analyze") {
        return analyze_input(&mut store, &rules, input, json);
    }

    if let Some(id) = matches.get_one::<String>("show") {
        return show_scan(&store, id, json);
    }

    if matches.get_flag("clear") {
        store.clear()?;
        println!("Scan history cleared.");
        if config.seed_demo_data {
            let seeded = seed_if_empty(&mut store, &rules, Utc::now())?;
            println!("Reloaded {seeded} demonstration scans.");
        }
        return Ok(());
    }

    if matches.get_flag("scans") {
        let query = ScanQuery {
            risk_level: matches
                .get_one::<String>("risk")
                .map(|level| level.parse::<RiskLevel>())
                .transpose()?,
            search: matches.get_one::<String>("search").cloned(),
        };
        return list_scans(&store, &query, json);
    }

    // Dashboard view is the default.
    show_stats(&store, config.recent_limit, json)
}

fn test_config(config: &Config, rules: &[DetectionRule], source: &str) -> anyhow::Result<()> {
    validate_rules(rules)?;
    println!("Configuration OK");
    println!("  Rule source: {source}");
    println!("  Rules loaded: {}", rules.len());
    for level in [RiskLevel::High, RiskLevel::Medium, RiskLevel::Safe] {
        let count = rules.iter().filter(|r| r.risk_level == level).count();
        println!("    {level}: {count}");
    }
    println!("  Scan store: {}", config.store_path);
    println!("  Demo data: {}", if config.seed_demo_data { "enabled" } else { "disabled" });
    Ok(())
}

fn read_input(input: &str) -> anyhow::Result<String> {
    use anyhow::Context;

    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read email text from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read email file: {input}"))
    }
}

fn analyze_input(
    store: &mut dyn ScanStore,
    rules: &[DetectionRule],
    input: &str,
    json: bool,
) -> anyhow::Result<()> {
    let text = read_input(input)?;
    if text.trim().is_empty() {
        anyhow::bail!("Nothing to analyze: input is empty");
    }

    let record = build_manual_scan(&text, rules, Utc::now());
    log::info!(
        "Analyzed {} as {} ({}% confidence)",
        record.id,
        record.risk_level(),
        record.verdict.confidence
    );
    store.append(record.clone())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", record.subject);
        println!();
        print!("{}", report::render_verdict(&record.verdict));
        println!();
        println!("Saved as {} (view with --show {})", record.id, record.id);
    }
    Ok(())
}

fn show_scan(store: &dyn ScanStore, id: &str, json: bool) -> anyhow::Result<()> {
    let Some(record) = store.get(id)? else {
        anyhow::bail!("Scan not found: {id}");
    };

    if json {
        let spans = phishlens::highlight::reconcile(&record.body, &record.verdict.dangerous_phrases);
        let output = serde_json::json!({ "scan": record, "spans": spans });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", report::render_record(&record));
    }
    Ok(())
}

fn list_scans(store: &dyn ScanStore, query: &ScanQuery, json: bool) -> anyhow::Result<()> {
    let records = store.list()?;
    let matching = query.apply(&records);

    if json {
        println!("{}", serde_json::to_string_pretty(&matching)?);
        return Ok(());
    }

    if matching.is_empty() {
        println!("No scans match.");
    }
    for record in matching {
        println!("{}", report::render_listing_line(record));
    }
    Ok(())
}

fn show_stats(store: &dyn ScanStore, recent_limit: usize, json: bool) -> anyhow::Result<()> {
    let records = store.list()?;
    let stats = summarize(&records);
    let latest = recent(&records, recent_limit);

    if json {
        let output = serde_json::json!({
            "stats": stats,
            "safeRate": stats.safe_rate(),
            "recent": latest,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", report::render_stats(&stats, latest));
    }
    Ok(())
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e}");
            process::exit(1);
        }
    }
}
