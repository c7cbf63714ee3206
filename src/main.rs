use chrono::Utc;
use clap::{Arg, ArgMatches, Command};
use log::LevelFilter;
use phishguard::monitor::{self, ThreatFilter, ThreatMonitor};
use phishguard::report::{self, ReportData, ReportFormat};
use phishguard::{
    fixtures, Category, CategoryFilter, Classifier, ClassificationResult, Config, IndicatorStore,
};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::Ordering;

#[tokio::main]
async fn main() {
    let matches = Command::new("phishguard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Anti-phishing dashboard: indicator lookup, heuristic scanning and threat reports")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("phishguard.yaml"),
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
                .help("Validate the configuration and indicator database")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("scan")
                .long("scan")
                .value_name("INPUT")
                .help("Classify a URL, email address, phone number or area code")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("type")
                .short('t')
                .long("type")
                .value_name("CATEGORY")
                .help("Category of the scanned input (url, email, phone, area_code)")
                .default_value("url"),
        )
        .arg(
            Arg::new("save-report")
                .long("save-report")
                .help("Write a report for the scan result")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("database")
                .long("database")
                .help("List the phishing indicator database")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .value_name("QUERY")
                .help("Search indicator values and descriptions")
                .default_value(""),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .value_name("CATEGORY")
                .help("Restrict the database listing to one category, or 'all'")
                .default_value("all"),
        )
        .arg(
            Arg::new("threats")
                .long("threats")
                .help("Show active threat campaigns")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("filter")
                .long("filter")
                .value_name("FILTER")
                .help("Threat filter: all, active, high, critical")
                .default_value("all"),
        )
        .arg(
            Arg::new("monitor")
                .long("monitor")
                .help("Follow active threats with simulated live updates (Ctrl-C to stop)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ticks")
                .long("ticks")
                .value_name("N")
                .help("Stop the monitor after N updates")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .help("Show detection effectiveness statistics")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-reports")
                .long("list-reports")
                .help("List recent scans available for reporting")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .value_name("ID")
                .help("Generate a report for a recent scan")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .help("Report format: text (pdf), json, csv"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Directory for generated reports"),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("phishguard.yaml");

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    let store = match config.load_store() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error loading indicator database: {e:#}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        println!("🔍 Testing configuration...");
        println!();
        match &config.indicator_database {
            Some(path) => println!("Indicator database: {path}"),
            None => println!("Indicator database: built-in"),
        }
        println!("Number of indicators: {}", store.len());
        for category in Category::ALL {
            let count = store.search("", CategoryFilter::Only(category)).len();
            println!("  {} {}: {}", category.icon(), category.label(), count);
        }
        println!("Default report format: {}", config.report.default_format);
        println!("✅ Configuration validated");
        return;
    }

    let result = if let Some(input) = matches.get_one::<String>("scan") {
        run_scan(&config, store, input, &matches).await
    } else if matches.get_flag("database") {
        show_database(&store, &matches)
    } else if matches.get_flag("threats") {
        show_threats(&matches)
    } else if matches.get_flag("monitor") {
        run_monitor(&config, &matches).await
    } else if matches.get_flag("stats") {
        show_stats();
        Ok(())
    } else if matches.get_flag("list-reports") {
        list_reports();
        Ok(())
    } else if let Some(id) = matches.get_one::<String>("report") {
        generate_sample_report(&config, id, &matches).await
    } else {
        show_overview(&store);
        Ok(())
    };

    if let Err(e) = result {
        eprintln!("❌ {e:#}");
        process::exit(1);
    }
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    if std::path::Path::new(path).exists() {
        Config::from_file(path)
    } else {
        log::debug!("Configuration file '{path}' not found, using default configuration");
        Ok(Config::default())
    }
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

fn report_format(config: &Config, matches: &ArgMatches) -> anyhow::Result<ReportFormat> {
    match matches.get_one::<String>("format") {
        Some(name) => name.parse(),
        None => Ok(config.report.default_format),
    }
}

fn output_dir(config: &Config, matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<String>("output")
        .cloned()
        .unwrap_or_else(|| config.report.output_dir.clone())
        .into()
}

async fn run_scan(
    config: &Config,
    store: IndicatorStore,
    input: &str,
    matches: &ArgMatches,
) -> anyhow::Result<()> {
    let category: Category = matches
        .get_one::<String>("type")
        .map(String::as_str)
        .unwrap_or("url")
        .parse()?;

    if input.trim().is_empty() {
        anyhow::bail!("Nothing to scan: input is empty");
    }

    println!("🔍 Scanning {} '{}'...", category.label(), input.trim());
    tokio::time::sleep(config.scan_delay()).await;

    let classifier = Classifier::new(store);
    let result = classifier.classify(input, category);
    print_result(&result);

    if matches.get_flag("save-report") {
        let format = report_format(config, matches)?;
        let report = ReportData::from_result(&result);
        write_report(config, &report, format, &output_dir(config, matches)).await?;
    }
    Ok(())
}

fn print_result(result: &ClassificationResult) {
    println!();
    println!(
        "{}  (confidence: {}%)",
        result.verdict.badge(),
        result.confidence
    );
    println!("{}", result.explanation);
    if !result.indicators.is_empty() {
        println!("Detected Indicators:");
        for indicator in &result.indicators {
            println!("  • {indicator}");
        }
    }
    println!(
        "Scanned: {}",
        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

fn show_database(store: &IndicatorStore, matches: &ArgMatches) -> anyhow::Result<()> {
    let query = matches
        .get_one::<String>("search")
        .map(String::as_str)
        .unwrap_or("");
    let filter: CategoryFilter = matches
        .get_one::<String>("category")
        .map(String::as_str)
        .unwrap_or("all")
        .parse()?;

    let results = store.search(query, filter);
    println!("🗄️  Phishing Indicator Database ({} entries)", store.len());
    println!("═══════════════════════════════════════");

    if results.is_empty() {
        println!("No threats found matching your search criteria");
        return Ok(());
    }

    for record in results {
        println!(
            "{} {}  [{}]  {} reports, confidence {}%",
            record.category.icon(),
            record.value,
            record.threat_level.as_str().to_uppercase(),
            record.report_count,
            record.confidence
        );
        println!("    {}", record.description);
        println!("    Indicators: {}", record.indicators.join(", "));
        let mut seen = format!(
            "    First seen: {}  Last seen: {}",
            record.first_seen, record.last_seen
        );
        if let Some(region) = &record.region {
            seen.push_str(&format!("  Region: {region}"));
        }
        println!("{seen}");
    }
    Ok(())
}

fn show_threats(matches: &ArgMatches) -> anyhow::Result<()> {
    let filter = threat_filter(matches)?;
    let threats = fixtures::active_threats();
    print_threats(&monitor::filter_threats(&threats, filter));
    Ok(())
}

fn threat_filter(matches: &ArgMatches) -> anyhow::Result<ThreatFilter> {
    matches
        .get_one::<String>("filter")
        .map(String::as_str)
        .unwrap_or("all")
        .parse()
}

fn print_threats(threats: &[&phishguard::ActiveThreat]) {
    println!("📡 Active Threats Monitor");
    println!("═══════════════════════════════════════");
    if threats.is_empty() {
        println!("No threats match the current filter");
        return;
    }
    let now = Utc::now();
    for threat in threats {
        println!("{}", monitor::render_threat(threat, now));
        println!();
    }
}

async fn run_monitor(config: &Config, matches: &ArgMatches) -> anyhow::Result<()> {
    let filter = threat_filter(matches)?;
    let max_ticks = matches.get_one::<u64>("ticks").copied();

    let mut feed = ThreatMonitor::new(
        fixtures::active_threats(),
        config.monitor_interval(),
        config.monitor.max_affected_increment,
    );

    let running = feed.running_flag();
    if let Err(e) = ctrlc::set_handler(move || {
        log::info!("Received shutdown signal, stopping monitor...");
        running.store(false, Ordering::SeqCst);
    }) {
        log::warn!("Failed to install Ctrl-C handler: {e}");
    }

    print_threats(&monitor::filter_threats(feed.threats(), filter));
    log::info!(
        "Monitoring threats every {}s",
        config.monitor_interval().as_secs()
    );

    feed.run(filter, max_ticks, |tick, view| {
        println!("── update {tick} ─────────────────────────────");
        print_threats(view);
    })
    .await;
    Ok(())
}

fn show_stats() {
    let stats = fixtures::detection_stats();
    println!("📊 Detection Effectiveness");
    println!("═══════════════════════════════════════");
    for line in stats.summary_lines(Utc::now()) {
        println!("{line}");
    }
}

fn list_reports() {
    println!("📄 Recent Scans Available for Reporting");
    println!("═══════════════════════════════════════");
    for report in fixtures::sample_reports() {
        println!(
            "  [{}] {:<32} {:<6} {:<11} {}% confidence  {}",
            report.id,
            report.target,
            report.kind,
            report.threat_level.as_str().to_uppercase(),
            report.confidence,
            report.generated_at.format("%Y-%m-%d")
        );
    }
}

async fn generate_sample_report(
    config: &Config,
    id: &str,
    matches: &ArgMatches,
) -> anyhow::Result<()> {
    let report = fixtures::sample_reports()
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| anyhow::anyhow!("No recent scan with id '{id}' (see --list-reports)"))?;
    let format = report_format(config, matches)?;
    write_report(config, &report, format, &output_dir(config, matches)).await
}

async fn write_report(
    config: &Config,
    data: &ReportData,
    format: ReportFormat,
    dir: &std::path::Path,
) -> anyhow::Result<()> {
    println!("📝 Generating {} report for {}...", format, data.target);
    tokio::time::sleep(config.report_delay()).await;

    let path = report::write_report(data, format, dir, Utc::now())?;
    println!("✅ Report written to: {}", path.display());
    Ok(())
}

fn show_overview(store: &IndicatorStore) {
    println!("🛡️  PhishGuard v{}", env!("CARGO_PKG_VERSION"));
    println!("═══════════════════════════════════════");
    show_stats();
    println!();

    let threats = fixtures::active_threats();
    let active = monitor::filter_threats(&threats, ThreatFilter::Active).len();
    let critical = monitor::filter_threats(&threats, ThreatFilter::Critical).len();
    println!("📡 Threat campaigns: {} ({} active, {} critical)", threats.len(), active, critical);
    println!("🗄️  Known indicators: {}", store.len());
    println!();
    println!("Use --scan, --database, --threats, --monitor or --report (see --help).");
}
