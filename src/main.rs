// main.rs - CLI entry point

use pairlink::prelude::*;
use std::time::Instant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();

    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    let mut config = None;
    if let Some(config_path) = args.config.clone() {
        let (merged, loaded) = args
            .with_config_file(&config_path)
            .map_err(|e| e.to_string())?;
        args = merged;
        config = Some(loaded);
    }

    let region_overrides = config.as_ref().and_then(|c| c.regions.as_ref());
    let validation = validate_args(&args, region_overrides).map_err(|e| e.to_string())?;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Using {} threads", threads);
    }

    println!("{}", pairlink::get_info());
    let start = Instant::now();

    // Comparison table
    println!("📊 Loading comparisons: {}", validation.comparisons.display());
    let comparisons = load_comparisons(&validation.comparisons).map_err(|e| e.to_string())?;
    println!("✅ {} comparison rows", comparisons.len());

    // Metadata tables
    println!("📋 Loading metadata: {}", validation.meta.display());
    let primary = load_metadata(&validation.meta, MetadataRole::Primary).map_err(|e| e.to_string())?;
    let secondary = match &validation.meta2 {
        Some(path) => {
            println!("📋 Loading secondary metadata: {}", path.display());
            Some(load_metadata(path, MetadataRole::Secondary).map_err(|e| e.to_string())?)
        }
        None => None,
    };

    let normalizer = MetadataNormalizer::new(&validation.regions);
    let metadata = normalizer
        .normalize_all(&primary, secondary.as_deref())
        .map_err(|e| e.to_string())?;
    println!("✅ {} metadata records normalized", metadata.len());

    // Join and classify
    println!("🔍 Joining comparisons with metadata and classifying...");
    let classification = classify_comparisons(&comparisons, &metadata);

    if !classification.dropped.is_empty() {
        println!(
            "⚠️  {} comparisons dropped: genome without metadata",
            classification.dropped.len()
        );
    }

    println!("\n=== LINKAGE SUMMARY ===");
    let counts = classification.verdict_counts();
    for verdict in CaseComparison::ALL {
        println!("  {:<36} {}", verdict.as_str(), counts.get(&verdict).copied().unwrap_or(0));
    }
    println!("  {:<36} {}", "Total labeled pairs", classification.rows.len());

    match &validation.output {
        Some(output) => {
            write_labeled_table(output, validation.format, &classification.rows)
                .map_err(|e| e.to_string())?;
        }
        None => println!("\n🧪 Dry run: no output written"),
    }

    println!("⏱️  Completed in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
