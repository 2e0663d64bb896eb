//! Basic logger usage example
//!
//! Demonstrates building loggers from configuration, output path merging and
//! the global registry.
//!
//! Run with: cargo run --example basic_usage

use rust_logs::prelude::*;
use rust_logs::{global, info, warn};

fn main() -> Result<()> {
    println!("=== Rust Logs - Basic Usage Example ===\n");

    // Encoding tokens usually come from flags or environment
    let encoding = std::env::var("LOG_FORMAT").unwrap_or_default();
    let format = validate_format(&encoding)?;
    println!("1. Using '{}' encoding", format);

    let logger = default_logger_config()
        .with_format(format)
        .with_level(LogLevel::Debug)
        .build()?;

    logger.debug("This is a debug message");
    logger.info_with_context(
        "Server started",
        LogContext::new().with_field("port", 2379).with_field("tls", false),
    );
    logger.named("raft").warn("Leader changed");
    logger.error("Error records carry a stack trace");

    println!("\n2. Macros and the sugared logger:");
    info!(logger, "Processing {} items", 100);
    let sugar = logger.sugar().with([("member", "m1")]);
    sugar.infow("Applied entries", [("count", FieldValue::from(12))]);

    println!("\n3. Merging outputs, /dev/null wins:");
    let merged = default_logger_config()
        .with_output_paths(vec![
            "stderr".to_string(),
            "stderr".to_string(),
            "/dev/null".to_string(),
        ])
        .merge_output_paths();
    println!("   outputPaths = {:?}", merged.output_paths);
    merged.build()?.error("Nobody sees this");

    println!("\n4. Global logger:");
    init_global_logger(LogLevel::Info)?;
    warn!(global::logger(), "Installed globally");
    global::sugared().infof(format_args!("Reached from anywhere"));

    println!("\n5. Sampling a hot loop:");
    let sampled = default_logger_config()
        .with_output_paths(vec!["/dev/null".to_string()])
        .build()?;
    for _ in 0..1000 {
        sampled.info("cache miss");
    }
    if let Some(metrics) = sampled.sampler_metrics() {
        println!("   kept {:.1}% of records", metrics.effective_sample_rate() * 100.0);
    }
    println!("   sampled out {:.1}%", sampled.metrics().sampled_out_rate());

    println!("\n6. Invalid encoding is rejected:");
    if let Err(e) = validate_format("xml") {
        println!("   {}", e);
    }

    logger.sync()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
