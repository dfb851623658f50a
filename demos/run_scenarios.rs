//! Device Catalog Scenario Runner
//!
//! Runs every contract scenario against the public service at
//! <https://api.restful-api.dev> and prints one line per scenario.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example run_scenarios
//!
//! # Point the run at another deployment
//! DEVPROBE_BASE_URL=http://localhost:3000 cargo run --example run_scenarios
//! ```

use devprobe::{ClientConfig, scenario};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for debugging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    println!("🚀 Device Catalog Scenario Runner\n");

    let config = ClientConfig::from_env()?;
    match &config.base_url {
        Some(base_url) => println!("   Target: {}\n", base_url),
        None => println!("   Target: {}\n", devprobe::DEFAULT_BASE_URL),
    }

    let reports = scenario::run_all(&config).await;

    let mut failed = 0usize;
    for report in &reports {
        match &report.outcome {
            Ok(()) => println!("   ✅ {}", report.name),
            Err(e) => {
                failed += 1;
                println!("   ❌ {}: {}", report.name, e);
            }
        }
    }

    println!("\n📊 {} passed, {} failed", reports.len() - failed, failed);

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
