use fd_rate_engine::{
    engine::RateEngine,
    models::ServedBy,
    query::{is_senior, parse_user_query},
    snapshot::consultant_context,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let json_output = args.iter().any(|a| a == "--json");
    args.retain(|a| a != "--json");
    let text = if args.is_empty() {
        "fd of 50000 for 1 year".to_string()
    } else {
        args.join(" ")
    };

    let query = parse_user_query(&text);
    let senior = query.age.map(is_senior);

    info!(
        query = %query.raw,
        product = %query.product_type,
        ?senior,
        tenure_days = ?query.tenure_days,
        "Parsed query"
    );

    let engine = RateEngine::from_env()?;

    match engine
        .fetch_rates(query.amount, senior, query.tenure_days, None)
        .await
    {
        Ok(report) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!("\n=== FD RATE REPORT ===");
            match &report.served_by {
                ServedBy::Primary => println!("Source: {}", report.source_name),
                ServedBy::Fallback { primary_failure } => println!(
                    "Source: {} (fallback; primary failed: {})",
                    report.source_name, primary_failure
                ),
            }

            if report.is_empty() {
                println!("No matching rates found.");
            } else {
                println!("{:<28} {:<22} {:>8}", "Provider", "Rate", "Best %");
                for offer in &report.offers {
                    println!(
                        "{:<28} {:<22} {:>8}",
                        offer.provider,
                        offer.interest_rate,
                        offer
                            .rate_max
                            .map(|r| format!("{:.2}", r))
                            .unwrap_or_else(|| "-".to_string()),
                    );
                }
            }

            println!(
                "\nSnapshot written to {}",
                engine.config().csv_path.display()
            );
            println!("\n--- Consultant context ---");
            println!("{}", consultant_context(&query, &report)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("Rate lookup failed: {}", e);
            Err(Box::new(e) as Box<dyn std::error::Error>)
        }
    }
}
