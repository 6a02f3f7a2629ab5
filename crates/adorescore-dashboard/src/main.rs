use adorescore_dashboard::cli::{Cli, Commands};
use adorescore_dashboard::{
    run_server, summarize, AnalysisClient, DashboardState, Dataset, Filter, FilterQuery,
};
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start {
            port,
            address,
            dataset,
            api_url,
            verbose,
        } => {
            init_logging(verbose);

            let dataset = Dataset::load(&dataset)?;
            let client = AnalysisClient::new(api_url)?;
            let addr: SocketAddr = format!("{}:{}", address, port).parse()?;

            println!();
            println!("  Adorescore dashboard");
            println!("  Reviews:      {}", dataset.len());
            println!("  Analysis API: {}", client.url());
            println!();
            println!("  Serving http://{}/api", addr);
            println!();

            run_server(DashboardState::new(dataset, client), addr).await?;
        }

        Commands::Summary {
            dataset,
            start,
            end,
            sentiments,
            emotions,
            min,
            max,
            search,
            themes,
            subtopics,
            json,
        } => {
            init_logging(false);

            let dataset = Dataset::load(&dataset)?;
            let filter = Filter::from(FilterQuery {
                start,
                end,
                sentiments,
                emotions,
                min_adorescore: min,
                max_adorescore: max,
                search,
                themes,
                subtopics,
            });
            let records = filter.apply(&dataset);
            let summary = summarize(&records);

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            println!("Reviews:    {}", summary.total);
            println!("Adorescore: {}", summary.gauge);
            if let Some(top) = &summary.top_emotion {
                println!("Top emotion: {} ({:.2}%)", top.value, top.percentage);
            }

            println!();
            println!("Sentiment:");
            for share in &summary.sentiments {
                println!("  {:<12} {:>6} {:>7.2}%", share.value, share.count, share.percentage);
            }

            println!();
            println!("Emotions:");
            for count in &summary.emotions {
                println!("  {:<12} {:>6}", count.value, count.count);
            }

            println!();
            println!("Themes:");
            for count in &summary.themes {
                println!("  {:<32} {:>6}", count.value, count.count);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "adorescore_dashboard=debug,tower_http=debug"
    } else {
        "adorescore_dashboard=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
