use anyhow::Context;
use clap::{value_parser, Arg, Command};
use dtk_app::{spawn_slip_subscriber, Session};
use dtk_domain::{DocumentContent, Office};
use dtk_engine::event_channel;
use dtk_services::{scan_channel, ExtractiveSummarizer, TextSlipGenerator};
use dtk_store::{JsonFileStore, KeyValueStore, MemoryStore};
use dtk_view::ViewTab;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Command::new("dtk")
        .version(dtk_app::VERSION)
        .about("DocuTrack document routing and tracking")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("demo")
                .about("Run a seeded end-to-end routing demo")
                .arg(
                    Arg::new("data-dir")
                        .long("data-dir")
                        .value_parser(value_parser!(PathBuf))
                        .help("Persist state under this directory (in-memory if omitted)"),
                ),
        );

    match cli.get_matches().subcommand() {
        Some(("demo", matches)) => {
            let store: Arc<dyn KeyValueStore> = match matches.get_one::<PathBuf>("data-dir") {
                Some(dir) => Arc::new(
                    JsonFileStore::open(dir).context("opening data directory")?,
                ),
                None => Arc::new(MemoryStore::new()),
            };
            run_demo(store).await
        }
        _ => unreachable!("subcommand required"),
    }
}

/// Walk one document through the full custody cycle and print each view.
async fn run_demo(store: Arc<dyn KeyValueStore>) -> anyhow::Result<()> {
    let (events_tx, events_rx) = event_channel();
    let slip_task = spawn_slip_subscriber(events_rx, Arc::new(TextSlipGenerator));

    let mut session = Session::bootstrap_with_events(store, Some(events_tx));

    // A clerk at FOU sends a memo to ODM.
    let clerk = match session.register("Demo Clerk", Office::Fou, "demo") {
        Ok(user) => user,
        Err(_) => session.login("Demo Clerk", "demo")?,
    };
    tracing::info!(name = %clerk.name, office = %clerk.office, "signed in");

    let mut draft = DocumentContent::titled("Quarterly fuel report");
    draft.body = "Fuel consumption fell eight percent this quarter. Detailed \
                  breakdowns per vessel follow."
        .to_string();
    match session.generate_summary(&ExtractiveSummarizer::new(), &draft).await {
        Ok(summary) => draft.summary = summary,
        Err(error) => tracing::warn!(%error, "summary generation failed"),
    }

    let doc = session.save_document(draft, Some(Office::Odm), None)?;
    println!("created {} -> {}", doc.id, doc.current_office);
    println!("summary: {}", doc.summary);

    // The admin forwards it onward to the Property Unit.
    session.logout();
    session.login(dtk_engine::SEED_ADMIN_NAME, dtk_engine::SEED_ADMIN_CREDENTIAL)?;
    let doc = session.forward(doc.id, Office::PropertyUnit)?;
    println!("forwarded to {}", doc.current_office);

    session.set_active_tab(ViewTab::Received);
    for (office, group) in session.visible_grouped() {
        println!("pending at {office}: {}", group.len());
    }

    // A Property Unit clerk receives it by scanning the slip.
    session.logout();
    session.register("Property Clerk", Office::PropertyUnit, "demo").ok();
    session.login("Property Clerk", "demo")?;

    let (feed, mut scans) = scan_channel();
    feed.push(doc.id.to_string());
    drop(feed);
    while let Some(payload) = scans.next().await {
        match session.scan_receive_payload(&payload) {
            Ok(doc) => println!("received \"{}\" at {}", doc.title, doc.current_office),
            Err(error) => println!("scan rejected: {error}"),
        }
    }

    let received = session
        .engine()
        .repository()
        .get(doc.id)
        .context("demo document vanished")?;
    println!("history:");
    for entry in &received.tracking_history {
        println!("  - {}", entry.describe());
    }

    drop(session);
    slip_task.await?;
    Ok(())
}
