use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use url::Url;

use content_client::{GenerativeClient, GenerativeConfig};
use portal_core::{router, PortalController, SessionPhase};
use shared::view::View;
use storage::SettingsStore;

mod config;

#[derive(Parser, Debug)]
struct Args {
    /// Search the generated dashboard content and print the hits.
    #[arg(long)]
    query: Option<String>,
    /// Ask the policy assistant a question and print its answer.
    #[arg(long)]
    ask: Option<String>,
    /// Open this view after login (e.g. "team", "tasks").
    #[arg(long)]
    view: Option<View>,
    /// Print the full dashboard bundle as JSON instead of the summary.
    #[arg(long)]
    dump: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = config::load_settings();

    let api_base = Url::parse(&settings.api_base)
        .with_context(|| format!("invalid api base url '{}'", settings.api_base))?;
    let provider = GenerativeClient::new(GenerativeConfig {
        api_base,
        model: settings.model.clone(),
        api_key: settings.api_key.clone(),
    });
    let store = SettingsStore::new(&settings.database_url).await?;

    let mut controller = PortalController::new(Arc::new(provider), store).await?;
    println!("Hello, {}", controller.settings().name);

    controller.login();
    controller.submit_credential("portal-session").await;
    match controller.phase() {
        SessionPhase::Ready => {}
        SessionPhase::Error { message } => {
            anyhow::bail!("login failed: {message}");
        }
        phase => anyhow::bail!("unexpected session phase after login: {phase:?}"),
    }

    if args.dump {
        let bundle = controller.bundle().context("no bundle after login")?;
        println!("{}", serde_json::to_string_pretty(bundle)?);
    } else {
        print_summary(&controller);
    }

    if let Some(view) = args.view {
        controller.navigate(view).await;
        println!(
            "\nOpened {}",
            router::page_for(controller.active_view()).title()
        );
        if view == View::Team {
            match (controller.team_directory(), controller.team_error()) {
                (Some(members), _) => {
                    for member in members {
                        println!("  {} — {} ({:?})", member.name, member.role, member.department);
                    }
                }
                (None, Some(err)) => println!("  team directory unavailable: {err}"),
                (None, None) => {}
            }
        }
    }

    if let Some(query) = args.query {
        controller.search(&query).await;
        match (controller.search_result(), controller.search_error()) {
            (Some(result), _) => {
                println!("\nSearch '{query}': {} hits", result.total_hits());
                for thread in &result.forum_threads {
                    println!("  forum: {}", thread.title);
                }
                for doc in &result.documents {
                    println!("  document: {}", doc.title);
                }
                for announcement in &result.announcements {
                    println!("  announcement: {}", announcement.title);
                }
                for email in &result.emails {
                    println!("  email: {}", email.subject);
                }
            }
            (None, Some(err)) => println!("\nSearch '{query}' failed: {err}"),
            (None, None) => {}
        }
    }

    if let Some(question) = args.ask {
        controller.ask_policy_question(&question).await;
        if let Some(reply) = controller.chat_transcript().last() {
            println!("\nAssistant: {}", reply.text);
        }
    }

    Ok(())
}

fn print_summary(controller: &PortalController) {
    let Some(bundle) = controller.bundle() else {
        return;
    };
    println!("Dashboard ready:");
    println!("  {} announcements", bundle.announcements.len());
    println!("  {} documents", bundle.documents.len());
    println!("  {} emails", bundle.emails.len());
    println!("  {} holiday requests", bundle.holiday_requests.len());
    println!("  {} suggestions", bundle.suggestions.len());
    println!("  {} forum threads", bundle.forum_threads.len());
    println!("  {} policy documents", bundle.policy_documents.len());
    println!("  {} tasks", bundle.tasks.len());
    println!("  {} calendar events", bundle.calendar_events.len());
    for announcement in &bundle.announcements {
        println!("  * {} ({})", announcement.title, announcement.date);
    }
}
