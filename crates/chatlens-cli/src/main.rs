//! chatlens - interactive chat with query expansion and topic tagging.
//!
//! Thin terminal front end over the session layer: reads one line at a
//! time, so a new turn is never submitted while the prior turn's pipeline
//! run is still in flight.

mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chatlens_core::{AnnotationBackend, ResponseBackend};
use chatlens_inference::{AnnotationPipeline, InferenceConfig, OllamaResponder, RemoteAnnotator};
use chatlens_session::{load_templates, Exchange, Session, Template};

/// Default template file, relative to the working directory.
const DEFAULT_TEMPLATES_PATH: &str = "templates.jsonl";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chatlens=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = InferenceConfig::from_env();

    // Resolve the annotation service handle once; it is reused for every
    // turn of every session in this process. A handle that cannot be
    // resolved leaves annotation on the hard-error path rather than
    // aborting startup.
    let remote = RemoteAnnotator::resolve(&config.annotation)
        .map(|annotator| Arc::new(annotator) as Arc<dyn AnnotationBackend>);
    if let Some(backend) = &remote {
        if !backend.health_check().await.unwrap_or(false) {
            warn!(
                service = backend.service_name(),
                "Annotation service is not answering health checks"
            );
        }
    }
    let pipeline = AnnotationPipeline::new(remote);

    let responder = Arc::new(OllamaResponder::with_config(&config.generation));
    info!(model = responder.model_name(), "Response backend ready");

    let templates = read_templates();
    let mut session = Session::new(pipeline, responder);

    println!("chatlens: query expansion & topic tagging");
    println!("Commands: /templates, /use <n>, /accept, /dismiss, /reset, /quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if let Some(suggestion) = session.conversation().suggestion() {
            println!("(suggested: {} | /accept or /dismiss)", suggestion);
        }
        print!("> ");
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "/quit" | "/exit" => break,
            "/reset" => {
                session.reset();
                println!("(conversation cleared)");
            }
            "/templates" => print_templates(&templates),
            "/accept" => match session.accept_suggestion().await {
                Some(exchange) => print_exchange(&exchange),
                None => println!("(no pending suggestion)"),
            },
            "/dismiss" => {
                session.dismiss_suggestion();
                println!("(suggestion dismissed)");
            }
            _ if input.starts_with("/use ") => {
                match parse_template_index(input, templates.len()) {
                    Some(index) => {
                        session.load_template(templates[index].clone());
                        println!("(template {} loaded)", index + 1);
                    }
                    None => println!("(usage: /use <1..{}>)", templates.len()),
                }
            }
            _ => {
                let exchange = session.submit(input).await;
                print_exchange(&exchange);
            }
        }
    }

    Ok(())
}

/// Load templates from `CHATLENS_TEMPLATES` or the default path. A
/// missing or unreadable file leaves the template list empty rather than
/// failing startup.
fn read_templates() -> Vec<Template> {
    let path = std::env::var("CHATLENS_TEMPLATES")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_TEMPLATES_PATH));

    match load_templates(&path) {
        Ok(templates) => {
            info!(path = %path.display(), count = templates.len(), "Templates loaded");
            templates
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "No templates available");
            Vec::new()
        }
    }
}

fn print_templates(templates: &[Template]) {
    if templates.is_empty() {
        println!("(no templates found)");
        return;
    }
    for (index, template) in templates.iter().enumerate() {
        let preview = template
            .messages
            .first()
            .map(|message| message.content.as_str())
            .unwrap_or("(empty)");
        println!("{}. {}", index + 1, preview);
    }
}

fn parse_template_index(input: &str, count: usize) -> Option<usize> {
    let number: usize = input.strip_prefix("/use ")?.trim().parse().ok()?;
    (1..=count).contains(&number).then(|| number - 1)
}

fn print_exchange(exchange: &Exchange) {
    for banner in render::annotation_banners(&exchange.annotation) {
        println!("{}", banner);
    }
    if let Some(tag) = render::topic_tag(&exchange.annotation) {
        println!("{}", tag);
    }
    if let Some(panel) = render::expanded_query_panel(&exchange.annotation) {
        println!("{}", panel);
    }
    println!("{}", exchange.reply);
}
