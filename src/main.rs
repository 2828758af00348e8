use anyhow::Context;
use clap::Parser;
use homepage_widgets::config::ThemeAction;
use homepage_widgets::domain::model::API_KEY_STORAGE_KEY;
use homepage_widgets::domain::ports::KeyValueStore;
use homepage_widgets::utils::markdown::render_markdown;
use homepage_widgets::utils::{logger, validation::Validate};
use homepage_widgets::{
    CliConfig, Command, Document, Environment, FileStore, GeminiClient, Homepage, WidgetConfig,
    WidgetError,
};
use std::io::Read;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(2);
        }
    };
    logger::init_logger(config.logging.format, &config.logging.level, cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli, config).await {
        tracing::error!("❌ {:#}", e);
        match e.downcast_ref::<WidgetError>() {
            Some(widget_error) => eprintln!("❌ {}", widget_error.user_friendly_message()),
            None => eprintln!("❌ {:#}", e),
        }
        std::process::exit(1);
    }
}

fn load_config(cli: &CliConfig) -> anyhow::Result<WidgetConfig> {
    cli.validate()?;
    let mut config = WidgetConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(endpoint) = &cli.endpoint {
        config.chat.endpoint = endpoint.clone();
    }
    if let Some(store) = &cli.store {
        config.storage.path = store.display().to_string();
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: CliConfig, config: WidgetConfig) -> anyhow::Result<()> {
    let store = Arc::new(FileStore::new(&config.storage.path));
    let env = Environment {
        store: store.clone(),
        context_limit: config.chat.context_limit,
        ..Environment::default()
    };

    match cli.command {
        Command::Ask { question, context } => {
            let context = match context {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading context file {}", path.display()))?,
                None => String::new(),
            };
            let client = GeminiClient::new(config.chat.endpoint.clone());
            let mut page = Homepage::init(chat_page(&context), env);
            tracing::info!("Asking {}", client.endpoint());
            let reply = page.ask(&question, &client).await?;
            println!("{}", reply);
        }
        Command::SetKey { key } => {
            homepage_widgets::utils::validation::validate_non_empty_string("key", &key)?;
            store.set(API_KEY_STORAGE_KEY, key.trim())?;
            println!("✅ API key saved to {}", store.path().display());
        }
        Command::ClearKey => {
            store.remove(API_KEY_STORAGE_KEY)?;
            println!("✅ API key removed");
        }
        Command::Theme { action } => {
            let mut page = Homepage::init(theme_page(), env);
            if action == ThemeAction::Toggle {
                if let Some((theme, doc)) = page.theme_mut() {
                    theme.toggle(doc);
                }
            }
            let theme = page
                .theme()
                .context("theme controller not attached")?;
            let origin = if theme.stored_theme().is_some() {
                "stored"
            } else {
                "system default"
            };
            println!("{} ({})", theme.theme(), origin);
        }
        Command::Render { file } => {
            let input = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            println!("{}", render_markdown(&input));
        }
    }
    Ok(())
}

/// A page with just the chat widget and a tutorial section holding `context`.
fn chat_page(context: &str) -> Document {
    let mut doc = Document::default();
    let body = doc.body();
    let tutorial = doc.create_element(body, "section");
    doc.set_attr(tutorial, "id", "tutorial");
    doc.set_text(tutorial, context);
    for (tag, id) in [
        ("button", "chat-launcher"),
        ("div", "chat-panel"),
        ("input", "chat-input"),
        ("button", "chat-send"),
        ("div", "chat-messages"),
        ("p", "chat-status"),
    ] {
        let el = doc.create_element(body, tag);
        doc.set_attr(el, "id", id);
    }
    doc
}

fn theme_page() -> Document {
    let mut doc = Document::default();
    let body = doc.body();
    let toggle = doc.create_element(body, "button");
    doc.set_attr(toggle, "id", "theme-toggle");
    doc
}
