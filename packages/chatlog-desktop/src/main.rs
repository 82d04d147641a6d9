//! Chatlog Desktop - native viewer for saved chat conversations
//!
//! Lists conversations from the conversation server, filters them by title,
//! and renders the selected conversation's messages as rich text.

mod api;
mod app;
mod components;
mod i18n;
mod keyboard;
mod state;
mod theme;
mod views;

use anyhow::{Context as _, Result};
use chatlog_core::{ConfigOverrides, ThemeMode, ViewerConfig};
use clap::Parser;
use gpui::prelude::*;
use gpui::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "chatlog-desktop")]
#[command(about = "Browse saved chat conversations")]
#[command(version)]
struct Args {
    /// Conversation server base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Start in dark mode
    #[arg(long)]
    dark: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let overrides = ConfigOverrides {
        base_url: args.base_url,
        theme: args.dark.then_some(ThemeMode::Dark),
    };
    let config = ViewerConfig::load(&overrides).context("Failed to load configuration")?;

    tracing::info!("Starting Chatlog Desktop against {}", config.base_url);

    // Runtime and HTTP client are the only fatal startup failures
    let api_state = api::ApiState::new(&config)?;

    Application::new().run(move |cx: &mut App| {
        // Initialize i18n before views
        i18n::init(cx);

        state::init(&config, cx);

        // Initialize theme system (also sets global Theme)
        theme::init(config.theme, cx);

        keyboard::init(cx);

        cx.set_global(api_state);

        let opened = cx.open_window(
            WindowOptions {
                titlebar: Some(TitlebarOptions {
                    title: Some("Chatlog".into()),
                    appears_transparent: true,
                    ..Default::default()
                }),
                window_bounds: Some(WindowBounds::Windowed(Bounds {
                    origin: point(px(100.0), px(100.0)),
                    size: size(px(1100.0), px(760.0)),
                })),
                ..Default::default()
            },
            |window, cx| cx.new(|cx| app::AppRoot::new(window, cx)),
        );

        match opened {
            Ok(_) => tracing::info!("Chatlog Desktop window opened"),
            Err(e) => {
                tracing::error!("Failed to open window: {}", e);
                cx.quit();
            }
        }
    });

    Ok(())
}
