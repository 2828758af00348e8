pub mod toml_config;

pub use toml_config::{LogFormat, WidgetConfig};

#[cfg(feature = "cli")]
mod cli {
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_url, Validate};
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "homepage")]
    #[command(about = "Drive the homepage widgets from a terminal")]
    pub struct CliConfig {
        #[arg(long, short, help = "TOML config file")]
        pub config: Option<PathBuf>,

        #[arg(long, help = "Local storage file, overrides [storage] path")]
        pub store: Option<PathBuf>,

        #[arg(long, help = "Generative endpoint, overrides [chat] endpoint")]
        pub endpoint: Option<String>,

        #[arg(long, short, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Ask the chat assistant a question about a page.
        Ask {
            question: String,
            #[arg(long, help = "Text file used as the tutorial context")]
            context: Option<PathBuf>,
        },
        /// Store the API key used by `ask`.
        SetKey { key: String },
        /// Forget the stored API key.
        ClearKey,
        /// Show or flip the stored theme preference.
        Theme {
            #[command(subcommand)]
            action: ThemeAction,
        },
        /// Render chat-style markdown to HTML (file or stdin).
        Render { file: Option<PathBuf> },
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
    pub enum ThemeAction {
        Show,
        Toggle,
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(endpoint) = &self.endpoint {
                validate_url("endpoint", endpoint)?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_ask_with_overrides() {
            let cli = CliConfig::parse_from([
                "homepage",
                "--endpoint",
                "http://localhost:9000/gen",
                "-v",
                "ask",
                "What is cargo?",
                "--context",
                "page.txt",
            ]);
            assert!(cli.verbose);
            assert!(cli.validate().is_ok());
            match cli.command {
                Command::Ask { question, context } => {
                    assert_eq!(question, "What is cargo?");
                    assert_eq!(context, Some(PathBuf::from("page.txt")));
                }
                other => panic!("unexpected command: {:?}", other),
            }
        }

        #[test]
        fn test_parse_theme_toggle_and_bad_endpoint() {
            let cli = CliConfig::parse_from(["homepage", "--endpoint", "ftp://x", "theme", "toggle"]);
            assert!(matches!(
                cli.command,
                Command::Theme {
                    action: ThemeAction::Toggle
                }
            ));
            assert!(cli.validate().is_err());
        }
    }
}

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, ThemeAction};
