//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "weft",
    bin_name = "weft",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Compose templates with include and extends directives",
    long_about = "Weft follows {{include \"x\"}} and {{extends \"x\"}} directives \
                  through a tree of template files, composes every referenced \
                  file into one set and renders it with Handlebars.",
    after_help = "EXAMPLES:\n\
        \x20 weft render page.html --base-dir views --var title=Home\n\
        \x20 weft units page.html --base-dir views --format json\n\
        \x20 weft scan views/page.html\n\
        \x20 weft completions bash > /usr/share/bash-completion/completions/weft",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compose a template and render it to stdout.
    #[command(
        visible_alias = "r",
        about = "Compose and render a template",
        after_help = "EXAMPLES:\n\
            \x20 weft render page.html --base-dir views\n\
            \x20 weft render page.html --data page.json --var title=Home\n\
            \x20 weft render page.html --no-cache"
    )]
    Render(RenderArgs),

    /// List the units a composition pulls in.
    #[command(
        visible_alias = "ls",
        about = "List the units of a composed set",
        after_help = "EXAMPLES:\n\
            \x20 weft units page.html --base-dir views\n\
            \x20 weft units page.html --format json"
    )]
    Units(UnitsArgs),

    /// Show the directives found in a single file.
    #[command(
        about = "List directives in a template file",
        after_help = "EXAMPLES:\n\
            \x20 weft scan views/page.html\n\
            \x20 weft scan views/page.html --format json"
    )]
    Scan(ScanArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 weft completions bash > ~/.local/share/bash-completion/completions/weft\n\
            \x20 weft completions zsh  > ~/.zfunc/_weft\n\
            \x20 weft completions fish > ~/.config/fish/completions/weft.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Weft configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 weft config get templates.base_dir\n\
            \x20 weft config list\n\
            \x20 weft config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where templates are read from; overrides `templates.base_dir`.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Directory prefixed to every template name.
    #[arg(
        short = 'b',
        long = "base-dir",
        value_name = "DIR",
        help = "Directory templates are read from"
    )]
    pub base_dir: Option<String>,
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// One entry per line.
    #[default]
    Plain,
    /// JSON document.
    Json,
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `weft render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template to compose, relative to the base directory.
    #[arg(value_name = "ROOT", help = "Root template name")]
    pub root: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// JSON file used as the render context.
    #[arg(
        short = 'd',
        long = "data",
        value_name = "FILE",
        help = "JSON file with render data"
    )]
    pub data: Option<PathBuf>,

    /// Extra `KEY=VALUE` pairs; they override keys from `--data`.
    #[arg(
        long = "var",
        value_name = "KEY=VALUE",
        value_parser = parse_var,
        help = "Set a render variable (repeatable)"
    )]
    pub vars: Vec<(String, String)>,

    /// Skip the template cache for this run.
    #[arg(long = "no-cache", help = "Disable the template cache")]
    pub no_cache: bool,
}

fn parse_var(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_owned(), value.to_owned())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

// ── units ─────────────────────────────────────────────────────────────────────

/// Arguments for `weft units`.
#[derive(Debug, Args)]
pub struct UnitsArgs {
    /// Template to compose, relative to the base directory.
    #[arg(value_name = "ROOT", help = "Root template name")]
    pub root: String,

    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long = "format", value_enum, default_value = "plain", help = "Output format")]
    pub format: ListFormat,
}

// ── scan ──────────────────────────────────────────────────────────────────────

/// Arguments for `weft scan`.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// File to scan. Read as given, not relative to the base directory.
    #[arg(value_name = "FILE", help = "Template file to scan")]
    pub file: PathBuf,

    #[arg(long = "format", value_enum, default_value = "plain", help = "Output format")]
    pub format: ListFormat,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `weft completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `weft config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `templates.base_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_render_command() {
        let cli = Cli::parse_from([
            "weft",
            "render",
            "page.html",
            "--base-dir",
            "views",
            "--var",
            "title=Home",
            "--var",
            "empty=",
            "--no-cache",
        ]);
        let Commands::Render(args) = cli.command else {
            panic!("expected Render command");
        };
        assert_eq!(args.root, "page.html");
        assert_eq!(args.source.base_dir.as_deref(), Some("views"));
        assert_eq!(
            args.vars,
            vec![
                ("title".to_owned(), "Home".to_owned()),
                ("empty".to_owned(), String::new()),
            ]
        );
        assert!(args.no_cache);
    }

    #[test]
    fn var_value_may_contain_equals() {
        assert_eq!(
            parse_var("q=a=b").unwrap(),
            ("q".to_owned(), "a=b".to_owned())
        );
    }

    #[test]
    fn var_without_equals_is_rejected() {
        assert!(parse_var("title").is_err());
        assert!(parse_var("=x").is_err());
        assert!(Cli::try_parse_from(["weft", "render", "p", "--var", "nope"]).is_err());
    }

    #[test]
    fn units_alias_and_format() {
        let cli = Cli::parse_from(["weft", "ls", "page", "--format", "json"]);
        let Commands::Units(args) = cli.command else {
            panic!("expected Units command");
        };
        assert_eq!(args.format, ListFormat::Json);
    }

    #[test]
    fn scan_defaults_to_plain() {
        let cli = Cli::parse_from(["weft", "scan", "views/page.html"]);
        let Commands::Scan(args) = cli.command else {
            panic!("expected Scan command");
        };
        assert_eq!(args.format, ListFormat::Plain);
        assert_eq!(args.file, PathBuf::from("views/page.html"));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["weft", "--quiet", "--verbose", "units", "x"]);
        assert!(result.is_err());
    }
}
