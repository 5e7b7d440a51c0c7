//! Command-line / environment configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_API_BASE;
use crate::category::Category;

#[derive(clap::Args, Clone, Debug)]
pub struct Config {
    /// PokeAPI base URL
    #[arg(long, env = "TYPEDEX_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Initial type filter ("all" or a type name)
    #[arg(long, short, env = "TYPEDEX_CATEGORY", default_value = "fire")]
    pub category: Category,

    /// Entries per page (minimum 1)
    #[arg(
        long,
        env = "TYPEDEX_PAGE_SIZE",
        default_value = "10",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub page_size: u64,

    /// Per-request timeout in seconds; requests are unbounded when unset
    #[arg(long, env = "TYPEDEX_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// Directory for the rolling log file
    #[arg(long, env = "TYPEDEX_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn page_size(&self) -> usize {
        self.page_size as usize
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs_next::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("typedex")
                .join("logs")
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::category::PokemonType;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["typedex"]).unwrap();
        assert_eq!(cli.config.api_base, DEFAULT_API_BASE);
        assert_eq!(cli.config.category, Category::Type(PokemonType::Fire));
        assert_eq!(cli.config.page_size(), 10);
        assert_eq!(cli.config.request_timeout(), None);
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "typedex",
            "--category",
            "all",
            "--page-size",
            "25",
            "--request-timeout-secs",
            "3",
            "--log-dir",
            "/tmp/typedex-logs",
        ])
        .unwrap();
        assert_eq!(cli.config.category, Category::All);
        assert_eq!(cli.config.page_size(), 25);
        assert_eq!(cli.config.request_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(cli.config.log_dir(), PathBuf::from("/tmp/typedex-logs"));
    }

    #[test]
    fn rejects_zero_page_size_and_unknown_type() {
        assert!(Cli::try_parse_from(["typedex", "--page-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["typedex", "--category", "shadow"]).is_err());
    }
}
