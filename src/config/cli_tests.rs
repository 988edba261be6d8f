//! Tests for CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

use super::cli::{Cli, Command};

mod curl {
    use super::*;

    #[test]
    fn parse_minimal_args() {
        let cli = Cli::parse_from_iter(["blocks", "curl", "https://foo.tld/bar"]);

        let args = cli.curl().unwrap();
        assert_eq!(args.url, "https://foo.tld/bar");
        assert!(args.method.is_none());
        assert!(args.headers.is_empty());
        assert!(args.data.is_none());
        assert!(!args.no_status_check);
        assert!(!args.include);
    }

    #[test]
    fn parse_request_options() {
        let cli = Cli::parse_from_iter([
            "blocks",
            "curl",
            "https://foo.tld/items",
            "--method",
            "POST",
            "--header",
            "X-Api-Key=secret",
            "-H",
            "Content-Type: application/json",
            "--data",
            r#"{"title":"milk"}"#,
            "--accept",
            "json",
        ]);

        let args = cli.curl().unwrap();
        assert_eq!(args.method.as_deref(), Some("POST"));
        assert_eq!(
            args.headers,
            vec!["X-Api-Key=secret", "Content-Type: application/json"]
        );
        assert_eq!(args.data.as_deref(), Some(r#"{"title":"milk"}"#));
        assert_eq!(args.accept.as_deref(), Some("json"));
    }

    #[test]
    fn parse_short_flags() {
        let cli = Cli::parse_from_iter([
            "blocks",
            "curl",
            "-X",
            "DELETE",
            "-d",
            "x",
            "-i",
            "https://foo.tld/items/1",
        ]);

        let args = cli.curl().unwrap();
        assert_eq!(args.method.as_deref(), Some("DELETE"));
        assert_eq!(args.data.as_deref(), Some("x"));
        assert!(args.include);
    }

    #[test]
    fn parse_pipeline_options() {
        let cli = Cli::parse_from_iter([
            "blocks",
            "curl",
            "https://foo.tld/bar",
            "--retry-max",
            "5",
            "--retry-delay-ms",
            "250",
            "--no-status-check",
        ]);

        let args = cli.curl().unwrap();
        assert_eq!(args.retry_max, Some(5));
        assert_eq!(args.retry_delay_ms, Some(250));
        assert!(args.no_status_check);
    }

    #[test]
    fn url_is_required() {
        assert!(Cli::try_parse_from(["blocks", "curl"]).is_err());
    }

    #[test]
    fn non_numeric_retry_max_is_rejected() {
        let result =
            Cli::try_parse_from(["blocks", "curl", "https://foo.tld", "--retry-max", "many"]);

        assert!(result.is_err());
    }
}

mod global_options {
    use super::*;

    #[test]
    fn config_and_verbose_before_subcommand() {
        let cli = Cli::parse_from_iter([
            "blocks",
            "-v",
            "--config",
            "/etc/blocks.toml",
            "curl",
            "https://foo.tld",
        ]);

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/blocks.toml")));
    }

    #[test]
    fn config_and_verbose_after_subcommand() {
        let cli = Cli::parse_from_iter(["blocks", "curl", "https://foo.tld", "-c", "a.toml", "-v"]);

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("a.toml")));
    }

    #[test]
    fn defaults_are_off() {
        let cli = Cli::parse_from_iter(["blocks", "curl", "https://foo.tld"]);

        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }
}

mod init {
    use super::*;

    #[test]
    fn default_output() {
        let cli = Cli::parse_from_iter(["blocks", "init"]);

        assert!(cli.is_init());
        assert!(cli.curl().is_none());
        assert!(matches!(
            cli.command,
            Command::Init { ref output } if output == &PathBuf::from("blocks.toml")
        ));
    }

    #[test]
    fn custom_output() {
        let cli = Cli::parse_from_iter(["blocks", "init", "-o", "conf/custom.toml"]);

        assert!(matches!(
            cli.command,
            Command::Init { ref output } if output == &PathBuf::from("conf/custom.toml")
        ));
    }

    #[test]
    fn curl_is_not_init() {
        let cli = Cli::parse_from_iter(["blocks", "curl", "https://foo.tld"]);

        assert!(!cli.is_init());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["blocks"]).is_err());
    }
}
