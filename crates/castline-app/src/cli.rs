use clap::Parser;

/// castline — share your screen into a real-time media session.
#[derive(Parser, Debug)]
#[command(name = "castline", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Subscribe to our own stream as well.
    #[arg(long)]
    pub subscribe_to_self: bool,

    /// Display surface to capture.
    #[arg(long, default_value = "primary-display")]
    pub surface: String,

    /// Simulated remote participants already in the session.
    #[arg(long, default_value_t = 1)]
    pub remote_streams: usize,

    /// Leave the session after this many seconds (0 = until Ctrl-C).
    #[arg(long, default_value_t = 0)]
    pub run_for: u64,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["castline"]);
        assert_eq!(args.surface, "primary-display");
        assert_eq!(args.remote_streams, 1);
        assert_eq!(args.run_for, 0);
        assert!(!args.subscribe_to_self);
        assert!(args.config.is_none());
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from([
            "castline",
            "--config",
            "/tmp/c.toml",
            "--subscribe-to-self",
            "--remote-streams",
            "3",
            "--run-for",
            "10",
        ]);
        assert_eq!(args.config.as_deref(), Some("/tmp/c.toml"));
        assert!(args.subscribe_to_self);
        assert_eq!(args.remote_streams, 3);
        assert_eq!(args.run_for, 10);
    }
}
