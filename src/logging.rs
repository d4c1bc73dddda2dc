use std::collections::HashMap;
use std::io::Write;
use log::{debug, info, LevelFilter};
use serde::{Deserialize, Serialize};
use env_logger::{Builder, Target, WriteStyle};

/// Available logging subsystems in wikirelated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoggingSubsystem {
    /// Main application logging
    #[serde(rename = "main")]
    Main,
    /// Configuration loading and parsing
    #[serde(rename = "config")]
    Config,
    /// HTTP transport and the JSON gateway
    #[serde(rename = "http")]
    Http,
    /// Wikipedia and Wikidata lookups
    #[serde(rename = "wiki")]
    Wiki,
    /// Wikimedia page view counts
    #[serde(rename = "pageviews")]
    PageViews,
    /// Spotify related-artist requests
    #[serde(rename = "spotify")]
    Spotify,
    /// Classification, expansion and ranking
    #[serde(rename = "related")]
    Related,
    /// Third-party dependencies
    #[serde(rename = "deps")]
    Dependencies,
}

impl LoggingSubsystem {
    /// Get the module prefix for this subsystem
    pub fn module_prefix(&self) -> &'static str {
        match self {
            LoggingSubsystem::Main => "wikirelated",
            LoggingSubsystem::Config => "wikirelated::config",
            LoggingSubsystem::Http => "wikirelated::helpers::http_client,wikirelated::helpers::gateway",
            LoggingSubsystem::Wiki => "wikirelated::helpers::wikipedia,wikirelated::helpers::wikidata,wikirelated::helpers::associated_acts",
            LoggingSubsystem::PageViews => "wikirelated::helpers::pageviews",
            LoggingSubsystem::Spotify => "wikirelated::helpers::spotify",
            LoggingSubsystem::Related => "wikirelated::related",
            LoggingSubsystem::Dependencies => "ureq,rustls",
        }
    }

    /// Get all available subsystems
    pub fn all() -> Vec<LoggingSubsystem> {
        vec![
            LoggingSubsystem::Main,
            LoggingSubsystem::Config,
            LoggingSubsystem::Http,
            LoggingSubsystem::Wiki,
            LoggingSubsystem::PageViews,
            LoggingSubsystem::Spotify,
            LoggingSubsystem::Related,
            LoggingSubsystem::Dependencies,
        ]
    }

    /// Parse a subsystem name as used in configuration files
    pub fn from_name(name: &str) -> Option<LoggingSubsystem> {
        match name.to_lowercase().as_str() {
            "main" => Some(LoggingSubsystem::Main),
            "config" => Some(LoggingSubsystem::Config),
            "http" => Some(LoggingSubsystem::Http),
            "wiki" | "wikipedia" | "wikidata" => Some(LoggingSubsystem::Wiki),
            "pageviews" => Some(LoggingSubsystem::PageViews),
            "spotify" => Some(LoggingSubsystem::Spotify),
            "related" => Some(LoggingSubsystem::Related),
            "deps" | "dependencies" => Some(LoggingSubsystem::Dependencies),
            _ => None,
        }
    }
}

/// Logging configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Target for log output (stdout, stderr)
    #[serde(default = "default_target")]
    pub target: String,

    /// Whether to include timestamps
    #[serde(default = "default_timestamps")]
    pub timestamps: bool,

    /// Whether to use colored output
    #[serde(default = "default_colors")]
    pub colors: bool,

    /// Subsystem-specific log levels
    #[serde(default)]
    pub subsystems: HashMap<String, String>,

    /// Whether to include module paths in log output
    #[serde(default = "default_module_path")]
    pub include_module_path: bool,

    /// Whether to include line numbers in log output
    #[serde(default = "default_line_numbers")]
    pub include_line_numbers: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

// stdout carries the suggestion report
fn default_target() -> String {
    "stderr".to_string()
}

fn default_timestamps() -> bool {
    true
}

fn default_colors() -> bool {
    true
}

fn default_module_path() -> bool {
    false
}

fn default_line_numbers() -> bool {
    false
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            target: default_target(),
            timestamps: default_timestamps(),
            colors: default_colors(),
            subsystems: HashMap::new(),
            include_module_path: default_module_path(),
            include_line_numbers: default_line_numbers(),
        }
    }
}

impl LoggingConfig {
    /// Convert string log level to LevelFilter
    fn parse_log_level(level: &str) -> LevelFilter {
        match level.to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => {
                eprintln!("Warning: Unknown log level '{}', defaulting to 'info'", level);
                LevelFilter::Info
            }
        }
    }

    /// Expand the subsystem table into (module prefix, level) pairs
    fn module_filters(&self) -> Vec<(String, String)> {
        let mut filters = Vec::new();
        let mut names: Vec<&String> = self.subsystems.keys().collect();
        names.sort();

        for name in names {
            let level = &self.subsystems[name];
            match LoggingSubsystem::from_name(name) {
                Some(subsystem) => {
                    for prefix in subsystem.module_prefix().split(',') {
                        filters.push((prefix.trim().to_string(), level.clone()));
                    }
                }
                // Allow custom module specifications
                None => filters.push((name.clone(), level.clone())),
            }
        }

        filters
    }

    /// Build the environment filter string for env_logger
    pub fn build_filter_string(&self) -> String {
        let mut filter_parts = vec![self.level.clone()];
        for (prefix, level) in self.module_filters() {
            filter_parts.push(format!("{}={}", prefix, level));
        }
        filter_parts.join(",")
    }

    /// Initialize the logger with this configuration
    pub fn initialize_logger(&self) -> Result<(), String> {
        let filter_string = self.build_filter_string();
        debug!("Using logging filter: {}", filter_string);

        let mut builder = Builder::new();

        builder.filter(None, Self::parse_log_level(&self.level));
        for (prefix, level) in self.module_filters() {
            builder.filter(Some(&prefix), Self::parse_log_level(&level));
        }

        // RUST_LOG wins over the file
        builder.parse_env("RUST_LOG");

        let write_style = if self.colors {
            WriteStyle::Auto
        } else {
            WriteStyle::Never
        };
        builder.write_style(write_style);

        match self.target.to_lowercase().as_str() {
            "stdout" => {
                builder.target(Target::Stdout);
            }
            "stderr" => {
                builder.target(Target::Stderr);
            }
            _ => {
                return Err(format!("Unknown logging target: {}", self.target));
            }
        }

        let include_module_path = self.include_module_path;
        let include_line_numbers = self.include_line_numbers;
        let timestamps = self.timestamps;

        builder.format(move |buf, record| {
            let mut output = String::new();

            if timestamps {
                output.push_str(&format!("[{}] ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")));
            }

            output.push_str(&format!("[{}] ", record.level()));

            if include_module_path {
                if let Some(module) = record.module_path() {
                    output.push_str(&format!("[{}] ", module));
                }
            }

            if include_line_numbers {
                if let (Some(file), Some(line)) = (record.file(), record.line()) {
                    output.push_str(&format!("[{}:{}] ", file, line));
                }
            }

            output.push_str(&format!("{}", record.args()));

            writeln!(buf, "{}", output)
        });

        builder.try_init()
            .map_err(|e| format!("Failed to initialize logger: {}", e))?;

        info!("Logging initialized with filter: {}", filter_string);
        Ok(())
    }
}

/// Initialize logging from a configuration and the CLI verbosity flags
pub fn initialize_logging(config: &LoggingConfig, debug_mode: bool, verbose_mode: bool) -> Result<(), String> {
    let mut config = config.clone();

    if debug_mode {
        config.level = "debug".to_string();
    } else if verbose_mode {
        config.level = "info".to_string();
    }

    config.initialize_logger()?;

    if debug_mode {
        info!("Debug mode enabled via command line");
    } else if verbose_mode {
        info!("Verbose mode enabled via command line");
    }
    Ok(())
}
