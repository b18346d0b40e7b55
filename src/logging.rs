// Copyright (c) 2025 Wherobots Dialect Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! `tracing` setup for the crate.
//!
//! Initialized once, by the first `connect()` call. An explicit
//! [`LogConfig`] wins over the `RUST_LOG` environment variable; with
//! neither, the crate logs at `warn`. Output goes to stderr unless a log
//! file is configured, e.g. `RUST_LOG=wherobots_dialect=debug ./my_app`.

use std::sync::{Mutex, OnceLock};

use tracing_subscriber::fmt::time::SystemTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Logging configuration supplied by the host application.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Log level: "OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE".
    pub level: Option<String>,
    /// Log file path. If unset, logs go to stderr.
    pub file: Option<String>,
}

/// Installs the crate's tracing subscriber. Calls after the first are
/// no-ops.
pub fn init_logging(config: &LogConfig) {
    if LOGGING_INITIALIZED.set(()).is_err() {
        return;
    }

    // A level of "OFF" disables logging entirely.
    let Some(filter) = level_filter(config.level.as_deref()) else {
        return;
    };

    let (writer, ansi) = match config.file.as_deref() {
        Some(path) => {
            let file = match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
            {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("wherobots-dialect: failed to open log file {path}: {e}");
                    return;
                }
            };
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(false)
                .with_ansi(ansi)
                .with_timer(SystemTime),
        )
        .try_init()
        .ok();
}

/// Turns a configured level into an env filter, `None` meaning logging
/// stays disabled. Without an explicit level, `RUST_LOG` applies.
fn level_filter(level: Option<&str>) -> Option<EnvFilter> {
    match level {
        Some(level) if level.eq_ignore_ascii_case("off") => None,
        Some(level) => Some(EnvFilter::new(format!(
            "wherobots_dialect={}",
            level.to_lowercase()
        ))),
        None => Some(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wherobots_dialect=warn")),
        ),
    }
}
