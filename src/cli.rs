// Copyright 2025 Fernando Borretti
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

use std::process::exit;

use clap::Parser;
use tokio::spawn;

use vocadrill_core::error::Fallible;
use vocadrill_core::types::word::UserId;
use vocadrill_core::types::word::WordId;

use crate::cmd::drill::server::ServerConfig;
use crate::cmd::drill::server::start_server;
use crate::cmd::favorite::set_favorite;
use crate::cmd::next::print_next;
use crate::cmd::reset::reset_records;
use crate::cmd::sets::print_sets;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_due;
use crate::cmd::stats::print_progress;
use crate::cmd::stats::print_stats;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill words through a web interface.
    Drill {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The user to drill as. By default, the user from vocadrill.toml, or 1.
        #[arg(long)]
        user: Option<UserId>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// Print the word that would be drilled next.
    Next {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long)]
        user: Option<UserId>,
    },
    /// Print every learning record.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long)]
        user: Option<UserId>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Print a summary of progress through the word list.
    Progress {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long)]
        user: Option<UserId>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Print the words due for review, most urgent first.
    Due {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long)]
        user: Option<UserId>,
    },
    /// Mark a studied word as a favorite.
    Favorite {
        /// The id of the word in the word list.
        word_id: WordId,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long)]
        user: Option<UserId>,
        /// Remove the mark instead.
        #[arg(long)]
        off: bool,
    },
    /// List the word list in sets of twenty.
    Sets {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long)]
        user: Option<UserId>,
        /// Show the words of this set, counting from one.
        #[arg(long)]
        set: Option<usize>,
    },
    /// Delete every learning record of the user.
    Reset {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long)]
        user: Option<UserId>,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            directory,
            user,
            host,
            port,
            open_browser,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            if let Err(e) = open::that(format!("http://{browser_host}:{port}/")) {
                                log::warn!("Failed to open the browser: {e}");
                            }
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                directory,
                user_id: user,
                host,
                port,
            };
            start_server(config).await
        }
        Command::Next { directory, user } => print_next(directory, user),
        Command::Stats {
            directory,
            user,
            format,
        } => print_stats(directory, user, format),
        Command::Progress {
            directory,
            user,
            format,
        } => print_progress(directory, user, format),
        Command::Due { directory, user } => print_due(directory, user),
        Command::Favorite {
            word_id,
            directory,
            user,
            off,
        } => set_favorite(directory, user, word_id, !off),
        Command::Sets {
            directory,
            user,
            set,
        } => print_sets(directory, user, set),
        Command::Reset {
            directory,
            user,
            yes,
        } => reset_records(directory, user, yes),
    }
}
