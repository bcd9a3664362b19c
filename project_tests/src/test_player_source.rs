//! # Player Source Live Data Test
//!
//! Connects to the configured signage API via lib_common to retrieve and
//! display the current fleet, then diffs it against the local snapshot.
//! Requires `API_TOKEN` (and optionally `API_BASE_URL`, `STATUS_FILE`) in the
//! environment or a `.env` file.

use lib_common::configs::config_env::MonitorConfig;
use lib_common::monitor::source::{FourYouSeeSource, PlayerSource};
use lib_common::players::differ::diff_players;
use lib_common::players::store::StatusStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = MonitorConfig::from_env()?;
    let source = FourYouSeeSource::new(&config.api_base_url, &config.api_token)?;

    println!("[*] Requesting live data from {} ...", config.api_base_url);

    match source.fetch_players().await {
        Ok(players) => {
            println!("\n[SUCCESS] {} player(s) received:", players.len());
            println!("-----------------------------------------------");
            println!("{}", serde_json::to_string_pretty(&players)?);
            println!("-----------------------------------------------");

            let store = StatusStore::new(&config.status_file);
            let changes = diff_players(&players, &store.load());
            println!(
                "[INFO] {} change(s) against snapshot {}",
                changes.len(),
                config.status_file.display()
            );
            for change in &changes {
                println!(
                    "    [{}] {}: {} -> {}",
                    change.id, change.name, change.previous, change.current
                );
            }
        }
        Err(e) => {
            eprintln!("\n[ERROR] Player fetch failed:");
            eprintln!(">>> {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
