use std::path::PathBuf;

use crate::cli::commands::RatesArgs;
use crate::config;
use crate::cost::RateTable;
use crate::errors::SweepError;

pub async fn handle_rates(args: RatesArgs) -> Result<(), SweepError> {
    let rates = if let Some(config_path) = &args.config {
        let file_config = config::parse_config(&PathBuf::from(config_path)).await?;
        file_config
            .rates
            .map(|overrides| overrides.apply(RateTable::default()))
            .unwrap_or_default()
    } else {
        RateTable::default()
    };

    println!("{}", serde_json::to_string_pretty(&rates)?);
    Ok(())
}
