use clap::Parser;
use graffiti_archive::{cli, config, dataset, error, fetcher, map, scanner};

use cli::{Cli, Commands};
use config::{Config, DriveEnv};
use dataset::Dataset;
use error::Result;
use map::popup::format_timestamp;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Fetch { output, interval_ms, force } => {
            println!("🚀 graffiti-archive - Drive fetch\n");

            // 1. Credentials
            println!("[1/3] Checking environment...");
            let env = DriveEnv::from_env()?;
            println!("✔ Drive folder: {}\n", env.folder_id);

            // 2. List + metadata batch
            println!("[2/3] Fetching image metadata...");
            let interval = interval_ms.unwrap_or(config.request_interval_ms);
            let mut fetcher = fetcher::Fetcher::new(env, interval, cli.verbose);
            let summary = fetcher.run(&output, force).await?;
            println!("✔ Batch complete\n");

            // 3. Summary
            println!("[3/3] Summary:");
            println!("   • Total images: {}", summary.total_images);
            println!("   • Images with GPS: {}", summary.mappable_images);
            if summary.written {
                println!("   • Dataset written: {}", output.display());
            } else {
                println!("   • No changes detected - dataset is up to date");
            }

            println!("\n✅ Fetch complete");
        }

        Commands::Scan { folder, output, force } => {
            println!("📸 graffiti-archive - local scan\n");

            // 1. Scan folder
            println!("[1/2] Scanning photos...");
            let records = scanner::scan_folder(&folder)?;
            if records.is_empty() {
                return Err(error::GraffitiError::NoImagesFound(
                    folder.display().to_string(),
                ));
            }
            println!("✔ {} photos found\n", records.len());

            // 2. Build + conditional write
            println!("[2/2] Building dataset...");
            let previous = Dataset::load(&output);
            let new_dataset = Dataset::build(records, chrono::Utc::now());
            let changed = new_dataset.differs_from(&previous);

            if changed || force {
                new_dataset.save(&output)?;
                println!(
                    "✔ Dataset written: {} ({} total, {} with GPS)",
                    output.display(),
                    new_dataset.total_images,
                    new_dataset.mappable_images
                );
            } else {
                println!("✨ No changes detected - dataset is up to date");
            }

            println!("\n✅ Scan complete");
        }

        Commands::Render { input, provider, output } => {
            println!("🗺️  graffiti-archive - map render\n");

            // 1. Load dataset
            println!("[1/3] Loading dataset...");
            let dataset = Dataset::load(&input);
            println!(
                "✔ {} images, {} mappable{}\n",
                dataset.total_images,
                dataset.mappable_images,
                dataset
                    .last_updated
                    .map(|t| format!(", last updated {}", format_timestamp(&t.to_rfc3339())))
                    .unwrap_or_default()
            );

            // 2. Initialize the selected adapter
            println!("[2/3] Initializing {}...", provider.name());
            let mut adapter = map::build_adapter(provider, &config);
            adapter.initialize(&dataset.images)?;
            println!("✔ {} markers rendered\n", adapter.marker_count());

            // 3. Write the page
            println!("[3/3] Writing map page...");
            let page = adapter.render_page()?;
            std::fs::write(&output, page)?;
            println!("✔ Map page written: {}", output.display());

            println!("\n✅ Render complete");
        }

        Commands::Status { input } => {
            let dataset = Dataset::load(&input);

            println!("Dataset: {}", input.display());
            println!("  Total images: {}", dataset.total_images);
            println!("  Images with GPS: {}", dataset.mappable_images);
            match dataset.last_updated {
                Some(time) => println!("  Last updated: {}", format_timestamp(&time.to_rfc3339())),
                None => println!("  Last updated: never"),
            }
        }

        Commands::Config { set_maps_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_maps_api_key {
                config.google_maps_api_key = Some(key);
                config.save()?;
                println!("✔ Google Maps API key saved");
            }

            if show {
                println!("Configuration:");
                println!("  Map center: {}, {}", config.map_center_lat, config.map_center_lng);
                println!("  Default zoom: {}", config.map_zoom);
                println!("  Tile URL: {}", config.tile_url);
                println!("  Request interval: {}ms", config.request_interval_ms);
                println!(
                    "  Google Maps key: {}",
                    if config.google_maps_api_key.is_some() { "set" } else { "not set" }
                );
            }
        }
    }

    Ok(())
}
