use clap::{Parser, Subcommand};
use speakeasy::config::Config;
use speakeasy::database::db;
use speakeasy::export::json;
use speakeasy::{Error, SpacedRepetitionItem, SpacedRepetitionSystem, TranslationLookup};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// SpeakEasy vocabulary scheduler
#[derive(Parser)]
#[command(name = "speakeasy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Spaced-repetition scheduling for vocabulary items")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new item
    Add {
        id: String,
        word: String,
        translation: String,
        /// 0.0 (easiest) to 5.0
        #[arg(long, default_value_t = speakeasy::srs::DEFAULT_DIFFICULTY)]
        difficulty: f64,
    },
    /// Record a review of an item
    Review {
        id: String,
        /// 0 (forgot) to 5 (perfect)
        quality: f64,
        /// Seconds taken to answer
        response_time: f64,
    },
    /// List items due for review
    Due,
    /// Show aggregate learning statistics
    Stats,
    /// Move the simulated date forward one day
    AdvanceDay,
    /// Export all items to a JSON file
    Export { path: PathBuf },
    /// Import items from a JSON file, overwriting items with the same id
    Import { path: PathBuf },
    /// Create items for every vocabulary record in a content file
    ImportContent { path: PathBuf },
}

fn main() -> speakeasy::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "speakeasy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let conn = db::init_database(&config.database_path)?;
    let srs = SpacedRepetitionSystem::new(config.scheduler);
    let today = db::current_date(&conn)?;

    match cli.command {
        Commands::Add {
            id,
            word,
            translation,
            difficulty,
        } => {
            let item = srs.create_item_at(&id, &word, &translation, difficulty, today);
            db::add_item(&item, &conn)?;
            println!("Added '{}' ({} -> {})", id, word, translation);
        }
        Commands::Review {
            id,
            quality,
            response_time,
        } => {
            let item = db::get_item(&id, &conn)?;
            let suggested_difficulty = srs.adjust_difficulty(&item, quality, response_time);
            let result = srs.calculate_next_interval(&item, quality, response_time, today);
            db::record_review(&result, &conn)?;

            println!(
                "'{}': next review in {} day(s) on {}, ease factor {:.2}",
                item.word,
                result.new_interval,
                result.next_review_date.format("%Y-%m-%d"),
                result.new_ease_factor
            );
            if result.should_review {
                println!("  still in closer tracking");
            }
            println!(
                "  suggested difficulty {:.1} (currently {:.1})",
                suggested_difficulty, item.difficulty
            );
        }
        Commands::Due => {
            let due = db::items_due_for_review(today, &conn)?;
            println!("{} item(s) due on {}", due.len(), today.format("%Y-%m-%d"));
            for item in &due {
                print_item(item);
            }
        }
        Commands::Stats => {
            let items = db::load_items(&conn)?;
            let stats = srs.learning_stats(&items, today);
            println!("Items:             {}", stats.total_items);
            println!("Due for review:    {}", stats.due_for_review);
            println!("Due soon:          {}", stats.due_soon);
            println!("Retention rate:    {}%", stats.retention_rate);
            println!("Average interval:  {} day(s)", stats.average_interval);
            println!("Average ease:      {:.2}", stats.average_ease_factor);
            match stats.next_review_date {
                Some(date) => println!("Oldest due review: {}", date.format("%Y-%m-%d")),
                None => println!("Oldest due review: none"),
            }
        }
        Commands::AdvanceDay => {
            let date = db::advance_day(&conn)?;
            println!("Current date is now {}", date.format("%Y-%m-%d"));
        }
        Commands::Export { path } => {
            let items = db::load_items(&conn)?;
            json::export_items_to_path(&items, &path)?;
            println!("Exported {} item(s) to {}", items.len(), path.display());
        }
        Commands::Import { path } => {
            let items = json::import_items(&path)?;
            for item in &items {
                db::save_item(item, &conn)?;
            }
            println!("Imported {} item(s)", items.len());
        }
        Commands::ImportContent { path } => {
            let records = json::import_content(&path)?;
            let vocabulary: Vec<_> = records.iter().filter_map(|r| r.as_vocabulary()).collect();
            let lookup = TranslationLookup::from_vocabulary(vocabulary.iter().copied());

            let mut added = 0;
            for entry in &vocabulary {
                match db::add_item(&entry.to_item(&srs, today), &conn) {
                    Ok(()) => added += 1,
                    Err(Error::DuplicateItem(id)) => tracing::debug!("Skipping existing item '{}'", id),
                    Err(e) => return Err(e),
                }
            }

            println!(
                "Loaded {} record(s): {} new item(s), {} distinct word(s)",
                records.len(),
                added,
                lookup.len()
            );
        }
    }

    Ok(())
}

fn print_item(item: &SpacedRepetitionItem) {
    println!(
        "  {:<12} {:<20} {:<20} interval {:>3}d  ease {:.2}",
        item.id, item.word, item.translation, item.interval, item.ease_factor
    );
}
