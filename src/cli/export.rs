use std::path::PathBuf;

use anyhow::Result;
use larder_shopping::{CartStore, Export, MemoryStore, RecipeStore, ShoppingService, SqliteStore};

use crate::config::Config;

#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    /// User the shopping list is generated for
    #[arg(long)]
    pub user: String,

    /// Recipe to include (repeatable); defaults to the user's shopping cart
    #[arg(long = "recipe")]
    pub recipes: Vec<String>,

    /// Output format: txt, pdf or json
    #[arg(long, default_value = "txt")]
    pub format: String,

    /// Read recipes from a JSON catalog instead of the database
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub async fn export(config: Config, args: ExportArgs) -> Result<()> {
    let export = match &args.catalog {
        Some(path) => {
            let store = MemoryStore::from_json(&std::fs::read(path)?)?;
            generate(&config, store, &args).await?
        }
        None => {
            let pool =
                crate::db::create_read_pool(&config.database.url, config.database.max_connections)
                    .await?;
            generate(&config, SqliteStore(pool), &args).await?
        }
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &export.content)?;
            tracing::info!(
                path = %path.display(),
                content_type = export.content_type,
                "shopping list written"
            );
        }
        None => {
            use std::io::Write;

            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&export.content)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

async fn generate<S: RecipeStore + CartStore>(
    config: &Config,
    store: S,
    args: &ExportArgs,
) -> larder_shared::Result<Export> {
    let service = ShoppingService::new(store)
        .max_concurrent_reads(config.shopping.max_concurrent_reads)
        .format_options(config.format_options());

    if args.recipes.is_empty() {
        service.generate_from_cart(&args.user, &args.format).await
    } else {
        service
            .generate(&args.user, args.recipes.iter().cloned(), &args.format)
            .await
    }
}
