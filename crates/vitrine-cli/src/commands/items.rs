use anyhow::Result;
use tokio::time::Instant;

use vitrine_core::{AppConfig, Carousel, SiteCatalog};

pub fn run(config: &AppConfig, catalog: &SiteCatalog, row: usize) -> Result<()> {
    if catalog.thumbnails.is_empty() {
        println!("The catalog has no thumbnails.");
        return Ok(());
    }

    let mut carousel = Carousel::bidirectional(&catalog.thumbnails, &config.marquee, Instant::now());
    let marquee_row = carousel.row(row)?;
    let engine = &marquee_row.engine;
    let sequence = engine.sequence();

    println!(
        "Row {} ({}): {} items from {} thumbnails x {}\n",
        row,
        engine.direction(),
        sequence.len(),
        sequence.source_len(),
        sequence.repetitions()
    );

    for (index, item) in sequence.iter().enumerate() {
        let key = sequence.key(index).unwrap_or_default();
        let missing = if catalog.resolve_source(item).exists() {
            ""
        } else {
            " [fallback]"
        };
        println!("  {:>3}  {}{}", index, item.label(), missing);
        println!("       key: {}", key);
    }

    carousel.destroy();
    Ok(())
}
