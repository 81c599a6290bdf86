use anyhow::Result;
use tracing::warn;

use lumen_core::PageSpec;

pub async fn run(page: &PageSpec) -> Result<()> {
    let warnings = page.validate()?;
    let manifest = page.manifest();

    println!("{}", page.title);
    println!(
        "  {} sections, {} nav links, {} reveal blocks",
        manifest.section_ids.len(),
        manifest.nav_hrefs.len(),
        manifest.reveal_ids.len()
    );

    let features = [
        ("cursor light", manifest.cursor_light),
        ("back to top", manifest.to_top),
        ("menu toggle", manifest.nav_toggle),
        ("footer year", manifest.footer_year),
        ("contact form", manifest.contact_form),
    ];
    let enabled: Vec<&str> = features
        .iter()
        .filter(|(_, on)| *on)
        .map(|(name, _)| *name)
        .collect();
    if !enabled.is_empty() {
        println!("  features: {}", enabled.join(", "));
    }

    if warnings.is_empty() {
        println!("\nOK");
        return Ok(());
    }

    println!("\nWarnings ({}):", warnings.len());
    for warning in &warnings {
        warn!("{}", warning);
        println!("  - {}", warning);
    }
    Ok(())
}
