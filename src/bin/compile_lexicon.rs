// Converts a frequency list into a binary lexicon snapshot. The snapshot holds
// the raw counts; name and single-letter customisation is applied on load.
// Run with: cargo run --bin compile_lexicon -- <words.txt|words.json> <out.bin>
use anyhow::{bail, Context, Result};
use decipher_core::persistence::{load_lexicon, save_lexicon};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [input, output] = args.as_slice() else {
        bail!("usage: compile_lexicon <input> <output.bin>");
    };
    let (input, output) = (PathBuf::from(input), PathBuf::from(output));

    let lexicon =
        load_lexicon(&input).with_context(|| format!("loading {}", input.display()))?;
    save_lexicon(&output, &lexicon).with_context(|| format!("writing {}", output.display()))?;

    tracing::info!(words = lexicon.len(), total = lexicon.total(), "snapshot written");
    println!("Wrote {} words to '{}'", lexicon.len(), output.display());
    Ok(())
}
