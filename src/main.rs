mod cli;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use huepick::pipeline::load::load_image;
use huepick::{output, Bitmap, DefaultFilter, PaletteBuilder};

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    let image = load_image(&args.image)?;
    let bitmap = Bitmap::from_rgba(&image);

    let mut builder = PaletteBuilder::new(&bitmap)
        .maximum_color_count(args.colors)
        .resize_area(args.resize_area);
    if args.filter {
        builder = builder.add_filter(DefaultFilter);
    }
    let palette = builder
        .generate()
        .with_context(|| format!("failed to extract palette from {}", args.image.display()))?;
    info!("{} swatches", palette.len());

    if args.preview {
        output::write_preview(&palette, &mut io::stdout().lock())?;
    }

    match &args.output {
        Some(path) => {
            output::write_to(&palette, args.format, path)?;
            eprintln!("Palette written to {}", path.display());
        }
        None => print!("{}", output::serialize(&palette, args.format)?),
    }
    Ok(())
}
