use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::warn;

use printkit::init_logging;
use printkit_adjust::{
    export_document_to_file, print_html, print_info, AdjustmentDocument, ColorMode,
};
use printkit_core::{load_image, Orientation, OutputFormat, Rect};
use printkit_layout::{export_page_to_file, print_document, ExportOptions, Scene};
use printkit_settings::{Config, SettingsManager};

#[derive(Parser)]
#[command(name = "printkit")]
#[command(about = "A4 page composition and single-image print adjustment")]
#[command(version = printkit::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose images onto an A4 page and export the page
    Compose {
        /// Image files to place on the page, in stacking order
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Output file; defaults to a timestamped name in the working directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// Output resolution in DPI
        #[arg(long)]
        dpi: Option<u32>,

        /// Output format: jpg, png, or webp
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Write a printable HTML document to this path instead of a raster
        #[arg(long, value_name = "FILE")]
        print_html: Option<PathBuf>,
    },

    /// Adjust a single image for printing
    Adjust {
        /// Image file to adjust
        image: PathBuf,

        /// Output file; defaults to a timestamped name in the working directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// Rotate clockwise by this many degrees
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        rotate: f64,

        /// Mirror across the vertical axis
        #[arg(long)]
        flip_h: bool,

        /// Mirror across the horizontal axis
        #[arg(long)]
        flip_v: bool,

        /// Apply the one-click enhancement preset
        #[arg(long)]
        auto_enhance: bool,

        /// Brightness offset, -100 to 100
        #[arg(long, allow_negative_numbers = true)]
        brightness: Option<i32>,

        /// Contrast amount, -100 to 100
        #[arg(long, allow_negative_numbers = true)]
        contrast: Option<i32>,

        /// Color mode: normal, grayscale, or bw
        #[arg(long, default_value_t = ColorMode::Normal)]
        color_mode: ColorMode,

        /// Crop to a region before exporting
        #[arg(long, value_name = "X,Y,W,H")]
        crop: Option<String>,

        /// Output format: jpg, png, or webp
        #[arg(long)]
        format: Option<OutputFormat>,

        /// JPEG quality, 1-100
        #[arg(long)]
        quality: Option<u8>,

        /// Write a printable HTML document to this path instead of a raster
        #[arg(long, value_name = "FILE")]
        print_html: Option<PathBuf>,

        /// Page orientation for print output: portrait or landscape
        #[arg(long)]
        orientation: Option<Orientation>,
    },

    /// Inspect an image and report its expected print quality
    Info {
        /// Image file to inspect
        image: PathBuf,

        /// Target print resolution in DPI
        #[arg(long)]
        dpi: Option<u32>,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let settings = match SettingsManager::load() {
        Ok(manager) => manager,
        Err(e) => {
            warn!(error = %e, "Could not load settings, using defaults");
            SettingsManager::new()
        }
    };
    let config = *settings.config();

    let cli = Cli::parse();
    match cli.command {
        Command::Compose {
            images,
            out,
            dpi,
            format,
            print_html,
        } => run_compose(&config, &images, out, dpi, format, print_html),
        Command::Adjust {
            image,
            out,
            rotate,
            flip_h,
            flip_v,
            auto_enhance,
            brightness,
            contrast,
            color_mode,
            crop,
            format,
            quality,
            print_html,
            orientation,
        } => run_adjust(
            &config,
            AdjustArgs {
                image,
                out,
                rotate,
                flip_h,
                flip_v,
                auto_enhance,
                brightness,
                contrast,
                color_mode,
                crop,
                format,
                quality,
                print_html,
                orientation,
            },
        ),
        Command::Info { image, dpi } => run_info(&config, &image, dpi),
    }
}

fn run_compose(
    config: &Config,
    images: &[PathBuf],
    out: Option<PathBuf>,
    dpi: Option<u32>,
    format: Option<OutputFormat>,
    print_html_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut scene = Scene::new();
    for path in images {
        let loaded =
            load_image(path).with_context(|| format!("Failed to load {}", path.display()))?;
        scene
            .add_loaded(loaded)
            .with_context(|| format!("Failed to place {}", path.display()))?;
    }
    println!("{}", scene.summary());

    if let Some(html_path) = print_html_path {
        let doc = print_document(&scene)?;
        std::fs::write(&html_path, doc.to_html())
            .with_context(|| format!("Failed to write {}", html_path.display()))?;
        println!("Wrote print document to {}", html_path.display());
        return Ok(());
    }

    let format = resolve_format(format, out.as_deref(), OutputFormat::Png);
    let options = ExportOptions {
        dpi: dpi.unwrap_or(config.export.dpi),
        format,
        quality: config.export.jpeg_quality,
    };
    let out = out
        .unwrap_or_else(|| PathBuf::from(printkit_layout::default_artifact_name(options.format)));

    export_page_to_file(&scene, &options, &out)?;
    println!("Exported page to {} at {} DPI", out.display(), options.dpi);
    Ok(())
}

struct AdjustArgs {
    image: PathBuf,
    out: Option<PathBuf>,
    rotate: f64,
    flip_h: bool,
    flip_v: bool,
    auto_enhance: bool,
    brightness: Option<i32>,
    contrast: Option<i32>,
    color_mode: ColorMode,
    crop: Option<String>,
    format: Option<OutputFormat>,
    quality: Option<u8>,
    print_html: Option<PathBuf>,
    orientation: Option<Orientation>,
}

fn run_adjust(config: &Config, args: AdjustArgs) -> anyhow::Result<()> {
    let loaded = load_image(&args.image)
        .with_context(|| format!("Failed to load {}", args.image.display()))?;
    let mut doc = AdjustmentDocument::from_loaded(loaded)?;

    if args.rotate != 0.0 {
        doc.rotate_by(args.rotate);
    }
    if args.flip_h {
        doc.flip_horizontally();
    }
    if args.flip_v {
        doc.flip_vertically();
    }
    if args.auto_enhance {
        doc.auto_enhance();
    }
    if let Some(brightness) = args.brightness {
        doc.set_brightness(brightness);
    }
    if let Some(contrast) = args.contrast {
        doc.set_contrast(contrast);
    }
    doc.set_color_mode(args.color_mode);

    if let Some(crop) = &args.crop {
        doc.set_crop_rect(parse_crop(crop)?);
        doc.apply_crop();
    }

    if let Some(html_path) = args.print_html {
        let orientation = args.orientation.unwrap_or(config.page.orientation);
        let html = print_html(&doc, orientation)?;
        std::fs::write(&html_path, html)
            .with_context(|| format!("Failed to write {}", html_path.display()))?;
        println!("Wrote print document to {}", html_path.display());
        return Ok(());
    }

    let format = resolve_format(args.format, args.out.as_deref(), config.export.format);
    let quality = args.quality.unwrap_or(config.export.jpeg_quality);
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(printkit_adjust::default_artifact_name(format)));

    export_document_to_file(&doc, format, quality, &out)?;
    println!("Exported {} to {}", doc.info(), out.display());
    Ok(())
}

fn run_info(config: &Config, image: &Path, dpi: Option<u32>) -> anyhow::Result<()> {
    let loaded =
        load_image(image).with_context(|| format!("Failed to load {}", image.display()))?;
    let doc = AdjustmentDocument::from_loaded(loaded)?;
    let dpi = dpi.unwrap_or(config.export.dpi);

    println!("{}", doc.info());
    println!("{}", print_info(&doc, config.page.orientation, dpi));
    Ok(())
}

/// Pick the output format: an explicit flag wins, then the output file
/// extension, then the fallback.
fn resolve_format(
    flag: Option<OutputFormat>,
    out: Option<&Path>,
    fallback: OutputFormat,
) -> OutputFormat {
    if let Some(format) = flag {
        return format;
    }
    out.and_then(|p| p.extension())
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
        .unwrap_or(fallback)
}

/// Parse an `X,Y,W,H` crop region given in canvas pixels.
fn parse_crop(raw: &str) -> anyhow::Result<Rect> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        anyhow::bail!("Crop must be X,Y,W,H, got '{}'", raw);
    }
    let mut values = [0.0f64; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .with_context(|| format!("Invalid crop component '{}'", part))?;
    }
    Ok(Rect::new(values[0], values[1], values[2], values[3]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crop_accepts_four_components() {
        let rect = parse_crop("10, 20, 300, 400").unwrap();
        assert_eq!(rect.x, 10.0);
        assert_eq!(rect.y, 20.0);
        assert_eq!(rect.width, 300.0);
        assert_eq!(rect.height, 400.0);
    }

    #[test]
    fn test_parse_crop_rejects_bad_specs() {
        assert!(parse_crop("10,20,300").is_err());
        assert!(parse_crop("a,b,c,d").is_err());
    }

    #[test]
    fn test_resolve_format_precedence() {
        let from_flag = resolve_format(
            Some(OutputFormat::WebP),
            Some(Path::new("out.png")),
            OutputFormat::Jpg,
        );
        assert_eq!(from_flag, OutputFormat::WebP);

        let from_ext = resolve_format(None, Some(Path::new("out.png")), OutputFormat::Jpg);
        assert_eq!(from_ext, OutputFormat::Png);

        let fallback = resolve_format(None, Some(Path::new("out")), OutputFormat::Jpg);
        assert_eq!(fallback, OutputFormat::Jpg);
    }
}
