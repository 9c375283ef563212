//! penguin-render: draw a demo scene with the software backend and save it as PNG.
//!
//! Run: `penguin-render --output scene.png --sprite penguin.png -vv`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use penguin_gfx::logging;
use penguin_gfx::prelude::*;

/// Render every primitive (and optionally a sprite) to a PNG file
#[derive(Parser, Debug)]
#[command(name = "penguin-render")]
#[command(version)]
#[command(about = "Render a 2D demo scene to PNG", long_about = None)]
struct Cli {
    /// Config file path (defaults to the user config dir if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "penguin.png")]
    output: PathBuf,

    /// PNG drawn as a rotated, tinted sprite in the middle of the scene
    #[arg(short, long)]
    sprite: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default_path().map_or_else(Config::default, Config::load_or_default),
    };
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let (width, height) = (config.window.width, config.window.height);
    log::info!("rendering '{}' at {width}x{height}", config.window.title);

    let mut renderer = Renderer::new(SoftwareBackend::new(width, height)?);
    let mut textures = match &config.render.texture_dir {
        Some(dir) => TextureCache::with_root(dir),
        None => TextureCache::new(),
    };

    draw_scene(&mut renderer, &config, width as f32, height as f32)?;

    if let Some(path) = &cli.sprite {
        let texture = textures.load(renderer.backend_mut(), path)?;
        let mut sprite = Sprite::with_texture(texture);
        sprite.set_anchor(Vector2::new(0.5, 0.5));
        sprite.set_position(Vector2::new(width as f32 / 2.0, height as f32 / 2.0));
        sprite.set_angle(15.0);
        sprite.set_tint(Some(Colour::from_hex(0xFFE0C0FF)));
        renderer.draw_sprite(&sprite)?;
    }

    textures.clear(renderer.backend_mut())?;
    PngEncoder::write_to_file(renderer.backend().framebuffer(), &cli.output)?;
    log::info!("wrote {}", cli.output.display());
    Ok(())
}

fn draw_scene(renderer: &mut Renderer<SoftwareBackend>, config: &Config, w: f32, h: f32) -> Result<()> {
    let ink = config.render.draw_colour();
    renderer.clear(config.render.clear_colour())?;

    let border = Rect2::from_xywh(4.0, 4.0, w - 8.0, h - 8.0);
    renderer.draw_rect(border, ink, DrawMode::Outline)?;

    let cell = Vector2::new(w / 4.0, h / 2.0);
    let radius = cell.x.min(cell.y) * 0.35;
    let centre = |col: f32, row: f32| Vector2::new(cell.x * (col + 0.5), cell.y * (row + 0.5));

    for (row, mode) in [DrawMode::Outline, DrawMode::Filled].into_iter().enumerate() {
        let row = row as f32;
        let c = centre(0.0, row);
        renderer.draw_circle(Circle2::new(c, radius), Colour::RED, mode)?;

        let c = centre(1.0, row);
        renderer.draw_ellipse(c, Vector2::new(radius, radius * 0.5), Colour::GREEN, mode)?;

        let c = centre(2.0, row);
        renderer.draw_triangle(
            c + Vector2::new(0.0, -radius),
            c + Vector2::new(radius, radius),
            c + Vector2::new(-radius, radius),
            Colour::BLUE,
            mode,
        )?;

        let c = centre(3.0, row);
        let rect = Rect2::new(c - Vector2::splat(radius), Vector2::splat(radius * 2.0));
        renderer.draw_rect(rect, ink.with_alpha(0.6), mode)?;
    }

    renderer.draw_line(Vector2::new(8.0, h / 2.0), Vector2::new(w - 8.0, h / 2.0), ink)?;
    Ok(())
}
