use std::env;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use handscript::{
    AverageGlyphMeasurer, DocumentStats, GlyphMeasurer, HandwritingStyle, InkColor, Jitter,
    LayoutConfig, PageGeometry, ProportionalMeasurer, RandomSource, RngSource,
};
use handscript_render::{
    PageChromeConfig, PaperStyle, RenderEngine, RenderEngineOptions, RulingConfig,
};
use handscript_render_web::{
    css_font_family, font_by_name, write_html, FontFace, HtmlExportOptions, DEFAULT_MAX_FONT_BYTES,
};
use serde::{Deserialize, Serialize};

const DEFAULT_OUT_PATH: &str = "target/handscript-preview/index.html";

#[derive(Clone, Debug)]
struct Args {
    input: String,
    out_path: String,
    config_path: Option<String>,
    preset: Option<usize>,
    paper: Option<String>,
    seed: Option<u64>,
    font_file: Option<String>,
    page: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct PreviewConfig {
    title: String,

    page_width: f32,
    page_height: f32,
    margin_left: f32,
    margin_right: f32,
    margin_top: f32,
    margin_bottom: f32,

    font: String,
    size: f32,
    slant: f32,
    line_spacing: f32,
    word_spacing: f32,
    ink_color: String,

    paper: String,
    footer: bool,
    jitter_offset: f32,
    jitter_rotation_deg: f32,
    measurer: String,
    seed: Option<u64>,
    max_font_bytes: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        let geometry = PageGeometry::A4;
        let style = HandwritingStyle::default();
        let jitter = Jitter::default();
        Self {
            title: "Handwritten Document".to_string(),
            page_width: geometry.width,
            page_height: geometry.height,
            margin_left: geometry.margin_left,
            margin_right: geometry.margin_right,
            margin_top: geometry.margin_top,
            margin_bottom: geometry.margin_bottom,
            font: style.font,
            size: style.size,
            slant: style.slant,
            line_spacing: style.line_spacing,
            word_spacing: style.word_spacing,
            ink_color: style.ink_color.to_hex(),
            paper: PaperStyle::default().id().to_string(),
            footer: false,
            jitter_offset: jitter.max_offset,
            jitter_rotation_deg: jitter.max_rotation_deg,
            measurer: "average".to_string(),
            seed: None,
            max_font_bytes: DEFAULT_MAX_FONT_BYTES,
        }
    }
}

impl PreviewConfig {
    fn apply_style(&mut self, style: &HandwritingStyle) {
        self.font = style.font.clone();
        self.size = style.size;
        self.slant = style.slant;
        self.line_spacing = style.line_spacing;
        self.word_spacing = style.word_spacing;
        self.ink_color = style.ink_color.to_hex();
    }

    fn normalized(mut self) -> Self {
        self.page_width = clamp_or(self.page_width, 64.0, 4096.0, PageGeometry::A4.width);
        self.page_height = clamp_or(self.page_height, 64.0, 4096.0, PageGeometry::A4.height);
        self.margin_left = clamp_or(self.margin_left, 0.0, self.page_width / 2.0, 50.0);
        self.margin_right = clamp_or(self.margin_right, 0.0, self.page_width / 2.0, 50.0);
        self.margin_top = clamp_or(self.margin_top, 0.0, self.page_height / 2.0, 80.0);
        self.margin_bottom = clamp_or(self.margin_bottom, 0.0, self.page_height / 2.0, 80.0);
        self.size = clamp_or(self.size, 4.0, 200.0, 20.0);
        self.slant = clamp_or(self.slant, -45.0, 45.0, 0.0);
        self.line_spacing = clamp_or(self.line_spacing, 0.5, 5.0, 1.5);
        self.word_spacing = clamp_or(self.word_spacing, 0.1, 5.0, 1.1);
        self.jitter_offset = clamp_or(self.jitter_offset, 0.0, 10.0, 1.0);
        self.jitter_rotation_deg = clamp_or(self.jitter_rotation_deg, 0.0, 15.0, 0.5);
        if self.font.trim().is_empty() {
            self.font = HandwritingStyle::default().font;
        }
        if PaperStyle::from_id(&self.paper).is_none() {
            self.paper = PaperStyle::default().id().to_string();
        }
        if !matches!(self.measurer.as_str(), "average" | "proportional") {
            self.measurer = "average".to_string();
        }
        self.max_font_bytes = self.max_font_bytes.clamp(1024, 64 * 1024 * 1024);
        self
    }

    fn style(&self) -> Result<HandwritingStyle, String> {
        let ink = InkColor::parse_hex(&self.ink_color).map_err(|e| e.to_string())?;
        Ok(HandwritingStyle::new(self.font.clone(), self.size)
            .with_slant(self.slant)
            .with_line_spacing(self.line_spacing)
            .with_word_spacing(self.word_spacing)
            .with_ink_color(ink))
    }

    fn engine_options(&self) -> RenderEngineOptions {
        RenderEngineOptions {
            layout: LayoutConfig {
                geometry: PageGeometry {
                    width: self.page_width,
                    height: self.page_height,
                    margin_left: self.margin_left,
                    margin_right: self.margin_right,
                    margin_top: self.margin_top,
                    margin_bottom: self.margin_bottom,
                },
                jitter: Jitter::new(self.jitter_offset, self.jitter_rotation_deg),
            },
            paper: PaperStyle::from_id(&self.paper).unwrap_or_default(),
            ruling: RulingConfig::default(),
            chrome: PageChromeConfig {
                footer_enabled: self.footer,
                ..PageChromeConfig::default()
            },
        }
    }

    fn measurer(&self) -> Arc<dyn GlyphMeasurer> {
        match self.measurer.as_str() {
            "proportional" => Arc::new(ProportionalMeasurer::default()),
            _ => Arc::new(AverageGlyphMeasurer),
        }
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max.max(min))
    } else {
        fallback
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run(env::args().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("{}", help_text());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let cli = parse_args(args)?;
    let cfg = load_config(&cli)?;
    let style = cfg.style()?;
    let text = read_input(&cli.input)?;

    if cli.out_path.is_empty() {
        return Err("--out must not be empty".to_string());
    }

    let engine = RenderEngine::new(cfg.engine_options()).with_measurer(cfg.measurer());
    let doc = engine.prepare(&text, &style);
    let mut rng: Box<dyn RandomSource> = match cfg.seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::thread()),
    };
    let pages = match cli.page {
        Some(page_number) => vec![engine
            .render_page(&doc, page_number, &mut *rng)
            .map_err(|e| e.to_string())?],
        None => engine.render_all(&doc, &mut *rng),
    };

    let font_face = match &cli.font_file {
        Some(path) => Some(
            FontFace::load(font_family_for(&style.font, path), path, cfg.max_font_bytes)
                .map_err(|e| e.to_string())?,
        ),
        None => None,
    };
    let opts = HtmlExportOptions {
        title: cfg.title.clone(),
        font_face,
        ..HtmlExportOptions::default()
    };
    write_html(&cli.out_path, &pages, &opts).map_err(|e| e.to_string())?;

    println!(
        "wrote handwriting preview to {} (pages={}/{}, lines={}, paper={}, font={})",
        cli.out_path,
        pages.len(),
        doc.page_count(),
        doc.layout().line_count(),
        cfg.paper,
        css_font_family(&style.font),
    );
    println!(
        "{}",
        stats_summary(&DocumentStats::from_text(&text), doc.page_count())
    );
    Ok(())
}

fn stats_summary(stats: &DocumentStats, page_count: usize) -> String {
    format!(
        "words={} chars={} estimated_pages={} laid_out_pages={}",
        stats.words, stats.chars, stats.estimated_pages, page_count
    )
}

fn load_config(cli: &Args) -> Result<PreviewConfig, String> {
    let mut cfg = match &cli.config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
            serde_json::from_str::<PreviewConfig>(&raw)
                .map_err(|e| format!("invalid config '{}': {}", path, e))?
        }
        None => PreviewConfig::default(),
    };
    if let Some(index) = cli.preset {
        let presets = HandwritingStyle::presets();
        let preset = presets.get(index).ok_or_else(|| {
            format!(
                "invalid --preset value '{}' (expected 0..{})",
                index,
                presets.len() - 1
            )
        })?;
        cfg.apply_style(preset);
    }
    if let Some(paper) = &cli.paper {
        if PaperStyle::from_id(paper).is_none() {
            return Err(format!("invalid --paper value '{}'", paper));
        }
        cfg.paper = paper.clone();
    }
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }
    Ok(cfg.normalized())
}

fn read_input(input: &str) -> Result<String, String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("stdin: {}", e))?;
        return Ok(text);
    }
    std::fs::read_to_string(input).map_err(|e| format!("{}: {}", input, e))
}

fn font_family_for(style_font: &str, path: &str) -> String {
    if let Some(font) = font_by_name(style_font) {
        return font.display_name.to_string();
    }
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("Handwriting")
        .to_string()
}

fn parse_args(args: Vec<String>) -> Result<Args, String> {
    if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h") {
        return Err("help requested".to_string());
    }
    let input = match args.get(1) {
        Some(v) if v == "-" || !v.starts_with("--") => v.clone(),
        _ => return Err("missing input text file (use '-' for stdin)".to_string()),
    };

    let mut cfg = Args {
        input,
        out_path: DEFAULT_OUT_PATH.to_string(),
        config_path: None,
        preset: None,
        paper: None,
        seed: None,
        font_file: None,
        page: None,
    };

    let mut i = 2usize;
    while i < args.len() {
        match args[i].as_str() {
            "--out" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--out requires a value".to_string())?;
                cfg.out_path = v.clone();
                i += 2;
            }
            "--config" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--config requires a value".to_string())?;
                cfg.config_path = Some(v.clone());
                i += 2;
            }
            "--preset" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--preset requires a value".to_string())?;
                cfg.preset = Some(
                    v.parse::<usize>()
                        .map_err(|_| format!("invalid --preset value '{}'", v))?,
                );
                i += 2;
            }
            "--paper" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--paper requires a value".to_string())?;
                cfg.paper = Some(v.clone());
                i += 2;
            }
            "--seed" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--seed requires a value".to_string())?;
                cfg.seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| format!("invalid --seed value '{}'", v))?,
                );
                i += 2;
            }
            "--font-file" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--font-file requires a value".to_string())?;
                cfg.font_file = Some(v.clone());
                i += 2;
            }
            "--page" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--page requires a value".to_string())?;
                cfg.page = Some(
                    v.parse::<usize>()
                        .map_err(|_| format!("invalid --page value '{}'", v))?,
                );
                i += 2;
            }
            "--help" | "-h" => return Err("help requested".to_string()),
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }
    Ok(cfg)
}

fn help_text() -> &'static str {
    r#"handscript-preview - render text as handwritten HTML pages

USAGE:
  cargo run -p handscript-render-web --bin handscript-preview -- <text-file|-> [options]

OPTIONS:
  --out <file>          output HTML path (default: target/handscript-preview/index.html)
  --config <file>       JSON preview config; missing fields use defaults
  --preset <n>          built-in style preset index (0..2), overrides config style
  --paper <id>          ruled|blank|margin (default: ruled)
  --seed <n>            seed jitter for reproducible output (default: unseeded)
  --font-file <path>    embed a .ttf/.otf/.woff/.woff2 font in the output
  --page <n>            render only 1-based page n (default: all pages)
  -h, --help            show this help

LOGGING:
  RUST_LOG=debug shows measurement fallbacks and per-page details"#
}
