//! Command-line definitions using Clap v4

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pixfont_bitmap::{BoldMethod, Rgb};

/// Pixfont - keep pixel-font glyph trees in order
#[derive(Parser, Debug)]
#[command(name = "pixfont")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log progress at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Move and re-encode every glyph into the canonical layout
    Canonicalize(CanonicalizeArgs),

    /// List the distinct glyphs a font needs, in embedding order
    Sequence(SequenceArgs),

    /// Print the character map for one flavor
    Cmap(CmapArgs),

    /// Rewrite a mapping file in canonical form
    MappingFormat(MappingFormatArgs),

    /// Compute kerning pairs from a kerning config
    Kerning(KerningArgs),

    /// Dump a glyph image as text
    Draw(DrawArgs),

    /// Derive a bold glyph image
    Bold(BoldArgs),
}

/// Flavor priority shared by several commands
#[derive(Args, Debug, Clone, Default)]
pub struct FlavorArgs {
    /// Flavor priority, comma separated; `~` stands for the default flavor
    #[arg(long, env = "PIXFONT_FLAVORS", value_delimiter = ',')]
    pub flavors: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CanonicalizeArgs {
    /// Root of the glyph tree
    pub root: PathBuf,

    #[command(flatten)]
    pub flavors: FlavorArgs,

    /// Ink color for re-encoded images (RRGGBB)
    #[arg(long, default_value_t = Rgb::BLACK)]
    pub color: Rgb,
}

#[derive(Args, Debug)]
pub struct SequenceArgs {
    /// Root of the glyph tree
    pub root: PathBuf,

    #[command(flatten)]
    pub flavors: FlavorArgs,

    /// Mapping file applied before listing
    #[arg(long)]
    pub mapping: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CmapArgs {
    /// Root of the glyph tree
    pub root: PathBuf,

    /// Flavor to resolve; the default flavor when omitted
    #[arg(long)]
    pub flavor: Option<String>,

    /// Mapping file applied before resolving
    #[arg(long)]
    pub mapping: Option<PathBuf>,

    /// Print JSON instead of lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MappingFormatArgs {
    /// Mapping file to rewrite
    pub file: PathBuf,

    #[command(flatten)]
    pub flavors: FlavorArgs,

    /// Fail instead of rewriting when the file is not canonical
    #[arg(long)]
    pub check: bool,
}

#[derive(Args, Debug)]
pub struct KerningArgs {
    /// Root of the glyph tree
    pub root: PathBuf,

    /// Kerning config file
    pub config: PathBuf,

    /// Print JSON instead of lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DrawArgs {
    /// Glyph image
    pub png: PathBuf,

    /// Text for ink cells
    #[arg(long, default_value = "██")]
    pub ink: String,

    /// Text for background cells
    #[arg(long, default_value = "  ")]
    pub background: String,
}

#[derive(Args, Debug)]
pub struct BoldArgs {
    /// Glyph image to embolden
    pub png: PathBuf,

    /// Where to write the bold image
    #[arg(short, long)]
    pub output: PathBuf,

    /// Bolding recipe: inflation, move-right, move-left
    #[arg(short, long, default_value_t = BoldMethod::Inflation)]
    pub method: BoldMethod,

    /// Ink color of the written image (RRGGBB)
    #[arg(long, default_value_t = Rgb::BLACK)]
    pub color: Rgb,
}
