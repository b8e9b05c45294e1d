use serde_derive::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::colour::parse_hex_colour;
use crate::errors::*;
use crate::renderers::{build_wall_renderer, WallRenderer, WallRendererKind, WallStyleParams};
use crate::units::CellSize;

/// The maze panel style of a card. Every field is optional in JSON and falls back to the card
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeStyleConfig {
    pub cell_size: u32,
    pub wall_type: String,
    pub tile_size: u32,
    pub tile_gap: u32,
    pub wall_thickness: u32,
    pub scale_size: u32,
    pub scale_variation: f32,
    pub dot_size: u32,
    pub dot_gap: u32,
    /// Hex colour; the wall style's own default when absent.
    pub wall_color: Option<String>,
}

impl Default for MazeStyleConfig {
    fn default() -> MazeStyleConfig {
        let params = WallStyleParams::default();
        MazeStyleConfig {
            cell_size: 40,
            wall_type: WallRendererKind::Mosaic.name().to_string(),
            tile_size: params.tile_size,
            tile_gap: params.tile_gap,
            wall_thickness: params.wall_thickness,
            scale_size: params.scale_size,
            scale_variation: params.scale_variation,
            dot_size: params.dot_size,
            dot_gap: params.dot_gap,
            wall_color: None,
        }
    }
}

impl MazeStyleConfig {
    pub fn from_json_str(json: &str) -> Result<MazeStyleConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<MazeStyleConfig> {
        let path = path.as_ref();
        let file = File::open(path).chain_err(|| format!("cannot open style file {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .chain_err(|| format!("cannot parse style file {}", path.display()))
    }

    pub fn style_params(&self) -> WallStyleParams {
        WallStyleParams {
            tile_size: self.tile_size,
            tile_gap: self.tile_gap,
            wall_thickness: self.wall_thickness,
            scale_size: self.scale_size,
            scale_variation: self.scale_variation,
            dot_size: self.dot_size,
            dot_gap: self.dot_gap,
        }
    }

    #[inline]
    pub fn cell_size(&self) -> CellSize {
        CellSize(self.cell_size)
    }

    pub fn wall_kind(&self) -> Result<WallRendererKind> {
        self.wall_type.parse()
    }

    /// The renderer for this style, e.g. to pass to `draw_maze`.
    pub fn wall_renderer(&self) -> Result<Box<dyn WallRenderer>> {
        let kind = self.wall_kind()?;
        let colour = match self.wall_color {
            Some(ref text) => parse_hex_colour(text)?,
            None => kind.default_colour(),
        };
        Ok(build_wall_renderer(kind, colour, &self.style_params()))
    }
}
