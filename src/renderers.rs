//! Wall renderers turn a `WallGrid` into drawing primitives on a `Canvas`.
//!
//! Every style implements `WallRenderer::draw_wall` for a single axis aligned wall segment. The grid
//! traversal that feeds segments to a renderer is shared by all styles, see `draw_maze`.

use error_chain::bail;
use image::Rgb;
use log::{debug, trace, warn};
use rand::RngCore;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use crate::canvas::{BoundingBox, Canvas};
use crate::cells::GridCoordinate;
use crate::colour::{jitter, parse_hex_colour, scale};
use crate::errors::*;
use crate::grid::WallGrid;
use crate::units::{CellSize, PixelOffset};

/// Colour of the mosaic, solid and dotted styles when none is given.
pub const DEFAULT_WALL_COLOUR: Rgb<u8> = Rgb([0x1a, 0x1a, 0x1a]);
/// Sea green, the snake style's default.
pub const DEFAULT_SNAKE_COLOUR: Rgb<u8> = Rgb([0x2e, 0x8b, 0x57]);

const MOSAIC_JITTER_LOW: f32 = 0.7;
const MOSAIC_JITTER_HIGH: f32 = 1.3;
const SCALE_OUTLINE_FACTOR: f32 = 0.7;
const SCALE_HIGHLIGHT_FACTOR: f32 = 1.3;

/// A wall between two pixel positions. Maze walls are always horizontal or vertical.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct WallSegment {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

impl WallSegment {
    pub fn new(start: (i32, i32), end: (i32, i32)) -> WallSegment {
        WallSegment { start, end }
    }

    /// Horizontal when strictly wider than it is tall.
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        (self.end.0 - self.start.0).abs() > (self.end.1 - self.start.1).abs()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The low and high ends along the segment's axis.
    fn axis_span(&self) -> (i32, i32) {
        let (a, b) = if self.is_horizontal() {
            (self.start.0, self.end.0)
        } else {
            (self.start.1, self.end.1)
        };
        (a.min(b), a.max(b))
    }

    /// The fixed coordinate across the segment's axis.
    fn across(&self) -> i32 {
        if self.is_horizontal() {
            self.start.1
        } else {
            self.start.0
        }
    }

    /// Pixel position `along` the axis, shifted `across_offset` pixels across it.
    fn point(&self, along: i32, across_offset: i32) -> (i32, i32) {
        if self.is_horizontal() {
            (along, self.across() + across_offset)
        } else {
            (self.across() + across_offset, along)
        }
    }
}

/// The available wall styles.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum WallRendererKind {
    Mosaic,
    Solid,
    Snake,
    Dotted,
}

impl WallRendererKind {
    pub const ALL: [WallRendererKind; 4] = [WallRendererKind::Mosaic,
                                            WallRendererKind::Solid,
                                            WallRendererKind::Snake,
                                            WallRendererKind::Dotted];

    pub fn name(self) -> &'static str {
        match self {
            WallRendererKind::Mosaic => "mosaic",
            WallRendererKind::Solid => "solid",
            WallRendererKind::Snake => "snake",
            WallRendererKind::Dotted => "dotted",
        }
    }

    pub fn default_colour(self) -> Rgb<u8> {
        match self {
            WallRendererKind::Snake => DEFAULT_SNAKE_COLOUR,
            _ => DEFAULT_WALL_COLOUR,
        }
    }

    pub fn valid_names() -> String {
        WallRendererKind::ALL.iter().map(|k| k.name()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for WallRendererKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WallRendererKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<WallRendererKind> {
        WallRendererKind::ALL.iter()
            .cloned()
            .find(|k| k.name() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| ErrorKind::UnknownRenderer(s.to_string(), WallRendererKind::valid_names()).into())
    }
}

/// Every style tunable. Each renderer only reads the ones for its own style.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct WallStyleParams {
    pub tile_size: u32,
    pub tile_gap: u32,
    pub wall_thickness: u32,
    pub scale_size: u32,
    pub scale_variation: f32,
    pub dot_size: u32,
    pub dot_gap: u32,
}

impl Default for WallStyleParams {
    fn default() -> WallStyleParams {
        WallStyleParams {
            tile_size: 6,
            tile_gap: 2,
            wall_thickness: 4,
            scale_size: 8,
            scale_variation: 0.2,
            dot_size: 4,
            dot_gap: 4,
        }
    }
}

impl WallStyleParams {
    /// Names of the tunables changed from their defaults that `kind` does not use.
    pub fn ignored_overrides(&self, kind: WallRendererKind) -> Vec<&'static str> {
        let defaults = WallStyleParams::default();
        let changed = [("tile_size", self.tile_size != defaults.tile_size, WallRendererKind::Mosaic),
                       ("tile_gap", self.tile_gap != defaults.tile_gap, WallRendererKind::Mosaic),
                       ("wall_thickness",
                        self.wall_thickness != defaults.wall_thickness,
                        WallRendererKind::Solid),
                       ("scale_size", self.scale_size != defaults.scale_size, WallRendererKind::Snake),
                       ("scale_variation",
                        (self.scale_variation - defaults.scale_variation).abs() > f32::EPSILON,
                        WallRendererKind::Snake),
                       ("dot_size", self.dot_size != defaults.dot_size, WallRendererKind::Dotted),
                       ("dot_gap", self.dot_gap != defaults.dot_gap, WallRendererKind::Dotted)];
        changed.iter()
            .filter(|&&(_, is_changed, used_by)| is_changed && used_by != kind)
            .map(|&(name, _, _)| name)
            .collect()
    }
}

/// A maze wall drawing style.
///
/// Renderers are stateless; any randomness comes from the generator passed to each call, so a seeded
/// generator reproduces the same picture.
pub trait WallRenderer: fmt::Debug {
    fn kind(&self) -> WallRendererKind;

    fn base_colour(&self) -> Rgb<u8>;

    /// Draw one wall between `segment.start` and `segment.end` in absolute pixel coordinates.
    /// A zero length segment draws nothing.
    fn draw_wall(&self, canvas: &mut dyn Canvas, rng: &mut dyn RngCore, segment: WallSegment);

    /// See the free function `draw_maze`.
    fn draw_maze(&self,
                 canvas: &mut dyn Canvas,
                 rng: &mut dyn RngCore,
                 grid: &WallGrid,
                 offset: PixelOffset,
                 cell_size: CellSize)
                 -> usize {
        draw_maze(self, canvas, rng, grid, offset, cell_size)
    }
}

/// Pixel box `(x0, y0, x1, y1)` of the cell at `coord`, or `None` when it does not fit in `i32`.
fn cell_pixel_box(coord: GridCoordinate, offset: PixelOffset, size: i32) -> Option<(i32, i32, i32, i32)> {
    let x0 = i32::try_from(coord.column).ok()?.checked_mul(size)?.checked_add(offset.x)?;
    let y0 = i32::try_from(coord.row).ok()?.checked_mul(size)?.checked_add(offset.y)?;
    Some((x0, y0, x0.checked_add(size)?, y0.checked_add(size)?))
}

/// Every standing wall of `grid` exactly once, with the maze's top left corner at `offset`.
///
/// Cells are visited in row-major order giving their north then west walls. The east walls of the
/// last column and the south walls of the last row follow. Walls of cells whose pixel position
/// does not fit in `i32` are left out.
pub fn wall_segments(grid: &WallGrid, offset: PixelOffset, cell_size: CellSize) -> Vec<WallSegment> {
    let size = match i32::try_from(cell_size.0) {
        Ok(size) => size,
        Err(_) => {
            warn!("cell size {} is too large to draw", cell_size.0);
            return Vec::new();
        }
    };
    let mut segments = Vec::with_capacity(grid.size() * 2 + grid.rows().0 + grid.columns().0);

    for coord in grid.iter() {
        if let (Some(cell), Some((x0, y0, x1, y1))) = (grid.cell(coord), cell_pixel_box(coord, offset, size)) {
            if cell.north {
                segments.push(WallSegment::new((x0, y0), (x1, y0)));
            }
            if cell.west {
                segments.push(WallSegment::new((x0, y0), (x0, y1)));
            }
        }
    }

    if let Some(last_column) = grid.iter_column().last() {
        for coord in last_column {
            if grid.cell(coord).map_or(false, |c| c.east) {
                if let Some((_, y0, x1, y1)) = cell_pixel_box(coord, offset, size) {
                    segments.push(WallSegment::new((x1, y0), (x1, y1)));
                }
            }
        }
    }

    if let Some(last_row) = grid.iter_row().last() {
        for coord in last_row {
            if grid.cell(coord).map_or(false, |c| c.south) {
                if let Some((x0, _, x1, y1)) = cell_pixel_box(coord, offset, size) {
                    segments.push(WallSegment::new((x0, y1), (x1, y1)));
                }
            }
        }
    }
    segments
}

/// Pixel width and height of a maze panel: the grid at `cell_size` plus `margin` on every side.
/// Fails when the panel is larger than an `i32` pixel coordinate can address.
pub fn panel_dimensions(grid: &WallGrid, cell_size: CellSize, margin: u32) -> Result<(u32, u32)> {
    let side = |cells: usize| {
        u32::try_from(cells)
            .ok()
            .and_then(|cells| cells.checked_mul(cell_size.0))
            .and_then(|pixels| margin.checked_mul(2).and_then(|margins| pixels.checked_add(margins)))
            .filter(|&pixels| i32::try_from(pixels).is_ok())
    };
    match (side(grid.columns().0), side(grid.rows().0)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => bail!(ErrorKind::PanelTooLarge(grid.rows().0, grid.columns().0, cell_size.0, margin)),
    }
}

/// Draw every standing wall of `grid` once with `renderer`, in `wall_segments` order.
/// Returns the number of segments drawn, which is zero for a zero cell size.
pub fn draw_maze<W>(renderer: &W,
                    canvas: &mut dyn Canvas,
                    rng: &mut dyn RngCore,
                    grid: &WallGrid,
                    offset: PixelOffset,
                    cell_size: CellSize)
                    -> usize
    where W: WallRenderer + ?Sized
{
    let mut segments_drawn = 0;
    for segment in wall_segments(grid, offset, cell_size) {
        if !segment.is_empty() {
            renderer.draw_wall(canvas, rng, segment);
            segments_drawn += 1;
        }
    }

    debug!("drew {} wall segments in {} style", segments_drawn, renderer.kind());
    segments_drawn
}

/// Connect the centres of the cells along `path` with a line, e.g. to show a maze solution.
pub fn draw_path(canvas: &mut dyn Canvas,
                 path: &[GridCoordinate],
                 offset: PixelOffset,
                 cell_size: CellSize,
                 colour: Rgb<u8>,
                 width: u32) {
    let size = match i32::try_from(cell_size.0) {
        Ok(size) => size,
        Err(_) => return,
    };
    let centre = |coord: &GridCoordinate| {
        let (x0, y0, _, _) = cell_pixel_box(*coord, offset, size)?;
        Some((x0.checked_add(size / 2)?, y0.checked_add(size / 2)?))
    };

    if let [only] = path {
        if let Some((cx, cy)) = centre(only) {
            let r = i32::try_from(width / 2).unwrap_or(i32::MAX).max(1);
            canvas.fill_ellipse(BoundingBox::around(cx, cy, r, r), colour, None);
        }
        return;
    }
    for pair in path.windows(2) {
        // Steps off the addressable pixel range are not drawn.
        if let (Some(from), Some(to)) = (centre(&pair[0]), centre(&pair[1])) {
            canvas.line(from, to, colour, width);
        }
    }
}

/// Walls as rows of small rectangular tiles, each a randomly lighter or darker shade of the base
/// colour.
#[derive(Debug, Clone)]
pub struct MosaicWallRenderer {
    base_colour: Rgb<u8>,
    tile_size: u32,
    gap: u32,
}

impl MosaicWallRenderer {
    pub fn new(base_colour: Rgb<u8>, tile_size: u32, gap: u32) -> MosaicWallRenderer {
        MosaicWallRenderer {
            base_colour,
            tile_size,
            gap,
        }
    }
}

impl Default for MosaicWallRenderer {
    fn default() -> MosaicWallRenderer {
        let params = WallStyleParams::default();
        MosaicWallRenderer::new(DEFAULT_WALL_COLOUR, params.tile_size, params.tile_gap)
    }
}

impl WallRenderer for MosaicWallRenderer {
    fn kind(&self) -> WallRendererKind {
        WallRendererKind::Mosaic
    }

    fn base_colour(&self) -> Rgb<u8> {
        self.base_colour
    }

    fn draw_wall(&self, canvas: &mut dyn Canvas, rng: &mut dyn RngCore, segment: WallSegment) {
        if segment.is_empty() {
            return;
        }
        let (start, end) = segment.axis_span();
        let tile = self.tile_size as i32;
        let half_tile = tile / 2;
        let step = tile.saturating_add(self.gap as i32).max(1);

        let mut pos = start;
        while pos < end {
            let colour = jitter(self.base_colour, MOSAIC_JITTER_LOW, MOSAIC_JITTER_HIGH, rng);
            let tile_end = pos.saturating_add(tile).min(end);
            let (x0, y0) = segment.point(pos, -half_tile);
            let (x1, y1) = segment.point(tile_end, half_tile);
            canvas.fill_rect(BoundingBox::new(x0, y0, x1, y1), colour);
            pos = match pos.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }
    }
}

/// Plain lines of a fixed thickness.
#[derive(Debug, Clone)]
pub struct SolidWallRenderer {
    base_colour: Rgb<u8>,
    thickness: u32,
}

impl SolidWallRenderer {
    pub fn new(base_colour: Rgb<u8>, thickness: u32) -> SolidWallRenderer {
        SolidWallRenderer {
            base_colour,
            thickness,
        }
    }
}

impl Default for SolidWallRenderer {
    fn default() -> SolidWallRenderer {
        SolidWallRenderer::new(DEFAULT_WALL_COLOUR, WallStyleParams::default().wall_thickness)
    }
}

impl WallRenderer for SolidWallRenderer {
    fn kind(&self) -> WallRendererKind {
        WallRendererKind::Solid
    }

    fn base_colour(&self) -> Rgb<u8> {
        self.base_colour
    }

    fn draw_wall(&self, canvas: &mut dyn Canvas, _: &mut dyn RngCore, segment: WallSegment) {
        if segment.is_empty() {
            return;
        }
        canvas.line(segment.start, segment.end, self.base_colour, self.thickness);
    }
}

/// Evenly spaced round dots.
#[derive(Debug, Clone)]
pub struct DottedWallRenderer {
    base_colour: Rgb<u8>,
    dot_size: u32,
    gap: u32,
}

impl DottedWallRenderer {
    pub fn new(base_colour: Rgb<u8>, dot_size: u32, gap: u32) -> DottedWallRenderer {
        DottedWallRenderer {
            base_colour,
            dot_size,
            gap,
        }
    }
}

impl Default for DottedWallRenderer {
    fn default() -> DottedWallRenderer {
        let params = WallStyleParams::default();
        DottedWallRenderer::new(DEFAULT_WALL_COLOUR, params.dot_size, params.dot_gap)
    }
}

impl WallRenderer for DottedWallRenderer {
    fn kind(&self) -> WallRendererKind {
        WallRendererKind::Dotted
    }

    fn base_colour(&self) -> Rgb<u8> {
        self.base_colour
    }

    fn draw_wall(&self, canvas: &mut dyn Canvas, _: &mut dyn RngCore, segment: WallSegment) {
        if segment.is_empty() {
            return;
        }
        let (start, end) = segment.axis_span();
        let radius = (self.dot_size / 2) as i32;
        let step = (self.dot_size.saturating_add(self.gap) as i32).max(1);

        let mut pos = start.saturating_add(radius);
        while pos < end {
            let (cx, cy) = segment.point(pos, 0);
            canvas.fill_ellipse(BoundingBox::around(cx, cy, radius, radius), self.base_colour, None);
            pos = match pos.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }
    }
}

/// Which way a snake decoration faces on the page.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum HeadingDirection {
    Up,
    Down,
}

impl HeadingDirection {
    #[inline]
    fn sign(self) -> i32 {
        match self {
            HeadingDirection::Up => -1,
            HeadingDirection::Down => 1,
        }
    }
}

/// Overlapping elliptical scales in two interleaved rows, for snake themed mazes.
#[derive(Debug, Clone)]
pub struct SnakeWallRenderer {
    base_colour: Rgb<u8>,
    scale_size: u32,
    scale_variation: f32,
}

impl SnakeWallRenderer {
    pub fn new(base_colour: Rgb<u8>, scale_size: u32, scale_variation: f32) -> SnakeWallRenderer {
        SnakeWallRenderer {
            base_colour,
            scale_size,
            scale_variation: scale_variation.abs(),
        }
    }

    fn draw_scale(&self, canvas: &mut dyn Canvas, rng: &mut dyn RngCore, centre: (i32, i32)) {
        let half = (self.scale_size / 2) as i32;
        let bounds = BoundingBox::around(centre.0, centre.1, half, half);
        let fill = jitter(self.base_colour,
                          1.0 - self.scale_variation,
                          1.0 + self.scale_variation,
                          rng);
        canvas.fill_ellipse(bounds, fill, Some(scale(self.base_colour, SCALE_OUTLINE_FACTOR)));

        let inner = (half - 1).max(1);
        canvas.arc(BoundingBox::around(centre.0, centre.1, inner, inner),
                   200.0,
                   340.0,
                   scale(self.base_colour, SCALE_HIGHLIGHT_FACTOR),
                   1);
    }

    /// An oval head with slit-pupil eyes and a forked tongue, `size` pixels long in the direction of
    /// travel.
    pub fn draw_snake_head(canvas: &mut dyn Canvas,
                           centre: (i32, i32),
                           size: u32,
                           colour: Rgb<u8>,
                           direction: HeadingDirection) {
        let sign = direction.sign();
        let (cx, cy) = centre;
        let length = size as f32;
        let half_length = (length / 2.0) as i32;
        let half_width = (length * 0.35) as i32;

        canvas.fill_ellipse(BoundingBox::around(cx, cy, half_width, half_length),
                            colour,
                            Some(scale(colour, SCALE_OUTLINE_FACTOR)));

        let eye_y = cy + sign * (length * 0.15) as i32;
        let eye_radius = ((length / 8.0) as i32).max(1);
        let pupil_half_width = (eye_radius / 3).max(1);
        for &side in [-1, 1].iter() {
            let eye_x = cx + side * (length * 0.18) as i32;
            canvas.fill_ellipse(BoundingBox::around(eye_x, eye_y, eye_radius, eye_radius),
                                Rgb([240, 230, 140]),
                                None);
            canvas.fill_ellipse(BoundingBox::around(eye_x, eye_y, pupil_half_width, eye_radius),
                                Rgb([10, 10, 10]),
                                None);
        }

        let tongue_colour = Rgb([200, 30, 30]);
        let snout = (cx, cy + sign * half_length);
        let tongue_tip = (cx, snout.1 + sign * (length * 0.3) as i32);
        canvas.line(snout, tongue_tip, tongue_colour, 2);
        let fork_x = (length * 0.1).max(1.0) as i32;
        let fork_y = (length * 0.12).max(1.0) as i32;
        for &side in [-1, 1].iter() {
            canvas.line(tongue_tip,
                        (tongue_tip.0 + side * fork_x, tongue_tip.1 + sign * fork_y),
                        tongue_colour,
                        1);
        }
        trace!("snake head at {:?} facing {:?}", centre, direction);
    }

    /// A tail tapering from body width at `start` to a point, followed by a rattle of shrinking
    /// segments, pointing in the direction of travel.
    pub fn draw_snake_tail(canvas: &mut dyn Canvas,
                           start: (i32, i32),
                           size: u32,
                           colour: Rgb<u8>,
                           direction: HeadingDirection) {
        let sign = direction.sign();
        let (sx, sy) = start;
        let length = size as f32;
        let half_width = ((length * 0.25) as i32).max(1);
        let tip = (sx, sy + sign * length as i32);

        canvas.fill_polygon(&[(sx - half_width, sy), (sx + half_width, sy), tip], colour);

        let rattle_colour = scale(colour, SCALE_HIGHLIGHT_FACTOR);
        let outline = scale(colour, SCALE_OUTLINE_FACTOR);
        let mut segment_size = length * 0.3;
        let mut along = tip.1;
        for _ in 0..3 {
            let half = ((segment_size / 2.0) as i32).max(1);
            let centre_y = along + sign * half;
            canvas.fill_ellipse(BoundingBox::around(sx, centre_y, half, half), rattle_colour, Some(outline));
            along = centre_y + sign * half;
            segment_size *= 0.8;
        }
        trace!("snake tail at {:?} facing {:?}", start, direction);
    }
}

impl Default for SnakeWallRenderer {
    fn default() -> SnakeWallRenderer {
        let params = WallStyleParams::default();
        SnakeWallRenderer::new(DEFAULT_SNAKE_COLOUR, params.scale_size, params.scale_variation)
    }
}

impl WallRenderer for SnakeWallRenderer {
    fn kind(&self) -> WallRendererKind {
        WallRendererKind::Snake
    }

    fn base_colour(&self) -> Rgb<u8> {
        self.base_colour
    }

    fn draw_wall(&self, canvas: &mut dyn Canvas, rng: &mut dyn RngCore, segment: WallSegment) {
        if segment.is_empty() {
            return;
        }
        let (start, end) = segment.axis_span();
        let size = self.scale_size as i32;
        let step = size.saturating_sub(2).max(1);
        let first = start.saturating_add(size / 2);

        // Offset row goes underneath so the main row overlaps it.
        for pos in scale_positions(first.saturating_add(step / 2), end, step) {
            self.draw_scale(canvas, rng, segment.point(pos, size / 4));
        }
        for pos in scale_positions(first, end, step) {
            self.draw_scale(canvas, rng, segment.point(pos, 0));
        }
    }
}

/// `first`, `first + step`, ... up to but excluding `end`.
fn scale_positions(first: i32, end: i32, step: i32) -> impl Iterator<Item = i32> {
    std::iter::successors(Some(first), move |&pos| pos.checked_add(step)).take_while(move |&pos| pos < end)
}

/// Build the renderer for a style with an already parsed colour.
pub fn build_wall_renderer(kind: WallRendererKind,
                           base_colour: Rgb<u8>,
                           params: &WallStyleParams)
                           -> Box<dyn WallRenderer> {
    for name in params.ignored_overrides(kind) {
        warn!("style parameter {} is not used by {} walls", name, kind);
    }

    match kind {
        WallRendererKind::Mosaic => {
            Box::new(MosaicWallRenderer::new(base_colour, params.tile_size, params.tile_gap))
        }
        WallRendererKind::Solid => Box::new(SolidWallRenderer::new(base_colour, params.wall_thickness)),
        WallRendererKind::Snake => {
            Box::new(SnakeWallRenderer::new(base_colour, params.scale_size, params.scale_variation))
        }
        WallRendererKind::Dotted => {
            Box::new(DottedWallRenderer::new(base_colour, params.dot_size, params.dot_gap))
        }
    }
}

/// Look up a renderer by style name (`mosaic`, `solid`, `snake` or `dotted`).
///
/// Without a `base_colour` the style's own default colour is used.
pub fn get_wall_renderer(kind: &str,
                         base_colour: Option<&str>,
                         params: &WallStyleParams)
                         -> Result<Box<dyn WallRenderer>> {
    let kind = kind.parse::<WallRendererKind>()?;
    let colour = match base_colour {
        Some(text) => parse_hex_colour(text)?,
        None => kind.default_colour(),
    };
    Ok(build_wall_renderer(kind, colour, params))
}

#[cfg(test)]
mod tests {
    use crate::utils::FnvHashSet;
    use image::RgbImage;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};
    use crate::generators::{generate_maze, Algorithm};
    use crate::units::{ColumnsCount, RowsCount};

    fn rng(seed: u64) -> XorShiftRng {
        XorShiftRng::seed_from_u64(seed)
    }

    fn maze(rows: usize, columns: usize, seed: u64) -> WallGrid {
        generate_maze(RowsCount(rows), ColumnsCount(columns), Algorithm::RecursiveBacktracker, &mut rng(seed))
            .expect("valid maze dimensions")
    }

    fn record_wall(renderer: &dyn WallRenderer, segment: WallSegment, seed: u64) -> Vec<DrawCommand> {
        let mut canvas = RecordingCanvas::new(500, 500);
        renderer.draw_wall(&mut canvas, &mut rng(seed), segment);
        canvas.commands().to_vec()
    }

    fn renderer(kind: &str) -> Box<dyn WallRenderer> {
        get_wall_renderer(kind, None, &WallStyleParams::default()).expect("known renderer")
    }

    #[test]
    fn segment_orientation() {
        assert!(WallSegment::new((0, 5), (20, 5)).is_horizontal());
        assert!(!WallSegment::new((5, 0), (5, 20)).is_horizontal());
        assert_eq!(WallSegment::new((20, 5), (0, 5)).axis_span(), (0, 20));
        assert_eq!(WallSegment::new((5, 20), (5, 0)).point(7, 2), (7, 7));
        assert_eq!(WallSegment::new((0, 5), (20, 5)).point(7, 2), (7, 7));
        assert_eq!(WallSegment::new((0, 5), (20, 5)).point(12, -3), (12, 2));
        assert!(WallSegment::new((3, 3), (3, 3)).is_empty());
    }

    #[test]
    fn one_draw_per_wall_without_duplicates() {
        let solid = SolidWallRenderer::new(DEFAULT_WALL_COLOUR, 2);
        for &(rows, columns) in [(1, 1), (1, 6), (6, 1), (7, 9)].iter() {
            let grid = maze(rows, columns, 11);
            let mut canvas = RecordingCanvas::new(400, 400);
            let drawn = solid.draw_maze(&mut canvas, &mut rng(1), &grid, PixelOffset::new(5, 5), CellSize(20));

            let lines = canvas.commands()
                .iter()
                .map(|command| match *command {
                    DrawCommand::Line { from, to, .. } => (from, to),
                    ref other => panic!("solid walls drew {:?}", other),
                })
                .collect::<Vec<_>>();
            let distinct = lines.iter().cloned().collect::<FnvHashSet<_>>();

            assert_eq!(drawn, grid.wall_segments_count());
            assert_eq!(lines.len(), drawn);
            assert_eq!(distinct.len(), drawn);
        }
    }

    #[test]
    fn small_maze_stays_inside_its_area() {
        let grid = maze(5, 5, 3);
        let solid = get_wall_renderer("solid", Some("#000000"), &WallStyleParams {
                wall_thickness: 2,
                ..WallStyleParams::default()
            })
            .unwrap();
        let mut canvas = RecordingCanvas::new(100, 100);
        let drawn = draw_maze(&*solid, &mut canvas, &mut rng(0), &grid, PixelOffset::default(), CellSize(20));

        assert_eq!(canvas.touched_bounds(), Some(BoundingBox::new(0, 0, 100, 100)));
        assert_eq!(drawn, grid.wall_segments_count());
        assert_eq!(canvas.commands().len(), drawn);
    }

    #[test]
    fn entrance_and_exit_are_left_open() {
        let grid = maze(3, 5, 8);
        let mut canvas = RecordingCanvas::new(100, 100);
        let _ = renderer("solid").draw_maze(&mut canvas, &mut rng(0), &grid, PixelOffset::default(), CellSize(10));

        let has_line = |from, to| {
            canvas.commands().iter().any(|c| match *c {
                DrawCommand::Line { from: f, to: t, .. } => f == from && t == to,
                _ => false,
            })
        };
        assert!(!has_line((20, 0), (30, 0)));
        assert!(!has_line((20, 30), (30, 30)));
        assert!(has_line((0, 0), (10, 0)));
        assert!(has_line((0, 30), (10, 30)));
    }

    #[test]
    fn randomised_styles_depend_on_the_seed() {
        let long_wall = WallSegment::new((0, 50), (400, 50));
        for kind in ["mosaic", "snake"].iter() {
            let r = renderer(kind);
            assert_eq!(record_wall(&*r, long_wall, 4), record_wall(&*r, long_wall, 4));
            assert_ne!(record_wall(&*r, long_wall, 4), record_wall(&*r, long_wall, 5), "{}", kind);
        }

        let dotted = renderer("dotted");
        assert_eq!(record_wall(&*dotted, long_wall, 4), record_wall(&*dotted, long_wall, 5));
    }

    #[test]
    fn mosaic_tiles() {
        let mosaic = MosaicWallRenderer::new(Rgb([100, 100, 100]), 6, 2);
        let commands = record_wall(&mosaic, WallSegment::new((10, 40), (30, 40)), 2);
        // tiles start at 10, 18 and 26, the last one cut short at the wall end
        let expected_bounds = [BoundingBox::new(10, 37, 16, 43),
                               BoundingBox::new(18, 37, 24, 43),
                               BoundingBox::new(26, 37, 30, 43)];
        assert_eq!(commands.len(), 3);
        for (command, expected) in commands.iter().zip(expected_bounds.iter()) {
            match *command {
                DrawCommand::Rect { bounds, fill: Rgb([r, g, b]) } => {
                    assert_eq!(bounds, *expected);
                    assert!(r >= 70 && r <= 130 && r == g && g == b);
                }
                ref other => panic!("mosaic drew {:?}", other),
            }
        }

        let vertical = record_wall(&mosaic, WallSegment::new((40, 30), (40, 10)), 2);
        assert_eq!(vertical[0].extent(), Some(BoundingBox::new(37, 10, 43, 16)));
    }

    #[test]
    fn dots_along_the_wall() {
        let dotted = DottedWallRenderer::new(DEFAULT_WALL_COLOUR, 4, 4);
        let commands = record_wall(&dotted, WallSegment::new((0, 10), (20, 10)), 0);
        let centres = commands.iter()
            .filter_map(DrawCommand::extent)
            .map(|b| b.centre())
            .collect::<Vec<_>>();
        assert_eq!(centres, vec![(2, 10), (10, 10), (18, 10)]);
    }

    #[test]
    fn snake_scales_overlap_in_two_rows() {
        let snake = SnakeWallRenderer::default();
        let commands = record_wall(&snake, WallSegment::new((0, 0), (0, 40)), 9);
        let scales = commands.iter()
            .filter_map(|c| match *c {
                DrawCommand::Ellipse { bounds, outline, .. } => Some((bounds.centre(), outline)),
                _ => None,
            })
            .collect::<Vec<_>>();
        let highlights = commands.iter().filter(|c| matches!(**c, DrawCommand::Arc { .. })).count();

        // main row at 4, 10, .. 34; the offset row at 7, 13, .. 37 shifted 2 pixels across
        assert_eq!(scales.len(), 12);
        assert_eq!(highlights, scales.len());
        assert_eq!(scales[0].0, (2, 7));
        assert_eq!(scales[6].0, (0, 4));
        assert!(scales.iter().all(|&(_, outline)| outline == Some(scale(DEFAULT_SNAKE_COLOUR, 0.7))));
    }

    #[test]
    fn snake_decorations_face_their_direction() {
        let mut down = RecordingCanvas::new(200, 200);
        SnakeWallRenderer::draw_snake_head(&mut down, (100, 50), 30, DEFAULT_SNAKE_COLOUR, HeadingDirection::Down);
        let mut up = RecordingCanvas::new(200, 200);
        SnakeWallRenderer::draw_snake_head(&mut up, (100, 50), 30, DEFAULT_SNAKE_COLOUR, HeadingDirection::Up);

        let down_bounds = down.touched_bounds().unwrap();
        let up_bounds = up.touched_bounds().unwrap();
        // the tongue sticks out past the snout
        assert!(down_bounds.y1 > 65);
        assert!(up_bounds.y0 < 35);
        assert_eq!(down.commands().len(), 1 + 4 + 3);

        let mut tail = RecordingCanvas::new(200, 200);
        SnakeWallRenderer::draw_snake_tail(&mut tail, (100, 150), 25, DEFAULT_SNAKE_COLOUR, HeadingDirection::Down);
        let tail_bounds = tail.touched_bounds().unwrap();
        assert_eq!(tail_bounds.y0, 150);
        assert!(tail_bounds.y1 > 175);
        assert!(matches!(tail.commands()[0], DrawCommand::Polygon { .. }));
    }

    #[test]
    fn zero_length_walls_draw_nothing() {
        let point = WallSegment::new((12, 12), (12, 12));
        for kind in WallRendererKind::ALL.iter() {
            let r = renderer(kind.name());
            assert!(record_wall(&*r, point, 0).is_empty(), "{}", kind);
        }

        let grid = maze(3, 3, 1);
        let mut canvas = RecordingCanvas::new(10, 10);
        assert_eq!(renderer("mosaic").draw_maze(&mut canvas, &mut rng(0), &grid, PixelOffset::default(), CellSize(0)),
                   0);
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn factory_names_and_colours() {
        for kind in WallRendererKind::ALL.iter() {
            let r = renderer(kind.name());
            assert_eq!(r.kind(), *kind);
            assert_eq!(r.base_colour(), kind.default_colour());
        }
        assert_eq!(renderer(" Snake ").kind(), WallRendererKind::Snake);

        let red = get_wall_renderer("dotted", Some("#8B0000"), &WallStyleParams::default()).unwrap();
        assert_eq!(red.base_colour(), Rgb([0x8b, 0, 0]));

        let err = get_wall_renderer("zigzag", None, &WallStyleParams::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("zigzag"));
        for kind in WallRendererKind::ALL.iter() {
            assert!(message.contains(kind.name()), "{} missing from {}", kind, message);
        }

        let err = get_wall_renderer("solid", Some("#12"), &WallStyleParams::default()).unwrap_err();
        assert!(matches!(*err.kind(), ErrorKind::InvalidColour(_)));
    }

    #[test]
    fn only_relevant_parameters_are_used() {
        let params = WallStyleParams {
            tile_size: 10,
            dot_gap: 1,
            ..WallStyleParams::default()
        };
        assert_eq!(params.ignored_overrides(WallRendererKind::Mosaic), vec!["dot_gap"]);
        assert_eq!(params.ignored_overrides(WallRendererKind::Solid), vec!["tile_size", "dot_gap"]);
        assert!(WallStyleParams::default().ignored_overrides(WallRendererKind::Snake).is_empty());
    }

    #[test]
    fn same_seed_same_pixels() {
        let grid = maze(6, 6, 21);
        let render = |kind: &str| {
            let mut image = RgbImage::from_pixel(130, 130, Rgb([255, 255, 255]));
            let _ = renderer(kind).draw_maze(&mut image, &mut rng(77), &grid, PixelOffset::new(5, 5), CellSize(20));
            image
        };
        for kind in WallRendererKind::ALL.iter() {
            let first = render(kind.name());
            let second = render(kind.name());
            assert_eq!(first.as_raw(), second.as_raw(), "{}", kind);
            assert!(first.pixels().any(|&p| p != Rgb([255, 255, 255])));
        }
    }

    #[test]
    fn solution_path_through_cell_centres() {
        let mut canvas = RecordingCanvas::new(100, 100);
        let path = [GridCoordinate::new(0, 0), GridCoordinate::new(0, 1), GridCoordinate::new(1, 1)];
        draw_path(&mut canvas, &path, PixelOffset::new(10, 0), CellSize(20), Rgb([255, 0, 0]), 3);
        assert_eq!(canvas.commands(),
                   &[DrawCommand::Line { from: (20, 10), to: (40, 10), colour: Rgb([255, 0, 0]), width: 3 },
                     DrawCommand::Line { from: (40, 10), to: (40, 30), colour: Rgb([255, 0, 0]), width: 3 }]);

        let mut single = RecordingCanvas::new(100, 100);
        draw_path(&mut single, &path[..1], PixelOffset::default(), CellSize(20), Rgb([255, 0, 0]), 3);
        assert_eq!(single.commands().len(), 1);
        draw_path(&mut single, &[], PixelOffset::default(), CellSize(20), Rgb([255, 0, 0]), 3);
        assert_eq!(single.commands().len(), 1);
    }

    #[test]
    fn walls_off_the_pixel_range_are_left_out() {
        let wide = WallGrid::new(RowsCount(1), ColumnsCount(70_000)).unwrap();
        let segments = wall_segments(&wide, PixelOffset::default(), CellSize(70_000));

        // Columns 0..=30677 end at or below i32::MAX; each keeps its north, west and south walls.
        assert_eq!(segments.len(), 3 * 30_678);
        assert!(segments.iter().all(|s| s.start.0 >= 0 && s.end.0 >= s.start.0 && s.end.1 >= s.start.1));

        let mut canvas = RecordingCanvas::new(100, 100);
        let drawn = renderer("dotted").draw_maze(&mut canvas,
                                                 &mut rng(2),
                                                 &WallGrid::new(RowsCount(1), ColumnsCount(3)).unwrap(),
                                                 PixelOffset::new(i32::MAX - 50, 0),
                                                 CellSize(40));
        // Only the first cell fits left of i32::MAX: its north, west and south walls.
        assert_eq!(drawn, 3);

        assert!(wall_segments(&maze(3, 3, 1), PixelOffset::default(), CellSize(u32::MAX)).is_empty());
    }

    #[test]
    fn panel_size_includes_margins() {
        let grid = maze(10, 14, 3);
        assert_eq!(panel_dimensions(&grid, CellSize(40), 40).unwrap(), (640, 480));
        assert_eq!(panel_dimensions(&grid, CellSize(0), 5).unwrap(), (10, 10));

        let wide = WallGrid::new(RowsCount(2), ColumnsCount(70_000)).unwrap();
        assert!(matches!(*panel_dimensions(&wide, CellSize(70_000), 40).unwrap_err().kind(),
                         ErrorKind::PanelTooLarge(2, 70_000, 70_000, 40)));
        assert!(panel_dimensions(&grid, CellSize(40), u32::MAX).is_err());
        assert!(panel_dimensions(&grid, CellSize(u32::MAX), 0).is_err());
    }

    #[test]
    fn path_steps_off_the_pixel_range_are_skipped() {
        let red = Rgb([255, 0, 0]);
        let path = [GridCoordinate::new(0, 0), GridCoordinate::new(0, 1), GridCoordinate::new(0, 40_000)];
        let mut canvas = RecordingCanvas::new(100, 100);
        draw_path(&mut canvas, &path, PixelOffset::default(), CellSize(70_000), red, 3);
        assert_eq!(canvas.commands(),
                   &[DrawCommand::Line { from: (35_000, 35_000), to: (105_000, 35_000), colour: red, width: 3 }]);

        let mut single = RecordingCanvas::new(100, 100);
        draw_path(&mut single, &path[2..], PixelOffset::default(), CellSize(70_000), red, 3);
        draw_path(&mut single, &path, PixelOffset::default(), CellSize(u32::MAX), red, 3);
        assert!(single.commands().is_empty());
    }
}
