use card_mazes::{
    cells::GridCoordinate,
    colour::parse_hex_colour,
    config::MazeStyleConfig,
    generators::{self, Algorithm},
    grid::WallGrid,
    grid_displays::PathDisplay,
    occupancy::OccupancyGrid,
    pathing,
    renderers::{self, HeadingDirection, SnakeWallRenderer, WallRendererKind},
    units::{CellSize, ColumnsCount, PixelOffset, RowsCount},
};
use docopt::Docopt;
use image::{Rgb, RgbImage};
use log::{debug, info};
use rand::RngCore;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Card Mazes

Usage:
    card_mazes_driver -h | --help
    card_mazes_driver [--rows=<n>] [--cols=<n>] [--algorithm=<a>] [--seed=<s>] [--style=<kind>] [--wall-colour=<hex>] [--background=<hex>] [--cell-pixels=<n>] [--margin=<n>] [--style-file=<path>] [--image-out=<path>] [--text] [--text-out=<path>] [--occupancy] [--show-solution] [--snake-decorations] [--save-edges=<path>]

Options:
    -h --help               Show this screen.
    --rows=<n>              Number of maze rows [default: 10].
    --cols=<n>              Number of maze columns [default: 14].
    --algorithm=<a>         Generation algorithm: dfs, prims or kruskals [default: dfs].
    --seed=<s>              Random seed. The same seed always gives the same maze and picture.
    --style=<kind>          Wall style: mosaic, solid, snake or dotted. Overrides the style file.
    --wall-colour=<hex>     Wall colour such as #8B0000. Overrides the style file.
    --background=<hex>      Background colour of the maze panel [default: #FFF0F5].
    --cell-pixels=<n>       Pixel length of one cell wall. Overrides the style file.
    --margin=<n>            Pixels of background around the maze [default: 40].
    --style-file=<path>     JSON maze style, e.g. {\"wall_type\": \"snake\", \"scale_size\": 10}.
    --image-out=<path>      Output file path for the maze panel. Always PNG format.
    --text                  Print the maze as box drawing text.
    --text-out=<path>       Output file path for the box drawing text.
    --occupancy             Print the maze as wall and passage squares.
    --show-solution         Mark the route from the entrance to the exit. Shown in the text
                            rendering, or in the image when --image-out is given.
    --snake-decorations     Draw a snake head at the entrance and a tail at the exit. Always on for snake walls.
    --save-edges=<path>     Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_rows: usize,
    flag_cols: usize,
    flag_algorithm: String,
    flag_seed: Option<u64>,
    flag_style: Option<String>,
    flag_wall_colour: Option<String>,
    flag_background: String,
    flag_cell_pixels: Option<u32>,
    flag_margin: u32,
    flag_style_file: Option<String>,
    flag_image_out: Option<String>,
    flag_text: bool,
    flag_text_out: Option<String>,
    flag_occupancy: bool,
    flag_show_solution: bool,
    flag_snake_decorations: bool,
    flag_save_edges: Option<String>,
}

const SOLUTION_COLOUR: Rgb<u8> = Rgb([0xff, 0x14, 0x93]);

mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
    // Result is a typedef of std `Result` with the error type our own `Error`
    // Defines the From conversions that let try! and ? work for our `Error`.
    // ResultExt adds the `chain_err` trait method.
    use error_chain::*;
    error_chain! {

        links {
            Maze(::card_mazes::errors::Error, ::card_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            ImageSaveError(::image::ImageError);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    debug!("{:?}", args);

    let style = maze_style_from_args(&args)?;
    let algorithm = args.flag_algorithm.parse::<Algorithm>()?;
    let mut rng = generators::seeded_rng(args.flag_seed);
    let maze_grid = generators::generate_maze(RowsCount(args.flag_rows),
                                              ColumnsCount(args.flag_cols),
                                              algorithm,
                                              &mut rng)?;

    let solution = if args.flag_show_solution {
        Some(pathing::solution_path(&maze_grid).ok_or("The maze has no route from the entrance to the exit.")?)
    } else {
        None
    };

    if wants_text_render(&args) {
        let text = match solution {
            Some(ref path) => PathDisplay::new(&maze_grid, path).to_string(),
            None => maze_grid.to_string(),
        };
        match args.flag_text_out {
            Some(ref text_out) => {
                write_text_to_file(&text, text_out)
                    .chain_err(|| format!("Failed to write maze to text file {}", text_out))?
            }
            None => println!("{}", text),
        }
    }

    if args.flag_occupancy {
        println!("{}", OccupancyGrid::from_wall_grid(&maze_grid));
    }

    if let Some(ref edges_path) = args.flag_save_edges {
        save_maze_graph(&maze_grid, edges_path)?;
    }

    if let Some(ref image_out) = args.flag_image_out {
        let decorate = args.flag_snake_decorations || style.wall_kind()? == WallRendererKind::Snake;
        let panel = render_maze_panel(&maze_grid, &style, &args, solution.as_deref(), decorate, &mut rng)?;
        panel.save(image_out)
            .chain_err(|| format!("Failed to write maze image {}", image_out))?;
        info!("saved {}x{} maze panel to {}", panel.width(), panel.height(), image_out);
    }

    Ok(())
}

/// Text goes to stdout unless only an image or only the occupancy squares were asked for. A
/// solution without an image to draw it on is shown in the text.
fn wants_text_render(args: &MazeArgs) -> bool {
    let do_image_render = args.flag_image_out.is_some();
    args.flag_text || args.flag_text_out.is_some() ||
    (!do_image_render && (!args.flag_occupancy || args.flag_show_solution))
}

/// The style file, if any, with command line overrides applied on top.
fn maze_style_from_args(args: &MazeArgs) -> Result<MazeStyleConfig> {
    let mut style = match args.flag_style_file {
        Some(ref path) => MazeStyleConfig::from_json_file(path)?,
        None => MazeStyleConfig::default(),
    };
    if let Some(ref kind) = args.flag_style {
        style.wall_type = kind.clone();
    }
    if let Some(ref colour) = args.flag_wall_colour {
        style.wall_color = Some(colour.clone());
    }
    if let Some(pixels) = args.flag_cell_pixels {
        style.cell_size = pixels;
    }
    Ok(style)
}

fn render_maze_panel(maze_grid: &WallGrid,
                     style: &MazeStyleConfig,
                     args: &MazeArgs,
                     solution: Option<&[GridCoordinate]>,
                     snake_decorations: bool,
                     rng: &mut dyn RngCore)
                     -> Result<RgbImage> {

    let renderer = style.wall_renderer()?;
    let background = parse_hex_colour(&args.flag_background)?;
    let CellSize(cell) = style.cell_size();
    let margin = args.flag_margin;
    let (width, height) = renderers::panel_dimensions(maze_grid, style.cell_size(), margin)?;

    let mut panel = RgbImage::from_pixel(width, height, background);
    let offset = PixelOffset::new(margin as i32, margin as i32);

    if let Some(path) = solution {
        renderers::draw_path(&mut panel, path, offset, style.cell_size(), SOLUTION_COLOUR, (cell / 8).max(1));
    }
    let _ = renderer.draw_maze(&mut panel, rng, maze_grid, offset, style.cell_size());

    if snake_decorations {
        let half_cell = (cell / 2) as i32;
        let entrance = maze_grid.entrance();
        let exit = maze_grid.exit();
        let entrance_x = offset.x + entrance.column as i32 * cell as i32 + half_cell;
        let exit_x = offset.x + exit.column as i32 * cell as i32 + half_cell;
        let bottom = offset.y + maze_grid.rows().0 as i32 * cell as i32;

        SnakeWallRenderer::draw_snake_head(&mut panel,
                                           (entrance_x, offset.y),
                                           cell / 4 * 3 + cell % 4 * 3 / 4,
                                           renderer.base_colour(),
                                           HeadingDirection::Down);
        SnakeWallRenderer::draw_snake_tail(&mut panel,
                                           (exit_x, bottom),
                                           cell / 8 * 5 + cell % 8 * 5 / 8,
                                           renderer.base_colour(),
                                           HeadingDirection::Down);
    }
    Ok(panel)
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &WallGrid, file_path: &str) -> Result<()> {

    let graph = maze_grid.passage_graph();
    let mut graph_data = String::new();
    graph_data.push_str(graph.node_count().to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(graph.edge_count().to_string().as_ref());
    graph_data.push('\n');

    for edge in graph.raw_edges() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
