// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get access to everything `error_chain!` creates.
use error_chain::*;

use crate::cells::GridCoordinate;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        Image(::image::ImageError);
        Json(::serde_json::Error);
    }

    errors {
        InvalidDimensions(rows: usize, columns: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}: rows and columns must both be at least 1",
                    rows, columns)
        }
        UnknownAlgorithm(name: String, valid: String) {
            description("unknown maze generation algorithm")
            display("unknown maze algorithm '{}'. Available algorithms: {}", name, valid)
        }
        UnknownRenderer(name: String, valid: String) {
            description("unknown wall renderer")
            display("unknown wall type '{}'. Available types: {}", name, valid)
        }
        InvalidColour(text: String) {
            description("invalid hex colour")
            display("invalid colour '{}': expected a hex colour such as #1A1A1A", text)
        }
        PanelTooLarge(rows: usize, columns: usize, cell_size: u32, margin: u32) {
            description("maze panel too large")
            display("a {}x{} maze with {} pixel cells and a {} pixel margin is too large to draw",
                    rows, columns, cell_size, margin)
        }
        InvalidCoordinate(coord: GridCoordinate) {
            description("grid coordinate outside of the grid")
            display("grid coordinate {} is outside of the grid", coord)
        }
        NotAdjacent(a: GridCoordinate, b: GridCoordinate) {
            description("cells are not adjacent")
            display("cannot carve a passage between {} and {}: the cells are not adjacent", a, b)
        }
    }
}
