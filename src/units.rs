#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowIndex(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnIndex(pub usize);

/// Side length of one maze cell in pixels.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellSize(pub u32);

/// Top left pixel position of a maze on a canvas.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct PixelOffset {
    pub x: i32,
    pub y: i32,
}

impl PixelOffset {
    pub fn new(x: i32, y: i32) -> PixelOffset {
        PixelOffset { x, y }
    }
}
