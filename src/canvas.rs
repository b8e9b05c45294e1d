//! The drawing surface wall renderers paint on.
//!
//! Any 2D raster that can fill rectangles, ellipses and polygons, and stroke lines and arcs, can be
//! a `Canvas`. An `image::RgbImage` is one (rasterised with `imageproc`), and `RecordingCanvas`
//! keeps the primitives instead of pixels.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_ellipse_mut, draw_filled_rect_mut, draw_hollow_ellipse_mut,
                         draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use std::f32::consts::PI;

/// Pixel rectangle with inclusive corners. The constructor puts the corners in order.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct BoundingBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BoundingBox {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> BoundingBox {
        BoundingBox {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Box of the given half extents around a centre point.
    pub fn around(cx: i32, cy: i32, half_width: i32, half_height: i32) -> BoundingBox {
        BoundingBox::new(cx - half_width, cy - half_height, cx + half_width, cy + half_height)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    #[inline]
    pub fn centre(&self) -> (i32, i32) {
        ((self.x0 + self.x1) / 2, (self.y0 + self.y1) / 2)
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// A 2D raster drawing surface.
pub trait Canvas {
    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    fn fill_rect(&mut self, bounds: BoundingBox, fill: Rgb<u8>);

    /// Ellipse inscribed in `bounds`, with an optional one pixel outline.
    fn fill_ellipse(&mut self, bounds: BoundingBox, fill: Rgb<u8>, outline: Option<Rgb<u8>>);

    /// Straight line `width` pixels thick. A zero length line draws nothing.
    fn line(&mut self, from: (i32, i32), to: (i32, i32), colour: Rgb<u8>, width: u32);

    /// Part of the ellipse inscribed in `bounds`, from `start_degrees` to `end_degrees`.
    /// Angles start at 3 o'clock and increase clockwise (y grows downwards).
    fn arc(&mut self,
           bounds: BoundingBox,
           start_degrees: f32,
           end_degrees: f32,
           colour: Rgb<u8>,
           width: u32);

    /// Filled polygon; the path is closed automatically.
    fn fill_polygon(&mut self, points: &[(i32, i32)], fill: Rgb<u8>);
}

/// Points along an elliptical arc, enough of them that consecutive points are a couple of pixels
/// apart.
pub fn arc_points(bounds: BoundingBox, start_degrees: f32, end_degrees: f32) -> Vec<(i32, i32)> {
    let cx = (bounds.x0 + bounds.x1) as f32 / 2.0;
    let cy = (bounds.y0 + bounds.y1) as f32 / 2.0;
    let rx = bounds.width() as f32 / 2.0;
    let ry = bounds.height() as f32 / 2.0;
    let sweep = end_degrees - start_degrees;
    if sweep <= 0.0 {
        return Vec::new();
    }

    let arc_length = sweep.to_radians() * rx.max(ry);
    let steps = ((arc_length / 2.0).ceil() as usize).max(4);
    (0..=steps)
        .map(|i| {
            let theta = (start_degrees + sweep * i as f32 / steps as f32) * PI / 180.0;
            ((cx + rx * theta.cos()).round() as i32, (cy + ry * theta.sin()).round() as i32)
        })
        .collect()
}

/// Corners of the rectangle of `width` around the segment from `from` to `to`.
fn thick_line_quad(from: (i32, i32), to: (i32, i32), width: u32) -> [(i32, i32); 4] {
    let (dx, dy) = ((to.0 - from.0) as f32, (to.1 - from.1) as f32);
    let length = (dx * dx + dy * dy).sqrt();
    let half = width as f32 / 2.0;
    let (nx, ny) = (-dy / length * half, dx / length * half);
    let offset = |p: (i32, i32), sx: f32, sy: f32| {
        ((p.0 as f32 + sx).round() as i32, (p.1 as f32 + sy).round() as i32)
    };
    [offset(from, nx, ny), offset(to, nx, ny), offset(to, -nx, -ny), offset(from, -nx, -ny)]
}

/// Drop repeated points, including a closing point equal to the first.
fn distinct_polygon_points(points: &[(i32, i32)]) -> Vec<Point<i32>> {
    let mut poly: Vec<Point<i32>> = Vec::with_capacity(points.len());
    for &(x, y) in points {
        let p = Point::new(x, y);
        if poly.last() != Some(&p) {
            poly.push(p);
        }
    }
    while poly.len() > 1 && poly.first() == poly.last() {
        let _ = poly.pop();
    }
    poly
}

impl Canvas for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn fill_rect(&mut self, bounds: BoundingBox, fill: Rgb<u8>) {
        let rect = Rect::at(bounds.x0, bounds.y0)
            .of_size(bounds.width() as u32 + 1, bounds.height() as u32 + 1);
        draw_filled_rect_mut(self, rect, fill);
    }

    fn fill_ellipse(&mut self, bounds: BoundingBox, fill: Rgb<u8>, outline: Option<Rgb<u8>>) {
        let centre = bounds.centre();
        let (rx, ry) = (bounds.width() / 2, bounds.height() / 2);
        if rx == 0 || ry == 0 {
            Canvas::fill_rect(self, bounds, outline.unwrap_or(fill));
            return;
        }
        draw_filled_ellipse_mut(self, centre, rx, ry, fill);
        if let Some(outline_colour) = outline {
            draw_hollow_ellipse_mut(self, centre, rx, ry, outline_colour);
        }
    }

    fn line(&mut self, from: (i32, i32), to: (i32, i32), colour: Rgb<u8>, width: u32) {
        if from == to {
            return;
        }
        if width <= 1 {
            draw_line_segment_mut(self,
                                  (from.0 as f32, from.1 as f32),
                                  (to.0 as f32, to.1 as f32),
                                  colour);
        } else {
            let quad = thick_line_quad(from, to, width);
            Canvas::fill_polygon(self, &quad, colour);
        }
    }

    fn arc(&mut self,
           bounds: BoundingBox,
           start_degrees: f32,
           end_degrees: f32,
           colour: Rgb<u8>,
           width: u32) {
        let points = arc_points(bounds, start_degrees, end_degrees);
        for pair in points.windows(2) {
            Canvas::line(self, pair[0], pair[1], colour, width);
        }
    }

    fn fill_polygon(&mut self, points: &[(i32, i32)], fill: Rgb<u8>) {
        let poly = distinct_polygon_points(points);
        match poly.len() {
            0 | 1 => {}
            2 => {
                draw_line_segment_mut(self,
                                      (poly[0].x as f32, poly[0].y as f32),
                                      (poly[1].x as f32, poly[1].y as f32),
                                      fill)
            }
            _ => draw_polygon_mut(self, &poly, fill),
        }
    }
}

/// One drawing primitive as issued to a `RecordingCanvas`.
#[derive(PartialEq, Clone, Debug)]
pub enum DrawCommand {
    Rect {
        bounds: BoundingBox,
        fill: Rgb<u8>,
    },
    Ellipse {
        bounds: BoundingBox,
        fill: Rgb<u8>,
        outline: Option<Rgb<u8>>,
    },
    Line {
        from: (i32, i32),
        to: (i32, i32),
        colour: Rgb<u8>,
        width: u32,
    },
    Arc {
        bounds: BoundingBox,
        start_degrees: f32,
        end_degrees: f32,
        colour: Rgb<u8>,
        width: u32,
    },
    Polygon {
        points: Vec<(i32, i32)>,
        fill: Rgb<u8>,
    },
}

impl DrawCommand {
    /// The geometric extent of the primitive, ignoring stroke width.
    pub fn extent(&self) -> Option<BoundingBox> {
        match *self {
            DrawCommand::Rect { bounds, .. } |
            DrawCommand::Ellipse { bounds, .. } |
            DrawCommand::Arc { bounds, .. } => Some(bounds),
            DrawCommand::Line { from, to, .. } => Some(BoundingBox::new(from.0, from.1, to.0, to.1)),
            DrawCommand::Polygon { ref points, .. } => {
                points.iter()
                    .map(|&(x, y)| BoundingBox::new(x, y, x, y))
                    .fold(None, |acc: Option<BoundingBox>, b| {
                        Some(acc.map_or(b, |a| a.union(&b)))
                    })
            }
        }
    }
}

/// A canvas that records every primitive drawn on it rather than rasterising.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> RecordingCanvas {
        RecordingCanvas {
            width,
            height,
            commands: Vec::new(),
        }
    }

    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Union of the extents of all recorded primitives.
    pub fn touched_bounds(&self) -> Option<BoundingBox> {
        self.commands
            .iter()
            .filter_map(DrawCommand::extent)
            .fold(None, |acc, b| Some(acc.map_or(b, |a: BoundingBox| a.union(&b))))
    }

    /// Replay the recorded primitives onto another canvas.
    pub fn replay(&self, canvas: &mut dyn Canvas) {
        for command in &self.commands {
            match *command {
                DrawCommand::Rect { bounds, fill } => canvas.fill_rect(bounds, fill),
                DrawCommand::Ellipse { bounds, fill, outline } => {
                    canvas.fill_ellipse(bounds, fill, outline)
                }
                DrawCommand::Line { from, to, colour, width } => canvas.line(from, to, colour, width),
                DrawCommand::Arc { bounds, start_degrees, end_degrees, colour, width } => {
                    canvas.arc(bounds, start_degrees, end_degrees, colour, width)
                }
                DrawCommand::Polygon { ref points, fill } => canvas.fill_polygon(points, fill),
            }
        }
    }
}

impl Canvas for RecordingCanvas {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, bounds: BoundingBox, fill: Rgb<u8>) {
        self.commands.push(DrawCommand::Rect { bounds, fill });
    }

    fn fill_ellipse(&mut self, bounds: BoundingBox, fill: Rgb<u8>, outline: Option<Rgb<u8>>) {
        self.commands.push(DrawCommand::Ellipse { bounds, fill, outline });
    }

    fn line(&mut self, from: (i32, i32), to: (i32, i32), colour: Rgb<u8>, width: u32) {
        self.commands.push(DrawCommand::Line { from, to, colour, width });
    }

    fn arc(&mut self,
           bounds: BoundingBox,
           start_degrees: f32,
           end_degrees: f32,
           colour: Rgb<u8>,
           width: u32) {
        self.commands.push(DrawCommand::Arc { bounds, start_degrees, end_degrees, colour, width });
    }

    fn fill_polygon(&mut self, points: &[(i32, i32)], fill: Rgb<u8>) {
        self.commands.push(DrawCommand::Polygon { points: points.to_vec(), fill });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn blank(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, WHITE)
    }

    fn painted(image: &RgbImage) -> usize {
        image.pixels().filter(|&&p| p != WHITE).count()
    }

    #[test]
    fn bounding_box_orders_corners() {
        let b = BoundingBox::new(10, 8, 2, 4);
        assert_eq!(b, BoundingBox { x0: 2, y0: 4, x1: 10, y1: 8 });
        assert_eq!((b.width(), b.height()), (8, 4));
        assert_eq!(b.centre(), (6, 6));
        assert_eq!(BoundingBox::around(5, 5, 2, 1), BoundingBox::new(3, 4, 7, 6));
    }

    #[test]
    fn rectangles_include_both_corners() {
        let mut image = blank(10, 10);
        Canvas::fill_rect(&mut image, BoundingBox::new(2, 2, 4, 5), RED);
        assert_eq!(painted(&image), 3 * 4);
        assert_eq!(*image.get_pixel(2, 2), RED);
        assert_eq!(*image.get_pixel(4, 5), RED);
        assert_eq!(*image.get_pixel(5, 5), WHITE);
    }

    #[test]
    fn primitives_are_clipped_to_the_image() {
        let mut image = blank(8, 8);
        Canvas::fill_rect(&mut image, BoundingBox::new(-5, -5, 20, 2), RED);
        Canvas::fill_ellipse(&mut image, BoundingBox::new(4, 4, 30, 30), RED, Some(RED));
        Canvas::line(&mut image, (-10, 6), (40, 6), RED, 3);
        Canvas::fill_polygon(&mut image, &[(-4, -4), (20, 0), (0, 20)], RED);
        assert!(painted(&image) > 0);
    }

    #[test]
    fn thick_lines_cover_their_width() {
        let mut image = blank(20, 20);
        Canvas::line(&mut image, (2, 10), (17, 10), RED, 4);
        assert_eq!(*image.get_pixel(10, 9), RED);
        assert_eq!(*image.get_pixel(10, 11), RED);
        assert_eq!(*image.get_pixel(10, 2), WHITE);

        let mut thin = blank(20, 20);
        Canvas::line(&mut thin, (2, 10), (17, 10), RED, 1);
        assert_eq!(painted(&thin), 16);
    }

    #[test]
    fn zero_length_lines_and_degenerate_polygons_draw_nothing() {
        let mut image = blank(10, 10);
        Canvas::line(&mut image, (3, 3), (3, 3), RED, 4);
        Canvas::fill_polygon(&mut image, &[(1, 1), (1, 1)], RED);
        Canvas::fill_polygon(&mut image, &[], RED);
        assert_eq!(painted(&image), 0);
    }

    #[test]
    fn arcs_follow_the_ellipse() {
        let points = arc_points(BoundingBox::new(0, 0, 20, 20), 0.0, 90.0);
        assert_eq!(points.first(), Some(&(20, 10)));
        assert_eq!(points.last(), Some(&(10, 20)));
        assert!(arc_points(BoundingBox::new(0, 0, 20, 20), 90.0, 90.0).is_empty());

        let mut image = blank(24, 24);
        Canvas::arc(&mut image, BoundingBox::new(2, 2, 22, 22), 180.0, 360.0, RED, 1);
        assert_eq!(*image.get_pixel(12, 2), RED);
        assert_eq!(*image.get_pixel(12, 22), WHITE);
    }

    #[test]
    fn recording_and_replay() {
        let mut recording = RecordingCanvas::new(50, 50);
        recording.fill_rect(BoundingBox::new(1, 1, 3, 3), RED);
        recording.line((0, 40), (30, 40), RED, 2);
        recording.fill_polygon(&[(5, 5), (45, 5), (25, 20)], RED);
        assert_eq!(recording.commands().len(), 3);
        assert_eq!(recording.touched_bounds(), Some(BoundingBox::new(0, 1, 45, 40)));
        assert_eq!(recording.dimensions(), (50, 50));

        let mut image = blank(50, 50);
        recording.replay(&mut image);
        assert_eq!(*image.get_pixel(2, 2), RED);
        assert_eq!(*image.get_pixel(15, 40), RED);

        recording.clear();
        assert_eq!(recording.touched_bounds(), None);
    }
}
