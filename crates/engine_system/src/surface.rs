//! Raster surfaces drawers render into.
//!
//! The scheduler never allocates, resizes or inspects a surface; it only
//! routes one to each drawer. [`SurfaceRef`] is the shared handle used for a
//! drawer's private offscreen target.

use std::cell::RefCell;
use std::rc::Rc;

/// An RGBA8 color.
pub type Rgba = [u8; 4];

/// Fully transparent black, the color of a fresh surface.
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Shared handle to an offscreen surface.
pub type SurfaceRef = Rc<RefCell<Surface>>;

/// A row-major RGBA8 pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    /// A transparent surface of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Wrap the surface in a [`SurfaceRef`] so it can be handed to a drawer
    /// as its private target.
    #[must_use]
    pub fn into_shared(self) -> SurfaceRef {
        Rc::new(RefCell::new(self))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Set one pixel. Coordinates outside the surface are ignored.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Fill a rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(width as i32).min(self.width as i32);
        let y1 = y.saturating_add(height as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for py in y0..y1 {
            let row = py as usize * self.width as usize;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }

    /// Copy the non-transparent pixels of `src` with its top-left corner at
    /// (`x`, `y`), clipped to this surface.
    pub fn blit(&mut self, src: &Surface, x: i32, y: i32) {
        for sy in 0..src.height as i32 {
            for sx in 0..src.width as i32 {
                if let Some(color) = src.pixel(sx, sy)
                    && color[3] != 0
                {
                    self.put_pixel(x + sx, y + sy, color);
                }
            }
        }
    }

    /// Number of pixels currently set to `color`.
    #[must_use]
    pub fn count_pixels(&self, color: Rgba) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [255, 0, 0, 255];
    const BLUE: Rgba = [0, 0, 255, 255];

    #[test]
    fn test_new_surface_is_transparent() {
        let s = Surface::new(4, 3);
        assert_eq!(s.pixels().len(), 12);
        assert_eq!(s.count_pixels(TRANSPARENT), 12);
    }

    #[test]
    fn test_put_pixel_ignores_out_of_bounds() {
        let mut s = Surface::new(2, 2);
        s.put_pixel(1, 1, RED);
        s.put_pixel(-1, 0, RED);
        s.put_pixel(2, 0, RED);
        assert_eq!(s.pixel(1, 1), Some(RED));
        assert_eq!(s.pixel(2, 0), None);
        assert_eq!(s.count_pixels(RED), 1);
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut s = Surface::new(4, 4);
        s.fill_rect(2, 2, 10, 10, RED);
        assert_eq!(s.count_pixels(RED), 4);
        s.fill_rect(-3, -3, 4, 4, BLUE);
        assert_eq!(s.count_pixels(BLUE), 1);
        s.fill_rect(10, 10, 2, 2, BLUE);
        assert_eq!(s.count_pixels(BLUE), 1);
    }

    #[test]
    fn test_blit_skips_transparent() {
        let mut hud = Surface::new(2, 1);
        hud.put_pixel(0, 0, RED);
        let mut screen = Surface::new(3, 3);
        screen.clear(BLUE);
        screen.blit(&hud, 1, 1);
        assert_eq!(screen.pixel(1, 1), Some(RED));
        assert_eq!(screen.pixel(2, 1), Some(BLUE));
    }

    #[test]
    fn test_shared_handle() {
        let shared = Surface::new(1, 1).into_shared();
        shared.borrow_mut().clear(RED);
        assert_eq!(shared.borrow().pixel(0, 0), Some(RED));
    }
}
