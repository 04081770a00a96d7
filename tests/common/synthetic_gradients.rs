use dmtx_hough::edges::{AccelClass, GradientFrame};
use dmtx_hough::image::{AccelGrid, ValueGrid};

/// Raw gradient planes (vertical, backslash, horizontal, slash) and the six
/// accelerator planes of a synthetic frame.
pub struct SyntheticGradients {
    pub width: usize,
    pub height: usize,
    pub sobel: [ValueGrid; 4],
    pub accels: [ValueGrid; 6],
}

fn sobel_index(class: AccelClass) -> usize {
    match class {
        AccelClass::Vertical => 0,
        AccelClass::VerticalBackslash | AccelClass::HorizontalBackslash => 1,
        AccelClass::Horizontal => 2,
        AccelClass::HorizontalSlash | AccelClass::VerticalSlash => 3,
    }
}

impl SyntheticGradients {
    /// Flat accelerators over raw planes of constant `level`.
    pub fn flat(width: usize, height: usize, level: i32) -> Self {
        let plane = || ValueGrid::from_vec(width, height, vec![level; width * height]).unwrap();
        Self {
            width,
            height,
            sobel: [plane(), plane(), plane(), plane()],
            accels: std::array::from_fn(|_| ValueGrid::new(width, height)),
        }
    }

    /// Pseudo-random accelerator and raw planes.
    pub fn noisy(width: usize, height: usize, seed: u32) -> Self {
        let mut state = seed;
        let mut next = move |range: i32| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            ((state >> 16) as i32 % (2 * range + 1)) - range
        };
        let mut plane = |range: i32| {
            let data = (0..width * height).map(|_| next(range)).collect();
            ValueGrid::from_vec(width, height, data).unwrap()
        };
        let sobel = [plane(60), plane(60), plane(60), plane(60)];
        let accels = [plane(3), plane(3), plane(3), plane(3), plane(3), plane(3)];
        Self {
            width,
            height,
            sobel,
            accels,
        }
    }

    /// Refill the raw plane behind `class` with a constant `level`.
    pub fn set_raw_level(&mut self, class: AccelClass, level: i32) {
        let (w, h) = (self.width, self.height);
        self.sobel[sobel_index(class)] = ValueGrid::from_vec(w, h, vec![level; w * h]).unwrap();
    }

    pub fn accel_mut(&mut self, class: AccelClass) -> &mut ValueGrid {
        &mut self.accels[class.index()]
    }

    /// Negative-to-positive step between columns `col` and `col + 1` on every row.
    pub fn vertical_step(&mut self, class: AccelClass, col: usize) {
        let grid = self.accel_mut(class);
        for row in 0..grid.h {
            grid.set(col, row, -10);
            grid.set(col + 1, row, 10);
        }
    }

    /// Negative-to-positive step between rows `row` and `row + 1` on every column.
    pub fn horizontal_step(&mut self, class: AccelClass, row: usize) {
        let grid = self.accel_mut(class);
        for col in 0..grid.w {
            grid.set(col, row, -10);
            grid.set(col, row + 1, 10);
        }
    }

    /// Accelerator grids wired to their raw planes, ordered as `AccelClass::ALL`.
    pub fn accel_grids(&self) -> Vec<AccelGrid<'_>> {
        AccelClass::ALL
            .iter()
            .map(|&class| {
                AccelGrid::new(
                    self.accels[class.index()].clone(),
                    class.orientation(),
                    &self.sobel[sobel_index(class)],
                )
            })
            .collect()
    }
}

pub fn frame<'a>(width: usize, height: usize, grids: &'a [AccelGrid<'a>]) -> GradientFrame<'a> {
    GradientFrame::new(
        width,
        height,
        [&grids[0], &grids[1], &grids[2], &grids[3], &grids[4], &grids[5]],
    )
    .unwrap()
}
