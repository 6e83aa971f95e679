pub const EPS: f64 = 1e-9;

//width of the iteration column in the progress log
pub const ITER_WIDTH: usize = 9;

pub const DEFAULT_MAX_ITER: u64 = 100;
