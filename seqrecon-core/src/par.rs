/// Fallible map over a slice, collecting into `Result<Vec<_>>`. Runs on the
/// rayon pool with the `parallel` feature and sequentially without it; the
/// output keeps slice order either way.
macro_rules! par_try_map {
    ($slice:expr, $f:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
            $slice.par_iter().map($f).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            $slice.iter().map($f).collect()
        }
    }};
}
