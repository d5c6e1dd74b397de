pub mod d2;
pub mod d3;
mod utils;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

/// Starts the rayon pool used by the parallel sweeps. Must be awaited before building a map.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initThreads)]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}
