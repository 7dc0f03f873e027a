pub mod christofides;
pub mod errors;
pub mod euler;
pub mod graph;
pub mod io;
pub mod log;
pub mod matching;
pub mod mst;
pub mod tour;

pub mod prelude {
    pub use super::christofides::*;
    pub use super::errors::*;
    pub use super::graph::*;
    pub use super::io::*;
    pub use super::matching::*;
    pub use super::tour::*;
}

#[cfg(test)]
mod testing;
