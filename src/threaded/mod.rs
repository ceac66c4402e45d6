//! Multi-threaded execution for the recursive multipliers.
//!
//! The recursive algorithms don't split rows across threads; they fork
//! independent sub-products and join before combining them:
//! - `fork_join::join`: two-way fork (divide-and-conquer's pair of products)
//! - `fork_join::fork_each`: n-way fork (4 quadrants, 7 Strassen products)
//! - `fork_join::ForkJoinPool`: bounded worker pool to run them on

pub mod fork_join;

pub use fork_join::ForkJoinPool;
