//! Reference host for anchorflex.
//!
//! [`SolverHost`] implements [`anchorflex::Host`] without any UI toolkit. It
//! records guides, views and active constraints, and solves them with a small
//! prioritized equality solver so layouts can be inspected as plain frames
//! in tests and from the command line.
//!
//! ```ignore
//! use anchorflex::{FlexLayout, row, flex};
//! use anchorflex_harness::{HostConfig, SolverHost};
//!
//! let left = flex(1.0);
//! let left_id = left.id();
//! let mut layout = FlexLayout::new(row([left, flex(2.0)]))?;
//! layout.set_root_view(SolverHost::new(HostConfig::default().with_bounds((300.0, 44.0))))?;
//!
//! let host = layout.host_mut().unwrap();
//! host.layout_if_needed();
//! assert_eq!(host.guide_frame(left_id)?.width, 100.0);
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod solver;

pub use config::HostConfig;
pub use error::HarnessError;
pub use host::SolverHost;
pub use solver::{Conflict, LinearSystem, Outcome, Solution, solve};
