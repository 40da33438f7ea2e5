// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod compare;
pub mod detail;
pub mod grid;
pub mod ids;
pub mod model;
pub mod resolve;
pub mod state;

pub use compare::*;
pub use detail::*;
pub use grid::*;
pub use ids::*;
pub use model::*;
pub use resolve::*;
pub use state::*;
