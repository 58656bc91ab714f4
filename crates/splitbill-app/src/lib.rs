// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod error;
pub mod forms;
pub mod ids;
pub mod model;
pub mod registry;
pub mod seed;
pub mod split;
pub mod state;

pub use error::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use registry::*;
pub use seed::*;
pub use split::*;
pub use state::*;
