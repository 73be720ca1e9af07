pub use terrarium_core::{DnaLogic, ObstacleLogic};
pub mod arena {
    pub use terrarium_core::arena::*;
}
pub mod config {
    pub use terrarium_core::config::*;
}
pub mod environment {
    pub use terrarium_core::environment::*;
}
pub mod error {
    pub use terrarium_core::error::*;
}
pub mod genetics {
    pub use terrarium_core::genetics::*;
}
pub mod interaction {
    pub use terrarium_core::interaction::*;
}
pub mod lifecycle {
    pub use terrarium_core::lifecycle::*;
}
pub mod metrics {
    pub use terrarium_core::metrics::*;
}
pub mod snapshot {
    pub use terrarium_core::snapshot::*;
}
pub mod spatial_hash {
    pub use terrarium_core::spatial_hash::*;
}
pub mod systems {
    pub use terrarium_core::systems::*;
}

pub mod state {
    pub use terrarium_data::*;
}
pub mod world;
