use crate::lifecycle::OffspringSpec;
use terrarium_data::{DeathCause, Dna, Position, Species};
use uuid::Uuid;

/// Read-only view of another organism as seen during one organism's turn.
///
/// `H` is the storage handle type of the world that built the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrganismView<H> {
    pub handle: H,
    pub id: Uuid,
    pub species: Species,
    pub position: Position,
    pub radius: f64,
    pub energy: f64,
    pub generation: u32,
    pub dna: Dna,
    /// Reproduction eligibility evaluated when the view was taken.
    pub fertile: bool,
}

/// A food item as indexed at the start of the tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodView<H> {
    pub handle: H,
    pub position: Position,
    pub radius: f64,
    pub energy: f64,
}

/// World mutation requested by an organism's turn.
///
/// Effects on the acting organism itself are applied directly by the
/// resolvers; these commands carry what the world must do to other entities.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionCommand<H> {
    EatFood {
        food: H,
        x: f64,
        y: f64,
    },
    Kill {
        prey: H,
        prey_id: Uuid,
        predator_id: Uuid,
        x: f64,
        y: f64,
    },
    /// `offspring` is `None` when the spawn point was rejected; the cost was paid regardless.
    Birth {
        offspring: Option<OffspringSpec>,
        sexual: bool,
        genetic_distance: f64,
    },
    Die {
        cause: DeathCause,
    },
}
