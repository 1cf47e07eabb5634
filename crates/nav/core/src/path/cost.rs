use crate::config::NavConfig;
use crate::map::TileSymbol;

/// Movement cost table in integer cost units (tenths of a step).
///
/// Integer costs keep heap ordering total and the search deterministic;
/// [`NavConfig::STEP_COST`] is the unit for an ordinary tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CostModel {
    step: u32,
    grass: u32,
    ledge: u32,
    cross_map_penalty: u32,
}

impl CostModel {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            step: NavConfig::STEP_COST,
            grass: config.grass_cost(),
            ledge: config.ledge_cost,
            cross_map_penalty: config.cross_map_penalty,
        }
    }

    /// Cost of stepping onto a tile of the given symbol.
    ///
    /// Only meaningful for tiles the walkability rules admit; warp tiles
    /// get the plain step cost since they are always terminal.
    pub fn enter_cost(&self, symbol: TileSymbol) -> u32 {
        match symbol {
            TileSymbol::TallGrass => self.grass,
            TileSymbol::Ledge(_) => self.ledge,
            _ => self.step,
        }
    }

    /// Extra cost for a cell recently visited under a different location
    /// key (oscillation through a warp boundary).
    pub fn cross_map_penalty(&self) -> u32 {
        self.cross_map_penalty
    }

    /// Cheapest possible enter cost under this model. The A* heuristic must
    /// scale by this, not the plain step cost: in training mode grass is
    /// cheaper than floor, and a larger multiplier would overestimate and
    /// steer the search away from routes the model actually prefers.
    pub fn min_enter_cost(&self) -> u32 {
        self.step.min(self.grass).min(self.ledge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TravelMode;
    use crate::types::Direction;

    #[test]
    fn speedrun_mode_penalizes_grass() {
        let model = CostModel::from_config(&NavConfig::default());
        assert_eq!(model.enter_cost(TileSymbol::Floor), NavConfig::STEP_COST);
        assert!(model.enter_cost(TileSymbol::TallGrass) > 5 * NavConfig::STEP_COST);
        assert!(model.enter_cost(TileSymbol::Ledge(Direction::South)) > NavConfig::STEP_COST);
        assert_eq!(model.min_enter_cost(), NavConfig::STEP_COST);
    }

    #[test]
    fn training_mode_makes_grass_cheap() {
        let config = NavConfig::with_travel_mode(TravelMode::Training);
        let model = CostModel::from_config(&config);
        assert!(model.enter_cost(TileSymbol::TallGrass) < NavConfig::STEP_COST);
        // The heuristic scale must track the cheap grass, not the step cost.
        assert_eq!(
            model.min_enter_cost(),
            model.enter_cost(TileSymbol::TallGrass)
        );
    }
}
