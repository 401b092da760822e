//! Privileged play capabilities
//!
//! Membership and admin perks are expressed as one capability set that the
//! hazard and collision code query, instead of a handful of loose booleans.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// What the current player is allowed to bend
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct SimulationPolicy: u8 {
        /// Moving walls travel at half speed
        const SLOW_MOVERS = 1 << 0;
        /// Opening floors shake but never sink, disappearing floors never vanish
        const STABLE_FLOORS = 1 << 1;
        /// Free vertical movement, no gravity
        const FLY = 1 << 2;
        /// Lethal contacts and falls are ignored
        const NO_TRAPS = 1 << 3;
        /// Honor instant win/death commands from input
        const INSTANT_COMMANDS = 1 << 4;
    }
}

impl SimulationPolicy {
    /// Regular player, no perks
    pub fn standard() -> Self {
        Self::empty()
    }

    /// Elevated membership: hazard leniency only
    pub fn member() -> Self {
        Self::SLOW_MOVERS | Self::STABLE_FLOORS
    }

    /// Admin: leniency plus debug powers (fly, no traps stay opt-in)
    pub fn admin() -> Self {
        Self::member() | Self::INSTANT_COMMANDS
    }

    #[inline]
    pub fn slow_movers(self) -> bool {
        self.contains(Self::SLOW_MOVERS)
    }

    #[inline]
    pub fn stable_floors(self) -> bool {
        self.contains(Self::STABLE_FLOORS)
    }

    #[inline]
    pub fn flying(self) -> bool {
        self.contains(Self::FLY)
    }

    #[inline]
    pub fn no_traps(self) -> bool {
        self.contains(Self::NO_TRAPS)
    }

    #[inline]
    pub fn instant_commands(self) -> bool {
        self.contains(Self::INSTANT_COMMANDS)
    }
}
