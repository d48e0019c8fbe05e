//! Jump physics
//!
//! Signed-velocity model: gravity is subtracted every airborne tick, which
//! slows the ascent and speeds up the descent.

use super::state::Player;

impl Player {
    /// Start a jump if grounded. Returns whether the jump started.
    pub fn try_jump(&mut self, jump_power: f32) -> bool {
        if self.airborne || self.y != 0.0 {
            return false;
        }
        self.airborne = true;
        self.vy = jump_power;
        true
    }

    /// Advance one tick of the jump arc. Returns true on the landing tick.
    pub fn integrate(&mut self, gravity: f32) -> bool {
        if !self.airborne {
            return false;
        }
        debug_assert!(self.y >= 0.0, "player below ground: {}", self.y);

        let next_y = self.y + self.vy;
        if next_y <= 0.0 {
            self.y = 0.0;
            self.vy = 0.0;
            self.airborne = false;
            return true;
        }
        self.y = next_y;
        self.vy -= gravity;
        false
    }
}
