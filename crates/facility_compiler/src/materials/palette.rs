//! Named colours and the stock surfaces used by the facility builders

use super::MaterialDescriptor;

/// Neon cyan accent
pub const CYAN: [f32; 4] = [0.0, 0.88, 1.0, 1.0];
/// Neon magenta accent
pub const MAGENTA: [f32; 4] = [1.0, 0.2, 0.7, 1.0];
/// Neon purple accent
pub const PURPLE: [f32; 4] = [0.6, 0.2, 1.0, 1.0];
/// Cool white used for floors
pub const WHITE: [f32; 4] = [0.97, 0.97, 1.0, 1.0];

/// Room floor
pub fn floor() -> MaterialDescriptor {
    MaterialDescriptor::pbr([0.86, 0.88, 0.93, 1.0], 0.35, 0.1)
}

/// Room and corridor walls
pub fn wall() -> MaterialDescriptor {
    MaterialDescriptor::pbr([0.92, 0.93, 0.97, 1.0], 0.5, 0.15)
}

/// Light-emitting ceiling panels
pub fn ceiling() -> MaterialDescriptor {
    MaterialDescriptor::pbr_emissive([0.88, 0.9, 0.95, 1.0], 0.45, 0.2, 0.7)
}

/// Neon accent strip
pub fn neon(color: [f32; 4], strength: f32) -> MaterialDescriptor {
    MaterialDescriptor::emissive(color, strength)
}

/// Bridge deck glass
pub fn bridge_deck() -> MaterialDescriptor {
    MaterialDescriptor::glass([0.45, 0.8, 1.0, 0.35], 0.1)
}

/// Door panel glass
pub fn door_glass() -> MaterialDescriptor {
    MaterialDescriptor::glass([0.45, 0.75, 1.0, 0.5], 0.03)
}

/// Hall dome glass
pub fn hall_dome() -> MaterialDescriptor {
    MaterialDescriptor::glass([0.7, 0.9, 1.0, 0.3], 0.03)
}

/// Door frame metal with a faint glow
pub fn door_frame() -> MaterialDescriptor {
    MaterialDescriptor::pbr_emissive(CYAN, 0.25, 0.85, 0.8)
}

/// Circular hall floor
pub fn hall_floor() -> MaterialDescriptor {
    MaterialDescriptor::pbr(WHITE, 0.3, 0.2)
}

/// Staircase steps
pub fn stair_step() -> MaterialDescriptor {
    MaterialDescriptor::pbr([0.85, 0.86, 0.9, 1.0], 0.35, 0.35)
}

/// Outdoor ground
pub fn ground() -> MaterialDescriptor {
    MaterialDescriptor::pbr([0.12, 0.13, 0.18, 1.0], 0.7, 0.2)
}

/// Tree trunk bark
pub fn trunk() -> MaterialDescriptor {
    MaterialDescriptor::pbr([0.2, 0.15, 0.1, 1.0], 0.8, 0.0)
}

/// Softly glowing tree canopy
pub fn leaf() -> MaterialDescriptor {
    MaterialDescriptor::emissive([0.1, 0.6, 0.25, 1.0], 2.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_surfaces_are_valid() {
        let all = [
            floor(), wall(), ceiling(), neon(CYAN, 12.0), neon(MAGENTA, 15.0),
            neon(PURPLE, 20.0), bridge_deck(), door_glass(), hall_dome(), door_frame(),
            hall_floor(), stair_step(), ground(), trunk(), leaf(),
        ];
        for descriptor in &all {
            assert!(descriptor.validate().is_ok(), "{descriptor:?}");
        }
    }
}
