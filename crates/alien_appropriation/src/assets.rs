//! Asset keys handed to the renderer
//!
//! Keys follow the `{kind}Mesh` / `{kind}Texture` convention of the asset
//! pack; every prop shares the lit texture material.

use saucer_engine::scene::Renderable;

/// Shared material for all props
pub const LIT_TEXTURE_MATERIAL: &str = "litTextureMaterial";

/// Ground tile mesh
pub const GROUND_MESH: &str = "GridMesh";

/// Ground tile texture
pub const GROUND_TEXTURE: &str = "groundTexture";

/// Descriptor for a `{kind}Mesh` / `{kind}Texture` pair
pub fn prop(kind: &str) -> Renderable {
    Renderable::new(format!("{kind}Mesh"), LIT_TEXTURE_MATERIAL, format!("{kind}Texture"))
}

/// Ground tile
pub fn ground() -> Renderable {
    Renderable::new(GROUND_MESH, LIT_TEXTURE_MATERIAL, GROUND_TEXTURE)
}

/// Hay bale (also used for bombs and orbiting hay)
pub fn hay() -> Renderable {
    prop("hay")
}

/// Cow
pub fn cow() -> Renderable {
    prop("cow")
}

/// The player's saucer
pub fn saucer() -> Renderable {
    prop("saucer")
}

/// Tractor beam cone
pub fn tractor_beam() -> Renderable {
    prop("tractorBeam")
}

/// Shield bubble
pub fn shield() -> Renderable {
    prop("shield")
}
