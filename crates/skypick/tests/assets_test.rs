//! The bundled assets satisfy the default options.

use std::path::PathBuf;

use skypick::{SceneOptions, SkyboxPreset};
use skypick_render::{load_rgba, CubeImage};

fn options() -> SceneOptions {
    SceneOptions {
        asset_root: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets"),
        ..SceneOptions::default()
    }
}

#[test]
fn test_default_skyboxes_load() {
    let options = options();
    for preset in SkyboxPreset::ALL {
        let config = options.skybox(preset).unwrap();
        let cube = CubeImage::load(&config.source, &options.asset_root).unwrap();
        assert!(cube.face_size() > 0, "{preset}");
        assert!(cube.layer(5).is_some());
    }
}

#[test]
fn test_default_material_textures_resolve() {
    let options = options();
    for material in options.materials.iter() {
        let name = material.texture.as_deref().unwrap();
        let path = options.resolve_asset(name).unwrap();
        let image = load_rgba(&path).unwrap();
        assert!(image.width() > 0 && image.height() > 0, "{name}");
    }
}
