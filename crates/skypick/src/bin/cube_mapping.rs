//! Static cube mapping with mouse picking.
//!
//! WASD moves, right-drag looks around. Right-click the ground to place the
//! cube, left-click the cube to remove it.

use std::process::ExitCode;

use skypick::{run, CubeMappingScene, SceneOptions};

fn main() -> ExitCode {
    env_logger::init();

    let result = SceneOptions::from_env_or(SceneOptions::default())
        .map_err(skypick::AppError::from)
        .and_then(|options| run(CubeMappingScene::new(options)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
