//! A vertex-colored cube rotating about two axes.

use std::process::ExitCode;

use skypick::{run, RotatingCubeScene, SceneOptions};

fn main() -> ExitCode {
    env_logger::init();

    let result = SceneOptions::from_env_or(SceneOptions::rotating_cube())
        .map_err(skypick::AppError::from)
        .and_then(|options| run(RotatingCubeScene::new(options)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
