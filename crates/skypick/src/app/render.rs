use super::{
    default_lights, App, FrameInput, FrameUniforms, Instant, KeyCode, MovementInput, RenderError,
    Sample, ScreenDescriptor, ViewCamera,
};

impl<S: Sample> App<S> {
    /// Runs one frame: camera movement, scene update, UI, then drawing.
    pub(super) fn render(&mut self) {
        let now = Instant::now();
        let dt = self
            .last_frame_time
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_frame_time = Some(now);

        let (Some(engine), Some(egui), Some(window)) =
            (self.engine.as_mut(), self.egui.as_mut(), self.window.as_ref())
        else {
            return;
        };

        let look_delta = std::mem::take(&mut self.look_delta);
        if let Some(controller) = &self.controller {
            let movement = MovementInput {
                forward: self.keys_down.contains(&KeyCode::KeyW),
                backward: self.keys_down.contains(&KeyCode::KeyS),
                left: self.keys_down.contains(&KeyCode::KeyA),
                right: self.keys_down.contains(&KeyCode::KeyD),
                look_delta,
            };
            controller.update(&mut self.camera, &movement, dt);
        }

        let input = FrameInput {
            cursor: self.cursor,
            primary_clicked: std::mem::take(&mut self.primary_clicked),
            secondary_clicked: std::mem::take(&mut self.secondary_clicked),
        };
        self.sample.update(dt, &self.camera, &input);

        egui.begin_frame(window);
        self.sample.build_ui(&egui.context);
        let egui_output = egui.end_frame(window);

        let mut frame = match engine.begin_frame() {
            Ok(frame) => frame,
            Err(RenderError::SurfaceLost | RenderError::SurfaceOutdated) => {
                engine.resize(engine.width, engine.height);
                return;
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("out of memory");
                self.close_requested = true;
                return;
            }
            Err(err) => {
                log::warn!("skipping frame: {err}");
                return;
            }
        };

        let uniforms = FrameUniforms::new(
            self.camera.view_matrix(),
            self.camera.projection_matrix(),
            self.camera.position,
            &default_lights(),
        );
        engine.draw_scene(&mut frame, &uniforms, &self.sample.draw_list());

        #[allow(clippy::cast_possible_truncation)]
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [engine.width, engine.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        egui.render(
            &engine.device,
            &engine.queue,
            &mut frame.encoder,
            &frame.view,
            &screen_descriptor,
            egui_output,
        );
        engine.end_frame(frame);
    }
}
