use super::{
    ActiveEventLoop, App, ApplicationHandler, Arc, Camera, EguiIntegration, ElementState,
    FutureExt, KeyCode, LogicalSize, MouseButton, PhysicalKey, RenderEngine, Sample, Vec2,
    Viewport, Window, WindowEvent, WindowId,
};
use crate::error::Result;

impl<S: Sample> App<S> {
    /// Creates the window, the engine, the UI and the sample's resources.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let options = self.sample.options();
        let window_attributes = Window::default_attributes()
            .with_title(options.title.clone())
            .with_inner_size(LogicalSize::new(options.width, options.height));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let mut engine = RenderEngine::new_windowed(window.clone()).block_on()?;
        let egui = EguiIntegration::new(&engine.device, engine.surface_format(), &window);

        self.camera = Camera::from_options(
            &options.camera,
            Viewport::from_size(engine.width, engine.height),
        );
        self.controller = self.sample.controller();
        self.sample.load(&mut engine)?;

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.egui = Some(egui);
        Ok(())
    }
}

impl<S: Sample> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init(event_loop) {
            log::error!("failed to start: {err}");
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui see every event first
        if let (Some(egui), Some(window)) = (&mut self.egui, &self.window) {
            egui.handle_event(window, &event);
        }
        let pointer_over_ui = self.egui.as_ref().is_some_and(EguiIntegration::wants_pointer);
        let keyboard_in_ui = self.egui.as_ref().is_some_and(EguiIntegration::wants_keyboard);

        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
                self.camera.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let cursor = Vec2::new(position.x as f32, position.y as f32);
                let delta = cursor - self.cursor;
                self.cursor = cursor;
                self.look_delta += self.look.motion(delta);
            }
            WindowEvent::MouseInput { state, button, .. } => match (button, state) {
                (MouseButton::Left, ElementState::Pressed) if !pointer_over_ui => {
                    self.primary_clicked = true;
                }
                (MouseButton::Right, ElementState::Pressed) if !pointer_over_ui => {
                    self.look.press();
                }
                (MouseButton::Right, ElementState::Released) => {
                    if self.look.release() {
                        self.secondary_clicked = true;
                    }
                }
                _ => {}
            },
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed if !keyboard_in_ui => {
                            if code == KeyCode::Escape {
                                self.close_requested = true;
                            }
                            self.keys_down.insert(code);
                        }
                        ElementState::Pressed => {}
                        ElementState::Released => {
                            self.keys_down.remove(&code);
                        }
                    }
                }
            }
            WindowEvent::Focused(false) => {
                // Releases are lost while unfocused
                self.keys_down.clear();
                self.look.release();
            }
            _ => {}
        }

        if self.close_requested {
            event_loop.exit();
        }
    }
}
