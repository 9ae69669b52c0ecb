//! The static cube mapping sample: a reflective sphere over a ground slab,
//! a skybox, and a cube placed and removed with the mouse.

use glam::{Vec3, Vec4};
use image::{Rgba, RgbaImage};
use skypick_core::{
    BoundingBox, BoundingSphere, Material, PickPolicy, PickResult, PickTarget, PickVolume,
    Picker, Placeable, PlacementEvent, Ray, SceneOptions, SkyboxPreset, Transform, ViewCamera,
};
use skypick_render::{
    box_mesh, cylinder_mesh, load_rgba, sphere_mesh, Camera, CubeHandle, CubeImage, DrawList,
    FirstPersonController, LitDraw, MeshHandle, ObjectUniforms, RenderEngine, TextureHandle,
};
use skypick_ui::{build_scene_panel, SceneUiState};

use super::{FrameInput, Sample};
use crate::error::{AppError, Result};

pub const SPHERE_RADIUS: f32 = 1.0;
pub const GROUND_POSITION: Vec3 = Vec3::new(0.0, -3.0, 0.0);
pub const GROUND_SCALE: Vec3 = Vec3::new(100.0, 1.0, 100.0);
pub const CYLINDER_POSITION: Vec3 = Vec3::new(0.0, -1.99, 0.0);
pub const CYLINDER_RADIUS: f32 = 0.5;
pub const CYLINDER_HEIGHT: f32 = 2.0;
/// Half-widths of the placeable cube (a 2x2x2 box).
pub const CUBE_EXTENTS: Vec3 = Vec3::ONE;

const SPHERE_SLICES: u32 = 20;
const CYLINDER_SLICES: u32 = 20;

/// The lit objects of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneObject {
    Sphere,
    Cube,
    Ground,
    Cylinder,
}

impl SceneObject {
    /// Objects in the order they are drawn. Reflective ones come first.
    pub const DRAW_ORDER: [SceneObject; 4] = [
        SceneObject::Sphere,
        SceneObject::Cube,
        SceneObject::Ground,
        SceneObject::Cylinder,
    ];

    /// Whether the environment map is enabled while this object is drawn.
    pub fn reflection_enabled(self) -> bool {
        matches!(self, SceneObject::Sphere | SceneObject::Cube)
    }

    fn label(self) -> &'static str {
        match self {
            SceneObject::Sphere => "sphere",
            SceneObject::Cube => "cube",
            SceneObject::Ground => "ground",
            SceneObject::Cylinder => "cylinder",
        }
    }
}

struct GpuObject {
    object: SceneObject,
    mesh: MeshHandle,
    texture: TextureHandle,
}

struct Resources {
    objects: Vec<GpuObject>,
    skyboxes: Vec<(SkyboxPreset, CubeHandle)>,
}

impl Resources {
    fn skybox(&self, selected: SkyboxPreset, fallback: SkyboxPreset) -> Option<CubeHandle> {
        resolve_skybox(&self.skyboxes, selected, fallback)
    }
}

/// Cube for `selected`, else for `fallback`, else the first one loaded.
fn resolve_skybox<H: Copy>(
    loaded: &[(SkyboxPreset, H)],
    selected: SkyboxPreset,
    fallback: SkyboxPreset,
) -> Option<H> {
    let find = |preset: SkyboxPreset| {
        loaded
            .iter()
            .find(|(p, _)| *p == preset)
            .map(|(_, handle)| *handle)
    };
    find(selected)
        .or_else(|| find(fallback))
        .or_else(|| loaded.first().map(|(_, handle)| *handle))
}

/// Scene state of the cube mapping sample.
pub struct CubeMappingScene {
    options: SceneOptions,
    sphere: Transform,
    ground: Transform,
    cylinder: Transform,
    cube: Placeable,
    picker: Picker,
    pick: PickResult,
    ui: SceneUiState,
    resources: Option<Resources>,
}

impl CubeMappingScene {
    /// Lays out the scene and registers its pick volumes.
    pub fn new(options: SceneOptions) -> Self {
        let sphere = Transform::identity();
        let ground = Transform::from_translation(GROUND_POSITION).with_scale(GROUND_SCALE);
        let cylinder = Transform::from_translation(CYLINDER_POSITION);

        let mut picker = Picker::new(options.pick_policy);
        picker.add_sphere(
            PickTarget::Sphere,
            BoundingSphere::new(sphere.translation, SPHERE_RADIUS),
        );
        picker.add_box(
            PickTarget::Ground,
            BoundingBox::new(Vec3::ZERO, Vec3::splat(0.5)).transformed(&ground),
        );
        picker.add_box(
            PickTarget::Cylinder,
            BoundingBox::new(
                Vec3::ZERO,
                Vec3::new(CYLINDER_RADIUS, CYLINDER_HEIGHT * 0.5, CYLINDER_RADIUS),
            )
            .transformed(&cylinder),
        );

        let ui = SceneUiState::new(options.initial_skybox);
        Self {
            options,
            sphere,
            ground,
            cylinder,
            cube: Placeable::new(CUBE_EXTENTS),
            picker,
            pick: PickResult::none(),
            ui,
            resources: None,
        }
    }

    /// What the cursor resolved to on the last update.
    pub fn pick(&self) -> &PickResult {
        &self.pick
    }

    /// The placeable cube.
    pub fn cube(&self) -> &Placeable {
        &self.cube
    }

    /// The pick volumes, in registration order.
    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    /// Switches between first-match and nearest picking.
    pub fn set_pick_policy(&mut self, policy: PickPolicy) {
        self.picker.set_policy(policy);
    }

    /// The skybox currently shown and used for reflections.
    pub fn skybox(&self) -> SkyboxPreset {
        self.ui.skybox
    }

    /// Presets the skybox combo offers.
    pub fn skybox_choices(&self) -> Vec<SkyboxPreset> {
        self.options.configured_skyboxes()
    }

    /// Selects the skybox shown and reflected.
    ///
    /// Presets without a configured source are refused and the current
    /// skybox stays. Returns true if `preset` is now selected.
    pub fn set_skybox(&mut self, preset: SkyboxPreset) -> bool {
        if self.options.skybox(preset).is_none() {
            log::warn!("skybox '{preset}' has no configured source");
            return false;
        }
        if self.ui.select(preset).is_some() {
            log::info!("skybox: {preset}");
        }
        true
    }

    /// Resolves the cursor and applies this frame's clicks.
    ///
    /// Order: pick, then a secondary click places or moves the cube on a
    /// ground hit, then a primary click removes the cube if the ray hits it.
    pub fn handle_input(&mut self, camera: &impl ViewCamera, input: &FrameInput) -> &PickResult {
        let cursor = camera.viewport().clamp_cursor(input.cursor);
        let ray = Ray::from_cursor(camera, cursor);
        let pick = self.picker.pick(&ray);
        if pick.target != self.pick.target {
            log::debug!("picked: {}", pick.target);
        }

        if input.secondary_clicked {
            if let Some(event) = self
                .cube
                .handle_secondary(pick.coordinate_on(PickTarget::Ground))
            {
                self.on_placement(event);
            }
        }
        if input.primary_clicked {
            if let Some(event) = self.cube.handle_primary(&ray) {
                self.on_placement(event);
            }
        }

        self.pick = pick;
        &self.pick
    }

    fn on_placement(&mut self, event: PlacementEvent) {
        match self.cube.bounding_box() {
            Some(bounds) => {
                let volume = PickVolume::Box(bounds);
                if !self.picker.update_volume(PickTarget::Cube, volume) {
                    self.picker.add_box(PickTarget::Cube, bounds);
                }
            }
            None => self.picker.remove(PickTarget::Cube),
        }
        log::debug!("cube pick volume updated after {event:?}");
    }

    /// Objects drawn this frame, in draw order. The cube only while placed.
    pub fn visible_objects(&self) -> Vec<SceneObject> {
        SceneObject::DRAW_ORDER
            .into_iter()
            .filter(|object| *object != SceneObject::Cube || self.cube.is_placed())
            .collect()
    }

    /// Current placement of `object`.
    pub fn transform(&self, object: SceneObject) -> &Transform {
        match object {
            SceneObject::Sphere => &self.sphere,
            SceneObject::Cube => self.cube.transform(),
            SceneObject::Ground => &self.ground,
            SceneObject::Cylinder => &self.cylinder,
        }
    }

    /// Material of `object`.
    pub fn material(&self, object: SceneObject) -> &Material {
        let materials = &self.options.materials;
        match object {
            SceneObject::Sphere => &materials.sphere,
            SceneObject::Cube => &materials.cube,
            SceneObject::Ground => &materials.ground,
            SceneObject::Cylinder => &materials.cylinder,
        }
    }

    /// Uniform block of `object` for this frame.
    pub fn object_uniforms(&self, object: SceneObject) -> ObjectUniforms {
        ObjectUniforms::from_transform(
            self.transform(object),
            self.material(object),
            object.reflection_enabled(),
        )
    }

    fn load_texture(&self, engine: &mut RenderEngine, material: &Material) -> Result<TextureHandle> {
        match &material.texture {
            Some(name) => {
                let path = self.options.resolve_asset(name)?;
                Ok(engine.upload_texture(name, &load_rgba(&path)?)?)
            }
            None => {
                let white = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
                Ok(engine.upload_texture(&material.name, &white)?)
            }
        }
    }
}

impl Sample for CubeMappingScene {
    fn options(&self) -> &SceneOptions {
        &self.options
    }

    fn controller(&self) -> Option<FirstPersonController> {
        Some(FirstPersonController::from_options(&self.options.camera))
    }

    fn load(&mut self, engine: &mut RenderEngine) -> Result<()> {
        let initial = self.options.initial_skybox;
        if self.options.skybox(initial).is_none() {
            return Err(AppError::MissingSkybox(initial));
        }

        let mut objects = Vec::with_capacity(SceneObject::DRAW_ORDER.len());
        for object in SceneObject::DRAW_ORDER {
            let mesh_data = match object {
                SceneObject::Sphere => sphere_mesh(SPHERE_RADIUS, SPHERE_SLICES, SPHERE_SLICES),
                SceneObject::Cube => {
                    let size = CUBE_EXTENTS * 2.0;
                    box_mesh(size.x, size.y, size.z)
                }
                SceneObject::Ground => box_mesh(1.0, 1.0, 1.0),
                SceneObject::Cylinder => {
                    cylinder_mesh(CYLINDER_RADIUS, CYLINDER_HEIGHT, CYLINDER_SLICES)
                }
            };
            let mesh = engine.upload_lit_mesh(object.label(), &mesh_data);
            let texture = self.load_texture(engine, self.material(object))?;
            objects.push(GpuObject {
                object,
                mesh,
                texture,
            });
        }

        let mut skyboxes = Vec::with_capacity(self.options.skyboxes.len());
        for config in &self.options.skyboxes {
            let image = CubeImage::load(&config.source, &self.options.asset_root)?;
            let handle = engine.upload_cube(config.preset.name(), &image)?;
            skyboxes.push((config.preset, handle));
        }

        log::info!(
            "cube mapping scene loaded: {} objects, {} skyboxes",
            objects.len(),
            skyboxes.len()
        );
        self.resources = Some(Resources { objects, skyboxes });
        Ok(())
    }

    fn update(&mut self, _dt: f32, camera: &Camera, input: &FrameInput) {
        self.handle_input(camera, input);
    }

    fn build_ui(&mut self, ctx: &egui::Context) {
        let previous = self.ui.skybox;
        let choices = self.skybox_choices();
        if let Some(preset) = build_scene_panel(ctx, &mut self.ui, &self.pick, &choices) {
            self.ui.skybox = previous;
            self.set_skybox(preset);
        }
    }

    fn draw_list(&self) -> DrawList {
        let clear: Vec4 = self.options.clear_color;
        let mut list = DrawList {
            clear_color: clear.as_dvec4().to_array(),
            ..Default::default()
        };
        let Some(resources) = &self.resources else {
            return list;
        };

        let sky = resources.skybox(self.ui.skybox, self.options.initial_skybox);
        list.environment = sky;
        list.skybox = sky;
        list.lit = self
            .visible_objects()
            .into_iter()
            .filter_map(|object| {
                let gpu = resources.objects.iter().find(|gpu| gpu.object == object)?;
                Some(LitDraw {
                    mesh: gpu.mesh,
                    texture: gpu.texture,
                    uniforms: self.object_uniforms(object),
                })
            })
            .collect();
        list
    }
}

impl Default for CubeMappingScene {
    fn default() -> Self {
        Self::new(SceneOptions::default())
    }
}
