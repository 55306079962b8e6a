use std::collections::BTreeMap;

use config::{Color, Colors};
use glam::{DMat4, DVec3};
use model::{Light as SceneLight, MaterialTag, Primitive};
use three_d::{
    vec3, AmbientLight, Camera, ClearState, Context, CpuMaterial, CpuMesh, DirectionalLight, Gm,
    InstancedMesh, Instances, Light, Mat4, PhysicalMaterial, RenderTarget, Srgba, Vec3,
};

/// A scene rendering the primitives of a shoring.
pub struct Scene {
    objects: Vec<InstancedObject>,
    directional: Vec<DirectionalLight>,
    ambient: Vec<AmbientLight>,
    background: Color,
}

impl Scene {
    /// Creates an empty scene only showing the background.
    pub fn empty(colors: &Colors) -> Self {
        Self {
            objects: Vec::new(),
            directional: Vec::new(),
            ambient: Vec::new(),
            background: colors.background,
        }
    }

    /// Creates a scene from a model scene using the given colors.
    ///
    /// Primitives sharing a material tag are drawn as instances of a single cube mesh.
    pub fn from_model(context: &Context, scene: &model::Scene, colors: &Colors) -> Self {
        let mut transformations: BTreeMap<MaterialTag, Vec<Mat4>> = BTreeMap::new();
        for primitive in scene.primitives() {
            transformations
                .entry(primitive.member.material())
                .or_default()
                .push(cube_transformation(primitive));
        }

        let cube = CpuMesh::cube();
        let objects = transformations
            .into_iter()
            .map(|(tag, transformations)| {
                InstancedObject::new(context, &cube, color(colors, tag), transformations)
            })
            .collect();

        let mut directional = Vec::new();
        let mut ambient = Vec::new();
        for light in scene.lights() {
            match *light {
                SceneLight::Directional {
                    direction,
                    intensity,
                } => {
                    #[allow(clippy::cast_possible_truncation)]
                    directional.push(DirectionalLight::new(
                        context,
                        intensity as f32,
                        Srgba::WHITE,
                        to_vec3(direction),
                    ));
                }
                SceneLight::Ambient { intensity } => {
                    #[allow(clippy::cast_possible_truncation)]
                    ambient.push(AmbientLight::new(context, intensity as f32, Srgba::WHITE));
                }
            }
        }

        Self {
            objects,
            directional,
            ambient,
            background: colors.background,
        }
    }

    /// Renders the scene with a given camera and render target.
    pub fn render(&self, camera: &Camera, render_target: &RenderTarget) {
        let Color { r, g, b, a } = self.background;

        let lights: Vec<_> = self
            .directional
            .iter()
            .map(|light| light as &dyn Light)
            .chain(self.ambient.iter().map(|light| light as &dyn Light))
            .collect();

        render_target
            .clear(ClearState::color_and_depth(
                f32::from(r) / 255.0,
                f32::from(g) / 255.0,
                f32::from(b) / 255.0,
                f32::from(a) / 255.0,
                1.0,
            ))
            .render(
                camera,
                self.objects.iter().map(|object| &object.inner),
                &lights,
            );
    }
}

/// An instanced object which can be rendered in a scene.
struct InstancedObject {
    inner: Gm<InstancedMesh, PhysicalMaterial>,
}

impl InstancedObject {
    /// Creates a new instanced object from a mesh, color and a vector of transformations.
    fn new(context: &Context, mesh: &CpuMesh, color: Color, transformations: Vec<Mat4>) -> Self {
        let instanced_mesh = InstancedMesh::new(
            context,
            &Instances {
                transformations,
                ..Default::default()
            },
            mesh,
        );
        let Color { r, g, b, a } = color;
        let material = PhysicalMaterial::new(
            context,
            &CpuMaterial {
                albedo: Srgba::new(r, g, b, a),
                ..Default::default()
            },
        );

        Self {
            inner: Gm::new(instanced_mesh, material),
        }
    }
}

fn color(colors: &Colors, tag: MaterialTag) -> Color {
    match tag {
        MaterialTag::Pillar => colors.pillar,
        MaterialTag::Plate => colors.plate,
        MaterialTag::Wedge => colors.wedge,
        MaterialTag::Connector => colors.connector,
        MaterialTag::Brace => colors.brace,
        MaterialTag::Stopper => colors.stopper,
        MaterialTag::Plywood => colors.plywood,
    }
}

/// Returns the transformation mapping the cube mesh, spanning -1 to 1, onto a primitive.
fn cube_transformation(primitive: &Primitive) -> Mat4 {
    let matrix = DMat4::from(primitive.transform()) * DMat4::from_scale(DVec3::splat(0.5));

    matrix.as_mat4().to_cols_array_2d().into()
}

/// Converts a vector to the single precision vector used for rendering.
pub fn to_vec3(vector: DVec3) -> Vec3 {
    let vector = vector.as_vec3();

    vec3(vector.x, vector.y, vector.z)
}
