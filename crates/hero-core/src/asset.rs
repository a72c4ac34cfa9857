//! Binary glTF decoding for the logo model.
//!
//! The logo ships as a self-contained GLB; external `.bin` buffers are
//! rejected rather than fetched.

use glam::{Quat, Vec3};
use gltf::Gltf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("malformed glTF: {0}")]
    Parse(#[from] gltf::Error),
    #[error("external buffer uri `{0}` is not supported")]
    ExternalBuffer(String),
    #[error("glb is missing its binary payload")]
    MissingBlob,
    #[error("mesh `{0}` has no vertex positions")]
    MissingPositions(String),
}

/// PBR parameters carried per mesh; the tuning pass clamps these.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialParams {
    pub base_color: [f32; 4],
    pub roughness: f32,
    pub metalness: f32,
    pub env_map_intensity: f32,
}

#[derive(Clone, Debug)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub material: MaterialParams,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// Decoded model: flattened meshes plus the root transform as authored.
#[derive(Clone, Debug)]
pub struct ModelData {
    pub meshes: Vec<MeshData>,
    pub scale: Vec3,
    pub rotation: Quat,
}

pub fn decode_glb(bytes: &[u8]) -> Result<ModelData, AssetError> {
    let document = Gltf::from_slice(bytes)?;

    let mut buffers: Vec<Vec<u8>> = Vec::new();
    for buffer in document.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let blob = document.blob.as_deref().ok_or(AssetError::MissingBlob)?;
                buffers.push(blob.to_vec());
            }
            gltf::buffer::Source::Uri(uri) => {
                return Err(AssetError::ExternalBuffer(uri.to_string()));
            }
        }
    }

    let mut meshes = Vec::new();
    for mesh in document.meshes() {
        let mesh_name = mesh.name().unwrap_or("mesh").to_string();
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|b| buffers.get(b.index()).map(|v| v.as_slice()));

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .ok_or_else(|| AssetError::MissingPositions(mesh_name.clone()))?
                .collect();
            let normals: Vec<[f32; 3]> = match reader.read_normals() {
                Some(iter) => iter.collect(),
                None => vec![[0.0, 0.0, 1.0]; positions.len()],
            };
            let indices: Vec<u32> = match reader.read_indices() {
                Some(iter) => iter.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            let pbr = primitive.material().pbr_metallic_roughness();
            let material = MaterialParams {
                base_color: pbr.base_color_factor(),
                roughness: pbr.roughness_factor(),
                metalness: pbr.metallic_factor(),
                env_map_intensity: 1.0,
            };

            meshes.push(MeshData {
                name: mesh_name.clone(),
                positions,
                normals,
                indices,
                material,
                cast_shadow: false,
                receive_shadow: false,
            });
        }
    }

    // Root transform as authored; the tuning pass normalizes it.
    let (scale, rotation) = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .and_then(|s| s.nodes().next())
        .map(|node| {
            let (_, r, s) = node.transform().decomposed();
            (Vec3::from_array(s), Quat::from_array(r))
        })
        .unwrap_or((Vec3::ONE, Quat::IDENTITY));

    Ok(ModelData {
        meshes,
        scale,
        rotation,
    })
}
