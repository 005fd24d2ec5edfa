//! Wavefront OBJ import. Every model (`o`/`g` block) in a file becomes its
//! own group of triangles, and those groups are collected under one parent.

use std::{io::BufRead, path::Path};

use log::{debug, warn};

use crate::{
    error::Result,
    material::Material,
    math::{Vector4, EPSILON},
    object::{Group, Shape},
};

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load an OBJ file from disk. When `smooth` is set and the file carries
/// vertex normals, faces become smooth triangles.
pub fn load_obj<P: AsRef<Path>>(path: P, smooth: bool, material: &Material) -> Result<Group> {
    let path = path.as_ref();
    let (models, _) = tobj::load_obj(path, &load_options())?;
    debug!("loaded {} model(s) from {}", models.len(), path.display());
    Ok(build(models, smooth, material))
}

/// Parse OBJ data from a reader. Material libraries are not followed.
pub fn parse_obj<R: BufRead>(reader: &mut R, smooth: bool, material: &Material) -> Result<Group> {
    let (models, _) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;
    Ok(build(models, smooth, material))
}

fn build(models: Vec<tobj::Model>, smooth: bool, material: &Material) -> Group {
    let mut root = Group::new();

    for model in models.into_iter() {
        let mesh = &model.mesh;
        let vertex = |i: u32| {
            let i = i as usize * 3;
            Vector4::point(
                mesh.positions[i] as f64,
                mesh.positions[i + 1] as f64,
                mesh.positions[i + 2] as f64,
            )
        };
        let normal = |i: u32| {
            let i = i as usize * 3;
            Vector4::vector(
                mesh.normals[i] as f64,
                mesh.normals[i + 1] as f64,
                mesh.normals[i + 2] as f64,
            )
        };
        let has_normals = smooth
            && !mesh.normals.is_empty()
            && mesh.normal_indices.len() == mesh.indices.len();

        let mut group = Group::new();
        let mut skipped = 0;
        for (face, idx) in mesh.indices.chunks_exact(3).enumerate() {
            let (p1, p2, p3) = (vertex(idx[0]), vertex(idx[1]), vertex(idx[2]));

            // zero-area faces have no normal
            if (p3 - p1).cross(p2 - p1).magnitude() < EPSILON {
                skipped += 1;
                continue;
            }

            let triangle = if has_normals {
                let n = &mesh.normal_indices[face * 3..face * 3 + 3];
                Shape::smooth_triangle(p1, p2, p3, normal(n[0]), normal(n[1]), normal(n[2]))
            } else {
                Shape::triangle(p1, p2, p3)
            };
            group.add_child(triangle.with_material(material.clone()));
        }

        if skipped > 0 {
            warn!("skipped {} degenerate face(s) in model {:?}", skipped, model.name);
        }
        if !group.is_empty() {
            root.add_child(Shape::from(group));
        }
    }

    root
}
